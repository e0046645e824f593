//! Runtime configuration read from the host page.

use wasm_bindgen::JsValue;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Backend base URL. Deployments set `window.TICKETFLOW_API_URL` from the
/// host page; local dev falls back to the default.
pub fn api_base_url() -> String {
    web_sys::window()
        .and_then(|window| {
            js_sys::Reflect::get(&window, &JsValue::from_str("TICKETFLOW_API_URL")).ok()
        })
        .and_then(|value| value.as_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
}
