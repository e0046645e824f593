//! Browser implementations of the seams the lower crates leave open.

use ticketflow_client::Navigator;
use ticketflow_state::Theme;

/// [`Navigator`] backed by `window.location`. Used for the forced redirect
/// on 401; in-app navigation goes through the router instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().pathname().ok())
            .unwrap_or_default()
    }

    fn redirect(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(path).is_err() {
                tracing::warn!(path, "location redirect failed");
            }
        }
    }
}

/// Reflect the theme on `<html>` so stylesheets can key off `.dark`.
pub fn apply_theme(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };
    let class_list = root.class_list();
    let result = match theme {
        Theme::Dark => class_list.add_1("dark"),
        Theme::Light => class_list.remove_1("dark"),
    };
    if result.is_err() {
        tracing::warn!("failed to toggle theme class");
    }
}
