//! Response envelope normalization.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use ticketflow_core::ApiError;

/// Unwrap a possibly-enveloped payload.
///
/// The backend sometimes wraps resources as `{ "data": X }` and sometimes
/// returns `X` directly; this is the one place that tolerates both shapes.
/// Callers must never probe for `data` themselves.
pub fn unwrap_payload<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    let payload = match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };

    serde_json::from_value(payload).map_err(|err| ApiError::decode(err.to_string()))
}

/// Serialize a request body, normalizing failure into [`ApiError`].
pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|err| ApiError::decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn unwraps_nested_data_field() {
        let body = json!({ "data": { "id": "t-1" } });
        let out: Value = unwrap_payload(body).unwrap();
        assert_eq!(out, json!({ "id": "t-1" }));
    }

    #[test]
    fn passes_bare_payload_through() {
        let body = json!([1, 2, 3]);
        let out: Vec<u32> = unwrap_payload(body).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn decode_failure_is_normalized() {
        let err = unwrap_payload::<u32>(json!({ "data": "not a number" })).unwrap_err();
        assert_eq!(err.code.as_deref(), Some("decode_error"));
    }

    fn leaf_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,12}".prop_map(Value::from),
        ]
    }

    proptest! {
        // Wrapped and bare forms of the same payload unwrap identically.
        #[test]
        fn wrapped_equals_bare(v in leaf_value()) {
            let wrapped: Value = unwrap_payload(json!({ "data": v.clone() })).unwrap();
            let bare: Value = unwrap_payload(v.clone()).unwrap();
            prop_assert_eq!(&wrapped, &v);
            prop_assert_eq!(&bare, &v);
        }
    }
}
