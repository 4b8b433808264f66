//! Shared helpers for WASM API operations
//!
//! Serialization across the JS boundary and error conversion.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use wasm_bindgen::{JsCast, JsValue};

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| js_error(format!("{}: {}", error_context, e)))
}

/// Serialize a value to JavaScript as plain objects (no `Map`s)
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    to_js(value).map_err(|e| js_error(format!("{}: {}", error_context, e)))
}

pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

// ============================================================================
// Error Helpers
// ============================================================================

/// Log an error and turn it into a JS string value
pub fn js_error(msg: impl Display) -> JsValue {
    let msg = msg.to_string();
    log::error!("[WASM] {}", msg);
    JsValue::from_str(&msg)
}

/// Best-effort message out of a thrown JS value
pub fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
