use js_sys::Reflect;
use wasm_bindgen::JsValue;

use registration::{AuthenticationError, AuthenticationErrorType};

/// Turns a thrown value or rejected promise into an `AuthenticationError`,
/// keyed on the `DOMException` name.
pub(crate) fn exception(thrown: &JsValue) -> AuthenticationError {
    let name = property(thrown, "name");
    let message = property(thrown, "message");

    tracing::debug!("dom exception -> {}: {}", name, message);

    AuthenticationError {
        error: AuthenticationErrorType::from_dom_exception(&name),
    }
}

fn property(value: &JsValue, key: &str) -> String {
    Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|property| property.as_string())
        .unwrap_or_default()
}
