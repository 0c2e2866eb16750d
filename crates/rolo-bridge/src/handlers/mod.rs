//! Request handlers — one per public contacts operation.
//!
//! Handlers decode URI-encoded JSON arguments, run translation and
//! validation, and dispatch through the gateway. The sink always hears
//! back: synchronous failures produce a structured error payload
//! immediately and close the channel, successes arrive later through the
//! pending-call registry.

pub mod remove;
pub mod save;
pub mod search;

pub use remove::remove;
pub use save::save;
pub use search::search;

use serde_json::{Value, json};

use rolo_core::error::ErrorCode;

use crate::{normalize, sink::ResultSink, wire};

/// The structured failure payload:
/// `{ "result": <escaped {"_success": false, "code": n}> }`.
pub(crate) fn error_payload(code: ErrorCode) -> Value {
  let body = json!({ "_success": false, "code": code });
  json!({ "result": wire::escape(&body.to_string()) })
}

/// Deliver a synchronous failure and close the channel.
pub(crate) fn fail(sink: &dyn ResultSink, code: ErrorCode) {
  sink.callback_error(error_payload(code), false);
  sink.no_result(false);
}

/// Did the native call succeed?
pub(crate) fn succeeded(payload: &Value) -> bool {
  payload.get("_success").and_then(Value::as_bool) == Some(true)
}

/// The native failure code, defaulting to [`ErrorCode::Unknown`].
pub(crate) fn failure_code(payload: &Value) -> Value {
  payload
    .get("code")
    .cloned()
    .unwrap_or_else(|| json!(ErrorCode::Unknown))
}

/// Rewrite a contact's native day-string birthday as epoch milliseconds
/// (or null when absent), in place on the raw payload.
pub(crate) fn renormalize_birthday(contact: &mut Value) {
  let Some(object) = contact.as_object_mut() else {
    return;
  };
  let native = object
    .get("birthday")
    .and_then(Value::as_str)
    .map(str::to_owned);
  let wire = match normalize::from_native_birthday(native.as_deref()) {
    Some(ms) => json!(ms),
    None => Value::Null,
  };
  object.insert("birthday".to_string(), wire);
}
