//! The result-delivery seam.

use serde_json::Value;

/// Delivery channel for a single request's outcome.
///
/// Requests never return results synchronously; acceptance and completion
/// are decoupled. `no_result(true)` tells the delivery layer the response is
/// still pending and the channel must stay open; `no_result(false)` closes
/// it after a synchronous failure.
pub trait ResultSink: Send + Sync {
  fn callback_ok(&self, payload: Value, keep_callback: bool);
  fn callback_error(&self, payload: Value, keep_callback: bool);
  fn no_result(&self, keep_callback: bool);
}
