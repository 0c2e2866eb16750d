//! Wire error codes shared with the caller-facing contacts API.

use serde_repr::{Deserialize_repr, Serialize_repr};

/// Error code delivered in failure payloads.
///
/// The numeric values are part of the wire contract with the caller side and
/// follow the W3C contacts taxonomy; they serialize as bare numbers.
#[repr(u8)]
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr,
)]
pub enum ErrorCode {
  Unknown            = 0,
  InvalidArgument    = 1,
  Timeout            = 2,
  PendingOperation   = 3,
  Io                 = 4,
  NotSupported       = 5,
  OperationCancelled = 6,
  PermissionDenied   = 20,
}
