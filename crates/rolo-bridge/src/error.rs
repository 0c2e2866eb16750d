//! Error types for `rolo-bridge`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing request argument: {0}")]
  MissingArgument(&'static str),

  #[error("malformed request argument {key:?}: {source}")]
  BadArgument {
    key:    String,
    #[source]
    source: serde_json::Error,
  },

  #[error("contact id is not numeric: {0:?}")]
  NonNumericId(String),

  #[error("event id {0:?} already has a pending call")]
  DuplicateEventId(String),

  #[error("no pending call for event id {0:?}")]
  UnknownEventId(String),

  #[error("malformed native event: {0:?}")]
  MalformedEvent(String),

  #[error("native handle unavailable: {0}")]
  Uninitialized(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
