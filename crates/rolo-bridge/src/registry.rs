//! The pending-call registry: in-flight operations keyed by event id.
//!
//! A pending call owns the caller's result sink from dispatch until exactly
//! one matching completion event consumes and removes it. There is no
//! timeout: a call whose completion event never arrives stays registered
//! indefinitely. That is a known limitation of the protocol — there is no
//! owner left to notify — so [`Registry::len`] exists to make the leak
//! observable.

use std::{collections::HashMap, sync::Arc};

use serde_json::Value;

use crate::{
  error::{Error, Result},
  sink::ResultSink,
};

/// The operation a pending call is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Find,
  Save,
  Remove,
}

impl Action {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Find => "find",
      Self::Save => "save",
      Self::Remove => "remove",
    }
  }
}

/// Response post-processing chosen at registration time.
///
/// `find` and `save` responses need birthday renormalization and
/// success/error branching before the sink sees them; `remove` responses
/// carry no shape to normalize and are delivered directly. The decoder runs
/// with the call's sink and the decoded payload.
pub type ResponseDecoder = fn(&dyn ResultSink, Value);

/// One in-flight operation.
pub struct PendingCall {
  pub event_id: String,
  pub sink:     Arc<dyn ResultSink>,
  pub action:   Action,
  pub decoder:  Option<ResponseDecoder>,
}

/// Pending calls keyed by caller-chosen event id.
///
/// At most one live call per id; a second registration against a live id is
/// a caller error and is rejected rather than silently overwriting the
/// first caller's sink.
#[derive(Default)]
pub struct Registry {
  calls: HashMap<String, PendingCall>,
}

impl Registry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, call: PendingCall) -> Result<()> {
    if self.calls.contains_key(&call.event_id) {
      return Err(Error::DuplicateEventId(call.event_id.clone()));
    }
    self.calls.insert(call.event_id.clone(), call);
    Ok(())
  }

  /// Remove and return the call for `event_id`.
  pub fn resolve(&mut self, event_id: &str) -> Result<PendingCall> {
    self
      .calls
      .remove(event_id)
      .ok_or_else(|| Error::UnknownEventId(event_id.to_string()))
  }

  pub fn len(&self) -> usize {
    self.calls.len()
  }

  pub fn is_empty(&self) -> bool {
    self.calls.is_empty()
  }
}
