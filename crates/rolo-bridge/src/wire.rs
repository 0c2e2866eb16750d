//! The string boundary protocol: request arguments, outbound commands, and
//! inbound events.
//!
//! The formats are kept verbatim at the boundary for compatibility —
//! commands are `"<verb> <json>"`, events are `"<kind> <eventId> <payload>"`
//! — but both are parsed into typed values before anything handles them.

use std::collections::BTreeMap;

use percent_encoding::{
  AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

// ─── Payload escaping ────────────────────────────────────────────────────────

/// Everything outside `A-Za-z0-9 @ * _ + - . /` is percent-escaped, matching
/// the escaping the delivery layer applies to event payloads.
const PAYLOAD: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'@')
  .remove(b'*')
  .remove(b'_')
  .remove(b'+')
  .remove(b'-')
  .remove(b'.')
  .remove(b'/');

pub fn escape(raw: &str) -> String {
  utf8_percent_encode(raw, PAYLOAD).to_string()
}

pub fn unescape(escaped: &str) -> String {
  percent_decode_str(escaped).decode_utf8_lossy().into_owned()
}

// ─── Request arguments ───────────────────────────────────────────────────────

/// The argument map handed to a request handler.
///
/// Keys are positional (`"0"`, `"1"`, …) or named; every value is a
/// URI-encoded, JSON-encoded string decoded independently. `callbackId`
/// carries the caller's correlation id.
#[derive(Debug, Clone, Default)]
pub struct RequestArgs(BTreeMap<String, String>);

impl RequestArgs {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert an already-encoded value.
  pub fn insert_raw(&mut self, key: impl Into<String>, raw: impl Into<String>) {
    self.0.insert(key.into(), raw.into());
  }

  /// Encode `value` (JSON then percent-escape) and insert it under `key`.
  pub fn insert_encoded(&mut self, key: impl Into<String>, value: &Value) {
    self.0.insert(key.into(), escape(&value.to_string()));
  }

  /// Unescape and JSON-parse the value under `key`.
  pub fn decode<T: DeserializeOwned>(&self, key: &'static str) -> Result<T> {
    let raw = self.0.get(key).ok_or(Error::MissingArgument(key))?;
    serde_json::from_str(&unescape(raw)).map_err(|source| Error::BadArgument {
      key: key.to_string(),
      source,
    })
  }

  /// The caller's correlation id from the `callbackId` argument.
  pub fn event_id(&self) -> Result<String> {
    self.decode("callbackId")
  }
}

// ─── Outbound commands ───────────────────────────────────────────────────────

/// Verbs understood by the native engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
  Find,
  Save,
  Remove,
  GetContact,
  GetContactAccounts,
}

impl Verb {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Find => "find",
      Self::Save => "save",
      Self::Remove => "remove",
      Self::GetContact => "getContact",
      Self::GetContactAccounts => "getContactAccounts",
    }
  }
}

/// An outbound command: a verb plus its JSON-encoded arguments.
#[derive(Debug, Clone)]
pub struct Command {
  pub verb: Verb,
  pub args: Option<Value>,
}

impl Command {
  pub fn new(verb: Verb, args: Value) -> Self {
    Self {
      verb,
      args: Some(args),
    }
  }

  /// A command with no arguments (`getContactAccounts`).
  pub fn bare(verb: Verb) -> Self {
    Self { verb, args: None }
  }
}

impl std::fmt::Display for Command {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match &self.args {
      Some(args) => write!(f, "{} {}", self.verb.as_str(), args),
      None => f.write_str(self.verb.as_str()),
    }
  }
}

// ─── Inbound events ──────────────────────────────────────────────────────────

/// An inbound native event, parsed from `"<kind> <eventId> <payload...>"`.
///
/// The payload may itself contain spaces; everything after the second space
/// is kept as a single escaped-JSON string, never truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeEvent {
  pub kind:     String,
  pub event_id: String,
  /// Still escaped; see [`NativeEvent::decode_payload`].
  pub payload:  String,
}

impl NativeEvent {
  pub fn parse(line: &str) -> Result<Self> {
    let mut parts = line.splitn(3, ' ');
    let kind = parts
      .next()
      .filter(|s| !s.is_empty())
      .ok_or_else(|| Error::MalformedEvent(line.to_string()))?;
    let event_id = parts
      .next()
      .filter(|s| !s.is_empty())
      .ok_or_else(|| Error::MalformedEvent(line.to_string()))?;
    let payload = parts.next().unwrap_or("");
    Ok(Self {
      kind:     kind.to_string(),
      event_id: event_id.to_string(),
      payload:  payload.to_string(),
    })
  }

  /// Completion events carry the kind `"result"`; anything else is reserved.
  pub fn is_result(&self) -> bool {
    self.kind == "result"
  }

  /// Unescape and JSON-parse the payload.
  pub fn decode_payload(&self) -> Result<Value> {
    Ok(serde_json::from_str(&unescape(&self.payload))?)
  }
}
