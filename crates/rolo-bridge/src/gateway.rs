//! The native gateway — owner of the single connection to the native
//! contact engine.
//!
//! Commands go out as opaque `"<verb> <json>"` strings; completions come
//! back as raw event lines through [`Gateway::on_event`] and are routed to
//! the pending caller. Handle acquisition is lazy and memoized: the first
//! operation acquires the native object, and an acquisition failure is a
//! fatal configuration error reported by every subsequent operation, not
//! retried per call.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use serde::Deserialize;
use serde_json::{Value, json};

use rolo_core::{
  account::Account, contact::ContactAttributes, error::ErrorCode,
  find::FindOptions,
};

use crate::{
  error::{Error, Result},
  registry::{Action, PendingCall, Registry, ResponseDecoder},
  sink::ResultSink,
  wire::{Command, NativeEvent, Verb},
};

// ─── Channel seam ────────────────────────────────────────────────────────────

/// The black-box RPC channel into native code.
///
/// `acquire` performs one-time native-handle acquisition and returns the
/// handle id, or `None` when the native module is unavailable. `invoke`
/// issues a command string against an acquired handle and returns the raw
/// string reply — empty for asynchronous verbs, whose results arrive later
/// as event lines the host feeds to [`Gateway::on_event`].
pub trait NativeChannel: Send + Sync {
  fn acquire(&self, config: &GatewayConfig) -> Option<String>;
  fn invoke(&self, handle: &str, command: &str) -> String;
}

/// Names the native module the gateway binds to. Deserializable so hosts
/// can populate it from their configuration source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
  /// Shared library providing the contact engine.
  pub library: String,
  /// Object class instantiated inside the library.
  pub object:  String,
}

impl Default for GatewayConfig {
  fn default() -> Self {
    Self {
      library: "libpimcontacts".to_string(),
      object:  "libpimcontacts.PimContacts".to_string(),
    }
  }
}

// ─── Gateway ─────────────────────────────────────────────────────────────────

pub struct Gateway {
  channel:  Box<dyn NativeChannel>,
  config:   GatewayConfig,
  handle:   OnceLock<Option<String>>,
  registry: Mutex<Registry>,
}

impl Gateway {
  pub fn new(channel: Box<dyn NativeChannel>, config: GatewayConfig) -> Self {
    Self {
      channel,
      config,
      handle: OnceLock::new(),
      registry: Mutex::new(Registry::new()),
    }
  }

  /// The memoized native handle. The first call acquires; a failed
  /// acquisition is remembered and reported by every later call.
  fn handle(&self) -> Result<&str> {
    self
      .handle
      .get_or_init(|| {
        let acquired = self.channel.acquire(&self.config);
        if acquired.is_none() {
          tracing::error!(
            library = %self.config.library,
            object = %self.config.object,
            "native handle acquisition failed"
          );
        }
        acquired
      })
      .as_deref()
      .ok_or_else(|| {
        Error::Uninitialized(format!(
          "{}.{}",
          self.config.library, self.config.object
        ))
      })
  }

  fn registry(&self) -> std::sync::MutexGuard<'_, Registry> {
    self.registry.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Number of in-flight calls. Calls whose completion event never arrives
  /// stay counted here forever; there is no timeout.
  pub fn pending(&self) -> usize {
    self.registry().len()
  }

  // ── Asynchronous operations ────────────────────────────────────────────

  /// Dispatch a find. The result arrives later through `sink`, shaped by
  /// `decoder`.
  pub fn find(
    &self,
    options: &FindOptions,
    sink: Arc<dyn ResultSink>,
    decoder: ResponseDecoder,
  ) -> Result<()> {
    self.dispatch(
      Verb::Find,
      &options.event_id,
      serde_json::to_value(options)?,
      sink,
      Action::Find,
      Some(decoder),
    )
  }

  /// Dispatch a save of already-normalized attributes.
  pub fn save(
    &self,
    event_id: &str,
    attributes: &ContactAttributes,
    sink: Arc<dyn ResultSink>,
    decoder: ResponseDecoder,
  ) -> Result<()> {
    let mut args = serde_json::to_value(attributes)?;
    if let Some(object) = args.as_object_mut() {
      object.insert("_eventId".to_string(), Value::from(event_id));
    }
    self.dispatch(Verb::Save, event_id, args, sink, Action::Save, Some(decoder))
  }

  /// Dispatch a removal. The native payload is delivered to the sink as-is;
  /// removal has no shape to normalize.
  pub fn remove(
    &self,
    event_id: &str,
    contact_id: i64,
    sink: Arc<dyn ResultSink>,
  ) -> Result<()> {
    let args = json!({ "contactId": contact_id, "_eventId": event_id });
    self.dispatch(Verb::Remove, event_id, args, sink, Action::Remove, None)
  }

  fn dispatch(
    &self,
    verb: Verb,
    event_id: &str,
    args: Value,
    sink: Arc<dyn ResultSink>,
    action: Action,
    decoder: Option<ResponseDecoder>,
  ) -> Result<()> {
    let handle = self.handle()?;
    self.registry().register(PendingCall {
      event_id: event_id.to_string(),
      sink,
      action,
      decoder,
    })?;
    self
      .channel
      .invoke(handle, &Command::new(verb, args).to_string());
    tracing::debug!(verb = verb.as_str(), event_id, "dispatched");
    Ok(())
  }

  // ── Synchronous operations ─────────────────────────────────────────────

  /// Fetch a single contact synchronously; no registry involvement.
  pub fn get_contact(&self, contact_id: i64) -> Result<ContactAttributes> {
    let handle = self.handle()?;
    let command = Command::new(Verb::GetContact, json!({ "contactId": contact_id }));
    let reply = self.channel.invoke(handle, &command.to_string());
    Ok(serde_json::from_str(&reply)?)
  }

  /// List the native engine's contact accounts.
  pub fn get_contact_accounts(&self) -> Result<Vec<Account>> {
    let handle = self.handle()?;
    let reply = self
      .channel
      .invoke(handle, &Command::bare(Verb::GetContactAccounts).to_string());
    Ok(serde_json::from_str(&reply)?)
  }

  // ── Inbound events ─────────────────────────────────────────────────────

  /// Entry point for inbound native event lines.
  ///
  /// Malformed lines, non-`result` kinds, and events with no pending call
  /// are logged and dropped; this path never panics, so one bad event
  /// cannot affect other pending calls. A matched call whose payload fails
  /// to decode is answered with an error rather than dropped — the caller
  /// is still owed an outcome.
  pub fn on_event(&self, line: &str) {
    let event = match NativeEvent::parse(line) {
      Ok(event) => event,
      Err(error) => {
        tracing::warn!(%error, "dropping malformed native event");
        return;
      }
    };
    if !event.is_result() {
      tracing::debug!(kind = %event.kind, "ignoring non-result native event");
      return;
    }

    let call = match self.registry().resolve(&event.event_id) {
      Ok(call) => call,
      Err(error) => {
        tracing::warn!(%error, "dropping native event with no pending call");
        return;
      }
    };

    let payload = match event.decode_payload() {
      Ok(payload) => payload,
      Err(error) => {
        tracing::warn!(
          event_id = %event.event_id,
          action = call.action.as_str(),
          %error,
          "undecodable native payload"
        );
        call.sink.callback_error(json!(ErrorCode::Unknown), false);
        return;
      }
    };

    match call.decoder {
      Some(decode) => decode(call.sink.as_ref(), payload),
      None => call.sink.callback_ok(payload, false),
    }
  }
}

// ─── Process-scoped instance ─────────────────────────────────────────────────

static GATEWAY: OnceLock<Gateway> = OnceLock::new();

/// Install the process-wide gateway. The first call wins; later calls
/// return the already-installed instance unchanged.
pub fn install(
  channel: Box<dyn NativeChannel>,
  config: GatewayConfig,
) -> &'static Gateway {
  GATEWAY.get_or_init(|| Gateway::new(channel, config))
}

/// The installed process-wide gateway, if any.
pub fn instance() -> Option<&'static Gateway> {
  GATEWAY.get()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::{
    test_helpers::{MockChannel, RecordingSink, SinkCall},
    wire::escape,
  };

  fn gateway(channel: &Arc<MockChannel>) -> Gateway {
    Gateway::new(Box::new(Arc::clone(channel)), GatewayConfig::default())
  }

  #[test]
  fn acquisition_failure_is_memoized_and_fatal() {
    let channel = MockChannel::unavailable();
    let gw = gateway(&channel);

    assert!(matches!(gw.get_contact(1), Err(Error::Uninitialized(_))));
    assert!(matches!(
      gw.get_contact_accounts(),
      Err(Error::Uninitialized(_))
    ));
    // One acquisition attempt, remembered thereafter.
    assert_eq!(channel.acquire_attempts(), 1);
  }

  #[test]
  fn remove_completion_is_delivered_directly() {
    let channel = MockChannel::new();
    let gw = gateway(&channel);
    let sink = RecordingSink::new();

    gw.remove("e1", 7, sink.clone()).unwrap();
    let commands = channel.commands();
    let (verb, args) = commands[0].split_once(' ').unwrap();
    assert_eq!(verb, "remove");
    assert_eq!(
      serde_json::from_str::<Value>(args).unwrap(),
      json!({ "contactId": 7, "_eventId": "e1" })
    );

    let body = json!({ "_success": true, "id": 7 });
    gw.on_event(&format!("result e1 {}", escape(&body.to_string())));
    assert_eq!(sink.calls(), vec![SinkCall::Ok(body, false)]);
    assert_eq!(gw.pending(), 0);
  }

  #[test]
  fn undecodable_payload_for_a_matched_call_answers_with_an_error() {
    let channel = MockChannel::new();
    let gw = gateway(&channel);
    let sink = RecordingSink::new();

    gw.remove("e1", 7, sink.clone()).unwrap();
    gw.on_event("result e1 %7Bnot-json");
    assert_eq!(sink.calls(), vec![SinkCall::Error(json!(0), false)]);
  }

  #[test]
  fn non_result_events_are_ignored() {
    let channel = MockChannel::new();
    let gw = gateway(&channel);
    let sink = RecordingSink::new();

    gw.remove("e1", 7, sink.clone()).unwrap();
    gw.on_event("progress e1 50");
    assert!(sink.calls().is_empty());
    assert_eq!(gw.pending(), 1);
  }

  #[test]
  fn get_contact_parses_the_synchronous_reply() {
    let channel = MockChannel::new();
    channel.push_reply(r#"{"id":7,"displayName":"Jane Doe"}"#);
    let gw = gateway(&channel);

    let contact = gw.get_contact(7).unwrap();
    assert_eq!(contact.display_name.as_deref(), Some("Jane Doe"));
    assert_eq!(
      channel.commands(),
      vec![r#"getContact {"contactId":7}"#.to_string()]
    );
  }

  #[test]
  fn process_scoped_install_is_memoized() {
    let channel = MockChannel::new();
    let installed =
      install(Box::new(Arc::clone(&channel)), GatewayConfig::default());
    let again =
      install(Box::new(Arc::clone(&channel)), GatewayConfig::default());
    assert!(std::ptr::eq(installed, again));
    assert!(instance().is_some());
  }

  #[test]
  fn get_contact_accounts_parses_the_account_list() {
    let channel = MockChannel::new();
    channel.push_reply(r#"[{"id":1,"name":"local"},{"id":2}]"#);
    let gw = gateway(&channel);

    let accounts = gw.get_contact_accounts().unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].name.as_deref(), Some("local"));
  }
}
