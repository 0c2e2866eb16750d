//! Handler for the `save` operation.

use std::sync::Arc;

use serde_json::Value;

use rolo_core::{
  contact::{ContactAttributes, ContactId},
  error::ErrorCode,
};

use crate::{
  error::Result,
  gateway::Gateway,
  handlers::{fail, failure_code, renormalize_birthday, succeeded},
  normalize,
  sink::ResultSink,
  wire::RequestArgs,
};

/// Save (create or update) a contact.
///
/// Normalizes the attributes for the native engine — birthday to the native
/// day-string, emails to typed entries, id to an integer — then dispatches.
/// The echoed record arrives later through the sink.
pub fn save(gateway: &Gateway, args: &RequestArgs, sink: Arc<dyn ResultSink>) {
  let (event_id, mut attributes) = match decode(args) {
    Ok(decoded) => decoded,
    Err(error) => {
      tracing::warn!(%error, "malformed save request");
      fail(sink.as_ref(), ErrorCode::InvalidArgument);
      return;
    }
  };

  attributes.birthday =
    normalize::to_native_birthday(attributes.birthday.as_deref());
  if !attributes.emails.is_empty() {
    attributes.emails = normalize::normalize_emails(&attributes.emails);
  }
  if let Some(id) = &attributes.id {
    match normalize::normalize_id(id) {
      Ok(resolved) => attributes.id = Some(ContactId::Resolved(resolved)),
      Err(error) => {
        tracing::warn!(%error, "save with non-numeric id");
        fail(sink.as_ref(), ErrorCode::InvalidArgument);
        return;
      }
    }
  }

  match gateway.save(&event_id, &attributes, Arc::clone(&sink), save_response) {
    Ok(()) => sink.no_result(true),
    Err(error) => {
      tracing::error!(%error, "save dispatch failed");
      fail(sink.as_ref(), ErrorCode::Unknown);
    }
  }
}

fn decode(args: &RequestArgs) -> Result<(String, ContactAttributes)> {
  let event_id = args.event_id()?;
  let attributes: ContactAttributes = args.decode("0")?;
  Ok((event_id, attributes))
}

/// Post-process a native save response: renormalize the echoed record's
/// birthday before delivering it.
pub(crate) fn save_response(sink: &dyn ResultSink, mut payload: Value) {
  if succeeded(&payload) {
    renormalize_birthday(&mut payload);
    sink.callback_ok(payload, false);
  } else {
    sink.callback_error(failure_code(&payload), false);
  }
}
