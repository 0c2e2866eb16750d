//! Handler for the `remove` operation.

use std::sync::Arc;

use rolo_core::{contact::ContactId, error::ErrorCode};

use crate::{
  error::Result,
  gateway::Gateway,
  handlers::fail,
  normalize,
  sink::ResultSink,
  wire::RequestArgs,
};

/// Remove a contact by id.
///
/// A non-numeric id fails immediately with an unknown-error payload and no
/// native call. There is no response decoding: the native payload is
/// delivered to the sink as-is.
pub fn remove(gateway: &Gateway, args: &RequestArgs, sink: Arc<dyn ResultSink>) {
  let (event_id, id) = match decode(args) {
    Ok(decoded) => decoded,
    Err(error) => {
      tracing::warn!(%error, "malformed remove request");
      fail(sink.as_ref(), ErrorCode::InvalidArgument);
      return;
    }
  };

  let contact_id = match normalize::normalize_id(&id) {
    Ok(contact_id) => contact_id,
    Err(error) => {
      tracing::warn!(%error, "remove with non-numeric id");
      fail(sink.as_ref(), ErrorCode::Unknown);
      return;
    }
  };

  match gateway.remove(&event_id, contact_id, Arc::clone(&sink)) {
    Ok(()) => sink.no_result(true),
    Err(error) => {
      tracing::error!(%error, "remove dispatch failed");
      fail(sink.as_ref(), ErrorCode::Unknown);
    }
  }
}

fn decode(args: &RequestArgs) -> Result<(String, ContactId)> {
  let event_id = args.event_id()?;
  let id: ContactId = args.decode("0")?;
  Ok((event_id, id))
}
