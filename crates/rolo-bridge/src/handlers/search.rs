//! Handler for the `search` operation.

use std::sync::Arc;

use serde_json::Value;

use rolo_core::{
  error::ErrorCode,
  find::{FindFilter, FindOptions, SearchOptions},
};

use crate::{
  error::Result,
  filter,
  gateway::Gateway,
  handlers::{fail, failure_code, renormalize_birthday, succeeded},
  normalize,
  sink::ResultSink,
  validate,
  wire::RequestArgs,
};

/// Search the native store.
///
/// Expands the filter for every requested field against the single supplied
/// value, resolves account selectors, validates, and dispatches. The
/// contacts array arrives later through the sink; this function only
/// reports synchronous failures.
pub fn search(gateway: &Gateway, args: &RequestArgs, sink: Arc<dyn ResultSink>) {
  let (event_id, fields, caller) = match decode(args) {
    Ok(decoded) => decoded,
    Err(error) => {
      tracing::warn!(%error, "malformed search request");
      fail(sink.as_ref(), ErrorCode::InvalidArgument);
      return;
    }
  };

  let filter_requested = caller.filter.is_some();
  let mut options = FindOptions {
    event_id,
    fields,
    options: FindFilter::default(),
  };
  if let Some(value) = caller.filter.as_deref() {
    options.options.filter = filter::translate_all(&options.fields, value);
  }
  options.options.include_accounts =
    normalize::resolve_account_ids(&caller.include_accounts);
  options.options.exclude_accounts =
    normalize::resolve_account_ids(&caller.exclude_accounts);

  if !validate::validate_find(&options, filter_requested) {
    fail(sink.as_ref(), ErrorCode::InvalidArgument);
    return;
  }

  match gateway.find(&options, Arc::clone(&sink), find_response) {
    Ok(()) => sink.no_result(true),
    Err(error) => {
      tracing::error!(%error, "search dispatch failed");
      fail(sink.as_ref(), ErrorCode::Unknown);
    }
  }
}

fn decode(args: &RequestArgs) -> Result<(String, Vec<String>, SearchOptions)> {
  let event_id = args.event_id()?;
  let fields: Vec<String> = args.decode("0")?;
  let caller: SearchOptions = args.decode("1")?;
  Ok((event_id, fields, caller))
}

/// Post-process a native find response: renormalize every contact's
/// birthday to epoch milliseconds, then deliver the contacts array.
pub(crate) fn find_response(sink: &dyn ResultSink, mut payload: Value) {
  if !succeeded(&payload) {
    sink.callback_error(failure_code(&payload), false);
    return;
  }
  let mut contacts = match payload.get_mut("contacts").map(Value::take) {
    Some(Value::Array(contacts)) => contacts,
    _ => Vec::new(),
  };
  for contact in &mut contacts {
    renormalize_birthday(contact);
  }
  sink.callback_ok(Value::Array(contacts), false);
}
