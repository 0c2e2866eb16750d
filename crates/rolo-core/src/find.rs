//! Find-request shapes: what the caller supplies and what the native `find`
//! verb receives.

use serde::{Deserialize, Serialize};

use crate::{account::Account, field::FilterClause};

// ─── Caller side ─────────────────────────────────────────────────────────────

/// The caller's find options as decoded from the request arguments: a single
/// filter value applied across the requested fields, plus account selectors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
  pub filter:           Option<String>,
  pub include_accounts: Vec<Account>,
  pub exclude_accounts: Vec<Account>,
}

// ─── Native side ─────────────────────────────────────────────────────────────

/// Expanded filter clauses plus resolved account include/exclude lists.
///
/// Invariant: include and exclude never name the same account; the
/// validation gate rejects such requests before dispatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindFilter {
  #[serde(default)]
  pub filter:           Vec<FilterClause>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub include_accounts: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub exclude_accounts: Vec<String>,
}

/// The full `find` argument payload sent to the native engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindOptions {
  #[serde(rename = "_eventId")]
  pub event_id: String,
  pub fields:   Vec<String>,
  pub options:  FindFilter,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::field::{FilterClause, SearchField};

  #[test]
  fn find_options_serialize_to_the_native_shape() {
    let options = FindOptions {
      event_id: "cb1".into(),
      fields:   vec!["emails".into()],
      options:  FindFilter {
        filter:           vec![FilterClause::new(SearchField::Email, "a@b")],
        include_accounts: vec!["3".into()],
        exclude_accounts: Vec::new(),
      },
    };
    let json = serde_json::to_value(&options).unwrap();
    assert_eq!(json["_eventId"], "cb1");
    assert_eq!(json["fields"][0], "emails");
    assert_eq!(json["options"]["filter"][0]["fieldName"], 4);
    assert_eq!(json["options"]["includeAccounts"][0], "3");
    assert!(json["options"].get("excludeAccounts").is_none());
  }
}
