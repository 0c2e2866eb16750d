//! Native search fields and filter clauses.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// A field the native engine can search on.
///
/// The discriminants are part of the native wire contract and must not be
/// reordered. The engine knows more fields than the abstract API exposes
/// (BBM pin, social handles, video chat); those stay unmapped.
#[repr(u8)]
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr,
)]
pub enum SearchField {
  GivenName        = 0,
  FamilyName       = 1,
  OrganizationName = 2,
  Phone            = 3,
  Email            = 4,
}

/// One native search-filter clause: a field to search and the value to
/// match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
  pub field_name:  SearchField,
  pub field_value: String,
}

impl FilterClause {
  pub fn new(field_name: SearchField, field_value: impl Into<String>) -> Self {
    Self {
      field_name,
      field_value: field_value.into(),
    }
  }
}
