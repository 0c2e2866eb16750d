//! Contact attribute types — the abstract record exchanged with the native
//! store.
//!
//! Field names follow the caller-facing camelCase wire form. One struct
//! serves both directions: it is decoded from the caller's arguments on
//! save, mutated in place by normalization, and serialized toward the native
//! engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ─── Ids ─────────────────────────────────────────────────────────────────────

/// A contact id as it appears on the wire.
///
/// Callers send ids as strings (or omit them for new contacts); the native
/// store only understands integers. Normalization upgrades `Raw` to
/// `Resolved` before dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactId {
  /// Numeric id understood by the native store.
  Resolved(i64),
  /// Unparsed id as received from the caller.
  Raw(String),
}

// ─── Sub-lists ───────────────────────────────────────────────────────────────

/// A `{type, value}` entry in a typed sub-list (phone numbers, emails,
/// instant-message handles, urls, photos).
///
/// An empty `value` means the entry carries nothing; normalization drops
/// such entries rather than sending them to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedField {
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub kind:  Option<String>,
  #[serde(default)]
  pub value: String,
}

impl TypedField {
  pub fn new(kind: Option<&str>, value: impl Into<String>) -> Self {
    Self {
      kind:  kind.map(str::to_owned),
      value: value.into(),
    }
  }
}

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub kind:           Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub street_address: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub locality:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub region:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub postal_code:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub country:        Option<String>,
}

/// An organization membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub department: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title:      Option<String>,
}

// ─── Contact record ──────────────────────────────────────────────────────────

/// The abstract contact record.
///
/// `birthday` holds whichever encoding the current direction calls for: an
/// ISO day string from the caller, a native day-string toward the engine.
/// Read results carry it as epoch milliseconds, rewritten on the raw payload
/// by the response decoders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAttributes {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:            Option<ContactId>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub display_name:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub nickname:      Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub phone_numbers: Vec<TypedField>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub emails:        Vec<TypedField>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub addresses:     Vec<Address>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub ims:           Vec<TypedField>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub organizations: Vec<Organization>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub birthday:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub note:          Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub photos:        Vec<TypedField>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub categories:    Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub urls:          Vec<TypedField>,
  /// Wire keys this bridge does not model, carried through untouched.
  #[serde(flatten)]
  pub extra:         BTreeMap<String, serde_json::Value>,
}
