//! Contact accounts — the storage sources known to the native engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An account id. The native engine reports numeric ids, but callers may
/// echo them back as text; native filters always carry the string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountId {
  Number(i64),
  Text(String),
}

impl fmt::Display for AccountId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Number(n) => write!(f, "{n}"),
      Self::Text(t) => f.write_str(t),
    }
  }
}

/// A storage account known to the native engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
  pub id:   AccountId,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn account_id_decodes_from_number_or_text() {
    let n: AccountId = serde_json::from_str("7").unwrap();
    assert_eq!(n, AccountId::Number(7));
    assert_eq!(n.to_string(), "7");

    let t: AccountId = serde_json::from_str("\"7\"").unwrap();
    assert_eq!(t, AccountId::Text("7".into()));
    assert_eq!(t.to_string(), "7");
  }
}
