//! Filter translation — abstract field names to native search-filter
//! clauses.
//!
//! The native engine can only search a fixed subset of the abstract fields.
//! Fields outside that subset expand to zero clauses; that partial support
//! is deliberate store policy, not an error.

use rolo_core::field::{FilterClause, SearchField};

/// Expand one abstract field into its native clauses.
///
/// `"displayName"` and `"name"` search both name columns, so they expand to
/// two clauses carrying the same value. Unsupported fields (`nickname`,
/// `addresses`, `ims`, `birthday`, `note`, `photos`, `categories`, `urls`)
/// and unknown names expand to nothing.
pub fn translate(field: &str, value: &str) -> Vec<FilterClause> {
  match field {
    "displayName" | "name" => vec![
      FilterClause::new(SearchField::GivenName, value),
      FilterClause::new(SearchField::FamilyName, value),
    ],
    "phoneNumbers" => vec![FilterClause::new(SearchField::Phone, value)],
    "emails" => vec![FilterClause::new(SearchField::Email, value)],
    "organizations" => {
      vec![FilterClause::new(SearchField::OrganizationName, value)]
    }
    _ => Vec::new(),
  }
}

/// Expand every field in order, applying the same value to each expansion.
/// Field order is preserved, then per-field clause order.
pub fn translate_all(fields: &[String], value: &str) -> Vec<FilterClause> {
  fields
    .iter()
    .flat_map(|field| translate(field, value))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  const UNSUPPORTED: &[&str] = &[
    "nickname",
    "addresses",
    "ims",
    "birthday",
    "note",
    "photos",
    "categories",
    "urls",
  ];

  #[test]
  fn name_fields_expand_to_both_name_columns() {
    for field in ["displayName", "name"] {
      let clauses = translate(field, "Jane");
      assert_eq!(clauses.len(), 2, "{field}");
      assert_eq!(clauses[0].field_name, SearchField::GivenName);
      assert_eq!(clauses[1].field_name, SearchField::FamilyName);
      assert!(clauses.iter().all(|c| c.field_value == "Jane"));
    }
  }

  #[test]
  fn single_clause_fields_map_directly() {
    let cases = [
      ("phoneNumbers", SearchField::Phone),
      ("emails", SearchField::Email),
      ("organizations", SearchField::OrganizationName),
    ];
    for (field, expected) in cases {
      let clauses = translate(field, "x");
      assert_eq!(clauses.len(), 1, "{field}");
      assert_eq!(clauses[0].field_name, expected);
    }
  }

  #[test]
  fn unsupported_and_unknown_fields_expand_to_nothing() {
    for field in UNSUPPORTED {
      assert!(translate(field, "x").is_empty(), "{field}");
    }
    assert!(translate("bbmPin", "x").is_empty());
  }

  #[test]
  fn translate_all_preserves_field_then_clause_order() {
    let fields: Vec<String> = ["emails", "nickname", "displayName"]
      .iter()
      .map(|s| s.to_string())
      .collect();
    let clauses = translate_all(&fields, "Jane");
    let kinds: Vec<SearchField> =
      clauses.iter().map(|c| c.field_name).collect();
    assert_eq!(
      kinds,
      vec![
        SearchField::Email,
        SearchField::GivenName,
        SearchField::FamilyName
      ]
    );
  }
}
