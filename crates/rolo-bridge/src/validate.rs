//! Structural validation of a find request.
//!
//! The gate runs after filter expansion and before dispatch; a rejection
//! short-circuits the request with no native call.

use rolo_core::find::FindOptions;

/// Accept or reject an expanded find request.
///
/// `filter_requested` says whether the caller supplied a filter value at
/// all — a request with a filter but no fields to apply it to is malformed,
/// while an empty clause list by itself is just an unfiltered listing.
/// Clauses must carry a non-empty value, and the account include/exclude
/// lists must not name the same account.
pub fn validate_find(options: &FindOptions, filter_requested: bool) -> bool {
  if filter_requested && options.fields.is_empty() {
    return false;
  }
  if options
    .options
    .filter
    .iter()
    .any(|clause| clause.field_value.is_empty())
  {
    return false;
  }
  let excluded = &options.options.exclude_accounts;
  if options
    .options
    .include_accounts
    .iter()
    .any(|id| excluded.contains(id))
  {
    return false;
  }
  true
}

#[cfg(test)]
mod tests {
  use rolo_core::{
    field::{FilterClause, SearchField},
    find::{FindFilter, FindOptions},
  };

  use super::*;

  fn options() -> FindOptions {
    FindOptions {
      event_id: "e1".into(),
      fields:   vec!["emails".into()],
      options:  FindFilter::default(),
    }
  }

  #[test]
  fn unfiltered_listing_passes() {
    assert!(validate_find(&options(), false));
  }

  #[test]
  fn filter_without_fields_is_rejected() {
    let mut opts = options();
    opts.fields.clear();
    assert!(validate_find(&opts, false));
    assert!(!validate_find(&opts, true));
  }

  #[test]
  fn empty_clause_values_are_rejected() {
    let mut opts = options();
    opts.options.filter = vec![FilterClause::new(SearchField::Email, "")];
    assert!(!validate_find(&opts, true));
  }

  #[test]
  fn overlapping_account_lists_are_rejected() {
    let mut opts = options();
    opts.options.include_accounts = vec!["1".into(), "2".into()];
    opts.options.exclude_accounts = vec!["2".into()];
    assert!(!validate_find(&opts, false));

    opts.options.exclude_accounts = vec!["3".into()];
    assert!(validate_find(&opts, false));
  }
}
