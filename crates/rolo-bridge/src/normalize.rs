//! Value normalization between the caller wire format and the native format.
//!
//! Birthdays are day-granularity by design: the wire carries an ISO date
//! string, the native store a day-string, and read results epoch
//! milliseconds at local midnight. Anything below day granularity is lost on
//! the way through.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use rolo_core::{
  account::Account,
  contact::{ContactId, TypedField},
};

use crate::error::{Error, Result};

/// Day-string format the native engine expects on save, e.g.
/// `"Sun May 20 1990"`.
const NATIVE_DAY_FORMAT: &str = "%a %b %d %Y";

// ─── Birthdays ───────────────────────────────────────────────────────────────

/// Wire → native birthday.
///
/// Accepts an ISO calendar date, tolerating a full RFC 3339 timestamp by
/// taking its date part. `None` and unparseable input yield `None`.
pub fn to_native_birthday(wire: Option<&str>) -> Option<String> {
  parse_day(wire?).map(|day| day.format(NATIVE_DAY_FORMAT).to_string())
}

/// Native → wire birthday: a `"YYYY-MM-DD"` day-string becomes epoch
/// milliseconds at local midnight.
///
/// Also accepts the verbose native day-string, so a value written through
/// [`to_native_birthday`] reads back as the same calendar day. `None` and
/// unparseable input yield `None`.
pub fn from_native_birthday(native: Option<&str>) -> Option<i64> {
  local_midnight_ms(parse_day(native?)?)
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .or_else(|_| NaiveDate::parse_from_str(raw, NATIVE_DAY_FORMAT))
    .ok()
    .or_else(|| {
      DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|instant| instant.date_naive())
    })
}

/// Epoch milliseconds for local midnight on `day`. When midnight does not
/// exist or is ambiguous in the local zone, the earlier valid instant wins.
fn local_midnight_ms(day: NaiveDate) -> Option<i64> {
  let midnight = day.and_hms_opt(0, 0, 0)?;
  Local
    .from_local_datetime(&midnight)
    .earliest()
    .map(|instant| instant.timestamp_millis())
}

// ─── Typed sub-lists ─────────────────────────────────────────────────────────

/// Native email list from the caller's list.
///
/// Entries with a non-empty value are kept, defaulting a missing type to
/// `"home"`; valueless entries are dropped silently. Applying this to its
/// own output is a no-op.
pub fn normalize_emails(emails: &[TypedField]) -> Vec<TypedField> {
  emails
    .iter()
    .filter(|email| !email.value.is_empty())
    .map(|email| TypedField {
      kind:  email.kind.clone().or_else(|| Some("home".to_string())),
      value: email.value.clone(),
    })
    .collect()
}

// ─── Ids ─────────────────────────────────────────────────────────────────────

/// Resolve a wire contact id to the native integer form.
pub fn normalize_id(id: &ContactId) -> Result<i64> {
  match id {
    ContactId::Resolved(n) => Ok(*n),
    ContactId::Raw(s) => s
      .trim()
      .parse::<i64>()
      .map_err(|_| Error::NonNumericId(s.clone())),
  }
}

// ─── Accounts ────────────────────────────────────────────────────────────────

/// Resolve account selectors to the string ids the native filter expects.
pub fn resolve_account_ids(accounts: &[Account]) -> Vec<String> {
  accounts
    .iter()
    .map(|account| account.id.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
  use rolo_core::account::AccountId;

  use super::*;

  #[test]
  fn birthday_survives_a_wire_native_wire_pass_at_day_granularity() {
    let native = to_native_birthday(Some("1990-05-20")).unwrap();
    assert_eq!(native, "Sun May 20 1990");

    let ms = from_native_birthday(Some(&native)).unwrap();
    let day = Local.timestamp_millis_opt(ms).single().unwrap().date_naive();
    assert_eq!(day, NaiveDate::from_ymd_opt(1990, 5, 20).unwrap());
  }

  #[test]
  fn absent_birthdays_pass_through_as_none() {
    assert_eq!(to_native_birthday(None), None);
    assert_eq!(from_native_birthday(None), None);
    assert_eq!(to_native_birthday(Some("not a date")), None);
    assert_eq!(from_native_birthday(Some("not a date")), None);
  }

  #[test]
  fn native_day_string_becomes_local_midnight_ms() {
    let ms = from_native_birthday(Some("1990-05-20")).unwrap();
    let instant = Local.timestamp_millis_opt(ms).single().unwrap();
    assert_eq!(
      instant.date_naive(),
      NaiveDate::from_ymd_opt(1990, 5, 20).unwrap()
    );
    assert_eq!(instant.time(), chrono::NaiveTime::MIN);
  }

  #[test]
  fn rfc3339_timestamps_are_truncated_to_their_date() {
    let native = to_native_birthday(Some("1990-05-20T15:30:00+02:00"));
    assert_eq!(native.as_deref(), Some("Sun May 20 1990"));
  }

  #[test]
  fn emails_default_type_and_drop_valueless_entries() {
    let input = vec![
      TypedField::new(None, "a@b.com"),
      TypedField::new(Some("work"), "c@d.com"),
      TypedField::new(Some("home"), ""),
    ];
    let normalized = normalize_emails(&input);
    assert_eq!(
      normalized,
      vec![
        TypedField::new(Some("home"), "a@b.com"),
        TypedField::new(Some("work"), "c@d.com"),
      ]
    );
  }

  #[test]
  fn normalize_emails_is_idempotent() {
    let input = vec![
      TypedField::new(None, "a@b.com"),
      TypedField::new(Some("home"), ""),
    ];
    let once = normalize_emails(&input);
    assert_eq!(normalize_emails(&once), once);
  }

  #[test]
  fn ids_parse_or_fail_without_guessing() {
    assert_eq!(normalize_id(&ContactId::Resolved(7)).unwrap(), 7);
    assert_eq!(normalize_id(&ContactId::Raw("42".into())).unwrap(), 42);
    assert!(matches!(
      normalize_id(&ContactId::Raw("abc".into())),
      Err(Error::NonNumericId(_))
    ));
  }

  #[test]
  fn account_selectors_resolve_to_string_ids() {
    let accounts = vec![
      Account {
        id:   AccountId::Number(3),
        name: Some("sim".into()),
      },
      Account {
        id:   AccountId::Text("local".into()),
        name: None,
      },
    ];
    assert_eq!(
      resolve_account_ids(&accounts),
      vec!["3".to_string(), "local".to_string()]
    );
  }
}
