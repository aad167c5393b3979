//! Metadata codec: ordered `Key: value` lines per element.
//!
//! # Responsibility
//! - Render an element's scalar/list fields as an ordered line sequence,
//!   emitting a line only for non-empty/non-default values.
//! - Parse such lines back with forward-compatible tolerance: unknown
//!   keys are ignored, missing or out-of-range values fall back to
//!   type-specific defaults.
//!
//! # Invariants
//! - Export order is fixed per type: title, then subtype flags, then
//!   extended fields.
//! - Boolean flags serialize as `1` or stay absent.
//! - Lists serialize as one `;`-delimited string; entry order survives.

mod codec;

pub use codec::MetaCodec;

use crate::model::id::ElementId;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;

/// Key/value view over the metadata lines of one element block.
#[derive(Debug, Default)]
pub struct MetaMap {
    values: HashMap<String, String>,
}

impl MetaMap {
    /// Splits each line on the first `:`; lines without one are skipped.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut values = HashMap::new();
        for line in lines {
            if let Some((key, value)) = line.as_ref().split_once(':') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Boolean flags are stored as `1`; anything else reads as false.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key) == Some("1")
    }
}

/// Joins list entries with `;`.
pub fn join_list<T: std::fmt::Display>(entries: &[T]) -> String {
    entries
        .iter()
        .map(|entry| entry.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

/// Splits a `;`-delimited string into trimmed, non-empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a `;`-delimited ID list, dropping malformed tokens.
///
/// Well-formed but dangling IDs survive here; the reference reconciler
/// removes them later.
pub fn split_id_list(value: &str) -> Vec<ElementId> {
    split_list(value)
        .iter()
        .filter_map(|token| token.parse().ok())
        .collect()
}

/// ISO calendar date, or `None` for anything unparsable.
pub fn verified_date(value: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value?, "%Y-%m-%d").ok()
}

/// `HH:MM[:SS]` time of day, or `None` for anything unparsable.
pub fn verified_time(value: Option<&str>) -> Option<NaiveTime> {
    let value = value?;
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// Keeps a string that parses as a non-negative integer, else `None`.
pub fn verified_int_string(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    value.parse::<u64>().ok().map(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::{split_id_list, split_list, verified_date, verified_int_string, verified_time, MetaMap};
    use crate::model::id::ElementId;

    #[test]
    fn parse_splits_on_first_colon_only() {
        let map = MetaMap::parse(&["Title: Act One: Dawn", "junk line"]);
        assert_eq!(map.get("Title"), Some("Act One: Dawn"));
        assert_eq!(map.get("junk line"), None);
    }

    #[test]
    fn flag_requires_literal_one() {
        let map = MetaMap::parse(&["isTrash: 1", "noNumber: yes"]);
        assert!(map.flag("isTrash"));
        assert!(!map.flag("noNumber"));
        assert!(!map.flag("missing"));
    }

    #[test]
    fn lists_are_trimmed_and_ordered() {
        assert_eq!(split_list(" a ; b;; c "), ["a", "b", "c"]);
        assert_eq!(
            split_id_list("cr2; bogus ;cr1"),
            [ElementId::Character(2), ElementId::Character(1)]
        );
    }

    #[test]
    fn verified_values_tolerate_garbage() {
        assert!(verified_date(Some("2024-05-17")).is_some());
        assert!(verified_date(Some("yesterday")).is_none());
        assert!(verified_time(Some("09:30")).is_some());
        assert!(verified_time(Some("25:99")).is_none());
        assert_eq!(verified_int_string(Some("007")), Some("007".to_string()));
        assert_eq!(verified_int_string(Some("-3")), None);
    }
}
