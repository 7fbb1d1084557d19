//! # Sequential Identifiers
//!
//! Vehicles and users are keyed by short business ids: a one-letter prefix
//! followed by a zero-padded sequence number.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │   last id in store         next id                            │
//! │   ────────────────         ───────                            │
//! │   (none)            ──►    M001                               │
//! │   M007              ──►    M008                               │
//! │   M999              ──►    M1000   (width grows, never cut)   │
//! │   M0x9 (corrupt)    ──►    M001    (degraded, logged above)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Plain string order puts `M1000` before `M999`. The store orders by
//! `(LENGTH(id), id)` instead, which [`id_sort_key`] mirrors in memory.
//!
//! ## Single writer
//! The sequence is read-max-then-increment. Two writers racing on the same
//! database would both compute the same id; the second insert then fails on
//! the primary key.

use std::fmt;

/// Minimum number of digits after the prefix.
pub const MIN_DIGITS: usize = 3;

/// Identifier namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// `M001`, `M002`, ...
    Vehicle,
    /// `U001`, `U002`, ...
    User,
}

impl Namespace {
    pub const fn prefix(&self) -> char {
        match self {
            Namespace::Vehicle => 'M',
            Namespace::User => 'U',
        }
    }

    /// Formats a sequence number in this namespace.
    pub fn format(&self, seq: u32) -> String {
        format!("{}{:0width$}", self.prefix(), seq, width = MIN_DIGITS)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Vehicle => write!(f, "vehicle"),
            Namespace::User => write!(f, "user"),
        }
    }
}

/// Extracts the sequence number from an id, if it is well formed.
///
/// The first character is taken as the prefix whatever it is; only the
/// remainder has to be digits.
pub fn parse_seq(id: &str) -> Option<u32> {
    let mut chars = id.chars();
    chars.next()?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Computes the id that follows `last` in `namespace`.
///
/// `last` is the highest id currently stored, or `None` for an empty table.
/// A corrupt suffix or an exhausted sequence restarts at 1 rather than
/// failing; the caller sees the collision on insert if that id is taken.
///
/// ```rust
/// use fleet_core::ids::{next_id, Namespace};
///
/// assert_eq!(next_id(Namespace::Vehicle, None), "M001");
/// assert_eq!(next_id(Namespace::Vehicle, Some("M041")), "M042");
/// assert_eq!(next_id(Namespace::User, Some("U999")), "U1000");
/// ```
pub fn next_id(namespace: Namespace, last: Option<&str>) -> String {
    let seq = last
        .and_then(parse_seq)
        .and_then(|n| n.checked_add(1))
        .unwrap_or(1);
    namespace.format(seq)
}

/// Sort key giving numeric order for well-formed ids of one namespace.
pub fn id_sort_key(id: &str) -> (usize, &str) {
    (id.len(), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_id() {
        assert_eq!(next_id(Namespace::Vehicle, None), "M001");
        assert_eq!(next_id(Namespace::User, None), "U001");
    }

    #[test]
    fn test_increment_keeps_padding() {
        assert_eq!(next_id(Namespace::Vehicle, Some("M001")), "M002");
        assert_eq!(next_id(Namespace::Vehicle, Some("M099")), "M100");
    }

    #[test]
    fn test_width_grows_past_999() {
        assert_eq!(next_id(Namespace::Vehicle, Some("M999")), "M1000");
        assert_eq!(next_id(Namespace::Vehicle, Some("M1000")), "M1001");
    }

    #[test]
    fn test_corrupt_suffix_restarts_at_one() {
        assert_eq!(next_id(Namespace::Vehicle, Some("Mabc")), "M001");
        assert_eq!(next_id(Namespace::Vehicle, Some("M")), "M001");
        assert_eq!(next_id(Namespace::Vehicle, Some("")), "M001");
        assert_eq!(next_id(Namespace::Vehicle, Some("M-12")), "M001");
    }

    #[test]
    fn test_overflow_restarts_at_one() {
        let last = format!("M{}", u32::MAX);
        assert_eq!(next_id(Namespace::Vehicle, Some(&last)), "M001");
        assert_eq!(next_id(Namespace::Vehicle, Some("M99999999999")), "M001");
    }

    #[test]
    fn test_sort_key_is_numeric_order() {
        let mut ids = vec!["M1000", "M002", "M999", "M010"];
        ids.sort_by_key(|id| id_sort_key(id));
        assert_eq!(ids, vec!["M002", "M010", "M999", "M1000"]);
    }
}
