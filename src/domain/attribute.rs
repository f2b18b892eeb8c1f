//! Typed attribute values parsed from free-text catalog fields.
//!
//! Catalog data arrives as strings. Each rule-relevant field is parsed once,
//! when the record is built, into one of the types in this module:
//!
//! - [`Attr`]: a scalar string which is *absent* when empty
//! - [`AttrSet`]: a comma-separated list, compared by exact membership
//! - [`Speed`]: a numeric value extracted from text such as `DDR4-3200MHz`
//!
//! Absent values never satisfy a comparison. A record that lacks an attribute
//! referenced by a rule therefore fails that rule.

use std::{collections::BTreeSet, fmt, sync::LazyLock};

use regex::Regex;

/// A scalar attribute value.
///
/// An empty source string is stored as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Attr(Option<String>);

impl Attr {
    /// Parses an attribute from its raw string form.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            Self(None)
        } else {
            Self(Some(raw.to_string()))
        }
    }

    /// Returns the value, or `None` when absent.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns `true` when the attribute carries a value.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// Returns `true` if both attributes are present and equal.
    ///
    /// Two absent attributes do not match.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or(""))
    }
}

/// A set of values parsed from a comma-separated list.
///
/// Pieces are split on `,` without trimming, so `"NVMe, SATA"` contains
/// `"NVMe"` and `" SATA"`. Empty pieces are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrSet(BTreeSet<String>);

impl AttrSet {
    /// Parses a comma-separated list.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .filter(|piece| !piece.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Returns `true` if the attribute is present and a member of the set.
    #[must_use]
    pub fn contains(&self, attr: &Attr) -> bool {
        attr.as_str().is_some_and(|value| self.0.contains(value))
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the members in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

// Digits not glued to a preceding letter: skips the `4` of `DDR4`.
static STANDALONE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^A-Za-z0-9])([0-9]+)").expect("valid regex"));

static ANY_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// A numeric speed extracted from free text.
///
/// `None` means the source field was empty. A non-empty field without any
/// digits is a speed of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Speed(Option<u64>);

impl Speed {
    /// Extracts a speed from a free-text field.
    ///
    /// The first run of digits that stands on its own wins; failing that, the
    /// first run of digits anywhere; failing that, zero.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self(None);
        }
        Self(Some(extract_numeric(raw)))
    }

    /// Returns the numeric value, or `None` when absent.
    #[must_use]
    pub const fn value(self) -> Option<u64> {
        self.0
    }

    /// Returns `true` if both speeds are present and `self` does not exceed
    /// `ceiling`.
    #[must_use]
    pub const fn fits_within(self, ceiling: Self) -> bool {
        match (self.0, ceiling.0) {
            (Some(speed), Some(ceiling)) => speed <= ceiling,
            _ => false,
        }
    }
}

/// Extracts the numeric component of a free-text value.
///
/// Values too large for a `u64` saturate.
#[must_use]
pub fn extract_numeric(raw: &str) -> u64 {
    let digits = STANDALONE_DIGITS
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .or_else(|| ANY_DIGITS.find(raw))
        .map(|m| m.as_str());

    digits.map_or(0, |digits| digits.parse().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("DDR4-3200MHz", 3200; "generation prefix is skipped")]
    #[test_case("DDR4 up to 3600MHz", 3600; "prose ceiling")]
    #[test_case("3200", 3200; "bare number")]
    #[test_case("5600MHz", 5600; "unit suffix")]
    #[test_case("DDR5", 5; "falls back to any digits")]
    #[test_case("fast", 0; "no digits")]
    #[test_case("DDR4-2666, DDR4-3200", 2666; "first standalone run wins")]
    fn numeric_extraction(raw: &str, expected: u64) {
        assert_eq!(extract_numeric(raw), expected);
    }

    #[test]
    fn oversized_numbers_saturate() {
        assert_eq!(extract_numeric("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn speed_ceiling_comparison() {
        let ram = Speed::parse("DDR4-3200MHz");
        let cap = Speed::parse("DDR4 up to 3600MHz");
        assert!(ram.fits_within(cap));
        assert!(!cap.fits_within(ram));
    }

    #[test]
    fn absent_speed_never_fits() {
        let absent = Speed::parse("");
        assert_eq!(absent.value(), None);
        assert!(!absent.fits_within(Speed::parse("3200")));
        assert!(!Speed::parse("3200").fits_within(absent));
        assert!(!absent.fits_within(absent));
    }

    #[test]
    fn malformed_speed_is_zero() {
        let malformed = Speed::parse("unknown");
        assert_eq!(malformed.value(), Some(0));
        assert!(!Speed::parse("2400").fits_within(malformed));
    }

    #[test]
    fn absent_attributes_do_not_match() {
        assert!(!Attr::parse("").matches(&Attr::parse("")));
        assert!(!Attr::parse("AM4").matches(&Attr::parse("")));
        assert!(Attr::parse("AM4").matches(&Attr::parse("AM4")));
        assert!(!Attr::parse("AM4").matches(&Attr::parse("AM5")));
    }

    #[test]
    fn set_membership_is_exact() {
        let set = AttrSet::parse("B450,X570");
        assert!(set.contains(&Attr::parse("B450")));
        assert!(set.contains(&Attr::parse("X570")));
        assert!(!set.contains(&Attr::parse("B45")));
        assert!(!set.contains(&Attr::parse("B450,X570")));
        assert!(!set.contains(&Attr::parse("")));
    }

    #[test]
    fn set_pieces_are_not_trimmed() {
        let set = AttrSet::parse("NVMe, SATA");
        assert!(set.contains(&Attr::parse(" SATA")));
        assert!(!set.contains(&Attr::parse("SATA")));
    }

    #[test]
    fn empty_pieces_are_dropped() {
        assert!(AttrSet::parse("").is_empty());
        assert_eq!(AttrSet::parse("M.2,,2.5\"").iter().count(), 2);
    }
}
