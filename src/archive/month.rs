//! Month keys and their display labels.

use std::fmt;

use serde::{Serialize, Serializer};

use super::InvalidDateError;
use crate::utils::date::DateTimeUtc;

/// English month names, indexed by zero-based month (January = 0).
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One calendar month of one year.
///
/// Displays as `"March 2023"`. The label doubles as the grouping key, so two
/// keys are equal exactly when their labels are. Keys are only built from
/// validated dates, so `month0` is always below 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: u16,
    month0: u8,
}

impl MonthKey {
    /// Key for the month `date` falls in. Day and time of day are ignored.
    pub fn of(date: DateTimeUtc) -> Result<Self, InvalidDateError> {
        date.validate()?;
        Ok(Self {
            year: date.year,
            month0: date.month - 1,
        })
    }

    pub const fn year(self) -> u16 {
        self.year
    }

    /// Zero-based month (0-11).
    pub const fn month_index(self) -> usize {
        self.month0 as usize
    }

    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[self.month_index()]
    }

    /// Human-readable label, e.g. `"March 2023"`.
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:04}", self.month_name(), self.year)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Format a date as `"<FullMonthName> <Year>"`.
pub fn readable_month(date: &DateTimeUtc) -> Result<String, InvalidDateError> {
    MonthKey::of(*date).map(MonthKey::label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_readable_month() {
        let label = |y, m, d| readable_month(&DateTimeUtc::from_ymd(y, m, d)).unwrap();
        assert_eq!(label(2023, 3, 15), "March 2023");
        assert_eq!(label(2022, 12, 25), "December 2022");
        assert_eq!(label(2023, 1, 1), "January 2023");
    }

    #[test]
    fn test_every_month_has_distinct_label() {
        let labels: Vec<String> = (1..=12)
            .map(|m| readable_month(&DateTimeUtc::from_ymd(2024, m, 1)).unwrap())
            .collect();
        for (i, label) in labels.iter().enumerate() {
            assert!(label.starts_with(MONTH_NAMES[i]));
            assert!(label.ends_with(" 2024"));
        }
        let distinct: HashSet<&String> = labels.iter().collect();
        assert_eq!(distinct.len(), 12);
    }

    #[test]
    fn test_key_ignores_day_and_time() {
        let a = MonthKey::of(DateTimeUtc::new(2023, 3, 1, 0, 0, 0)).unwrap();
        let b = MonthKey::of(DateTimeUtc::new(2023, 3, 31, 23, 59, 59)).unwrap();
        assert_eq!(a, b);
        assert_eq!((a.year(), a.month_index()), (2023, 2));
        assert_ne!(a, MonthKey::of(DateTimeUtc::from_ymd(2024, 3, 1)).unwrap());
    }

    #[test]
    fn test_invalid_month_has_no_key() {
        for month in [0, 13] {
            let date = DateTimeUtc::new(2023, month, 1, 0, 0, 0);
            assert!(matches!(
                MonthKey::of(date),
                Err(InvalidDateError::OutOfRange { .. })
            ));
            assert!(readable_month(&date).is_err());
        }
    }

    #[test]
    fn test_serializes_as_label() {
        let key = MonthKey::of(DateTimeUtc::from_ymd(2023, 3, 15)).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"March 2023\"");
    }
}
