//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct for post dates, optimized for
//! archive grouping and feed generation.
//!
//! # Timezones
//!
//! Dates are taken as written. A trailing offset (`Z`, `+02:00`) is validated
//! but not applied, so a post dated `2023-04-01T00:30:00+02:00` stays in April
//! no matter where the build runs.
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTimeUtc::parse("2024-06-15")?;
//! let dt = DateTimeUtc::parse("2024-06-15T14:30:45Z")?;
//!
//! assert_eq!(dt.to_iso_date(), "2024-06-15");
//! assert_eq!(dt.to_long_date(), "June 15, 2024");
//! ```

use crate::archive::{InvalidDateError, MONTH_NAMES};

/// UTC datetime without timezone complexity.
///
/// Field order matters: the derived `Ord` is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse an ISO 8601 date or datetime.
    ///
    /// Accepted shapes:
    /// - `YYYY-MM-DD`
    /// - `YYYY-MM-DDTHH:MM[:SS[.fff]]` (`T` or a single space)
    /// - any of the above followed by `Z` or `±HH:MM`
    ///
    /// Surrounding whitespace and one pair of matching quotes are ignored,
    /// since frontmatter values often arrive quoted.
    pub fn parse(input: &str) -> Result<Self, InvalidDateError> {
        let s = unquote(input.trim());
        if s.is_empty() {
            return Err(InvalidDateError::Missing);
        }

        let bytes = s.as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(InvalidDateError::malformed(s, "expected YYYY-MM-DD"));
        }

        let (Some(year), Some(month), Some(day)) = (
            parse_u16(&bytes[0..4]),
            parse_u8(&bytes[5..7]),
            parse_u8(&bytes[8..10]),
        ) else {
            return Err(InvalidDateError::malformed(s, "expected YYYY-MM-DD"));
        };

        let (hour, minute, second) = if bytes.len() == 10 {
            (0, 0, 0)
        } else {
            parse_time(&bytes[10..])
                .ok_or_else(|| InvalidDateError::malformed(s, "invalid time of day"))?
        };

        let dt = Self::new(year, month, day, hour, minute, second);
        match dt.range_issue() {
            Some(reason) => Err(InvalidDateError::out_of_range(s, reason)),
            None => Ok(dt),
        }
    }

    /// Check every field against its calendar range.
    pub fn validate(&self) -> Result<(), InvalidDateError> {
        match self.range_issue() {
            Some(reason) => Err(InvalidDateError::out_of_range(&self.to_rfc3339(), reason)),
            None => Ok(()),
        }
    }

    fn range_issue(&self) -> Option<String> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            return Some(format!("month is invalid: {month}"));
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            return Some(format!("day is invalid: {day}"));
        }
        if hour > 23 {
            return Some(format!("hour is invalid: {hour}"));
        }
        if minute > 59 {
            return Some(format!("minute is invalid: {minute}"));
        }
        if second > 59 {
            return Some(format!("second is invalid: {second}"));
        }

        None
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Zero-based month index (January = 0).
    #[inline]
    pub const fn month_index(self) -> usize {
        self.month.saturating_sub(1) as usize
    }

    /// Format as `YYYY-MM-DD`, dropping any time of day.
    pub fn to_iso_date(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Format as RFC 3339 (ISO 8601) for Atom feeds.
    ///
    /// Returns: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// Format as `March 05, 2023`, the index page display form.
    pub fn to_long_date(self) -> String {
        let name = MONTH_NAMES.get(self.month_index()).copied().unwrap_or("?");
        format!("{} {:02}, {:04}", name, self.day, self.year)
    }
}

impl std::fmt::Display for DateTimeUtc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.hour == 0 && self.minute == 0 && self.second == 0 {
            f.write_str(&self.to_iso_date())
        } else {
            f.write_str(&self.to_rfc3339())
        }
    }
}

/// Strip one pair of matching `"` or `'` quotes.
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2
            && let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    s
}

/// Parse the part after the date: `THH:MM[:SS[.fff]][Z|±HH:MM]`.
fn parse_time(bytes: &[u8]) -> Option<(u8, u8, u8)> {
    if !matches!(bytes.first(), Some(b'T' | b't' | b' ')) || bytes.len() < 6 {
        return None;
    }
    if bytes[3] != b':' {
        return None;
    }
    let hour = parse_u8(&bytes[1..3])?;
    let minute = parse_u8(&bytes[4..6])?;
    let mut rest = &bytes[6..];

    let mut second = 0;
    if let Some(tail) = rest.strip_prefix(b":") {
        second = parse_u8(tail.get(0..2)?)?;
        rest = &tail[2..];
    }

    // Fractional seconds are accepted and discarded
    if let Some(tail) = rest.strip_prefix(b".") {
        let digits = tail.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return None;
        }
        rest = &tail[digits..];
    }

    match rest {
        [] | [b'Z' | b'z'] => {}
        [b'+' | b'-', offset @ ..] => parse_offset(offset)?,
        _ => return None,
    }

    Some((hour, minute, second))
}

/// Validate a `HH:MM` offset body. The offset itself is not applied.
fn parse_offset(bytes: &[u8]) -> Option<()> {
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    let hours = parse_u8(&bytes[0..2])?;
    let minutes = parse_u8(&bytes[3..5])?;
    (hours <= 23 && minutes <= 59).then_some(())
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = DateTimeUtc::parse("2024-06-15").unwrap();
        assert_eq!(dt, DateTimeUtc::from_ymd(2024, 6, 15));
    }

    #[test]
    fn test_parse_with_time() {
        let dt = DateTimeUtc::parse("2024-06-15T14:30:45Z").unwrap();
        assert_eq!(dt, DateTimeUtc::new(2024, 6, 15, 14, 30, 45));

        let dt = DateTimeUtc::parse("2024-06-15 14:30").unwrap();
        assert_eq!(dt, DateTimeUtc::new(2024, 6, 15, 14, 30, 0));

        let dt = DateTimeUtc::parse("2024-06-15T14:30:45.123Z").unwrap();
        assert_eq!(dt.second, 45);
    }

    #[test]
    fn test_parse_offset_is_not_applied() {
        // Would be March 31st in UTC
        let dt = DateTimeUtc::parse("2023-04-01T00:30:00+02:00").unwrap();
        assert_eq!(dt.month, 4);
        assert_eq!(dt.day, 1);

        let dt = DateTimeUtc::parse("2023-03-31T23:30:00-05:00").unwrap();
        assert_eq!(dt.month, 3);

        assert!(DateTimeUtc::parse("2023-03-31T23:30:00+25:00").is_err());
        assert!(DateTimeUtc::parse("2023-03-31T23:30:00+0200").is_err());
    }

    #[test]
    fn test_parse_quoted() {
        assert_eq!(
            DateTimeUtc::parse("\"2023-03-15\"").unwrap(),
            DateTimeUtc::from_ymd(2023, 3, 15)
        );
        assert_eq!(
            DateTimeUtc::parse(" '2023-03-15' ").unwrap(),
            DateTimeUtc::from_ymd(2023, 3, 15)
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(DateTimeUtc::parse(""), Err(InvalidDateError::Missing));
        assert_eq!(DateTimeUtc::parse("  "), Err(InvalidDateError::Missing));

        for input in [
            "not a date",
            "March 15, 2023",
            "2023/03/15",
            "2023-3-15",
            "20230315",
            "2023-03-15T",
            "2023-03-15T14",
            "2023-03-15T14:30:45.Z",
            "2023-03-15T14:30:45Zjunk",
            "2023-03-15junk",
        ] {
            assert!(
                matches!(
                    DateTimeUtc::parse(input),
                    Err(InvalidDateError::Malformed { .. })
                ),
                "{input} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_out_of_range() {
        for input in [
            "2023-13-01",
            "2023-00-10",
            "2023-02-29",
            "2023-04-31",
            "2023-04-01T24:00:00Z",
            "2023-04-01T12:60",
        ] {
            assert!(
                matches!(
                    DateTimeUtc::parse(input),
                    Err(InvalidDateError::OutOfRange { .. })
                ),
                "{input} should be out of range"
            );
        }
    }

    #[test]
    fn test_parse_non_ascii_does_not_panic() {
        assert!(DateTimeUtc::parse("２０２３-03-15").is_err());
        assert!(DateTimeUtc::parse("2023-03-15T１２:00").is_err());
    }

    #[test]
    fn test_datetime_utc_validate_leap_year() {
        // Leap year - Feb 29 is valid
        assert!(DateTimeUtc::new(2024, 2, 29, 12, 0, 0).validate().is_ok());
        assert!(DateTimeUtc::new(2000, 2, 29, 12, 0, 0).validate().is_ok()); // divisible by 400

        // Non-leap year - Feb 29 is invalid
        assert!(DateTimeUtc::new(2023, 2, 29, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(1900, 2, 29, 12, 0, 0).validate().is_err()); // divisible by 100 but not 400
    }

    #[test]
    fn test_datetime_utc_validate_invalid_fields() {
        assert!(DateTimeUtc::new(2024, 0, 15, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 6, 0, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 6, 15, 24, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 6, 15, 12, 60, 0).validate().is_err());
        assert!(
            DateTimeUtc::new(2024, 6, 15, 12, 30, 60)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_iso_date_truncates_time() {
        let dt = DateTimeUtc::new(2024, 1, 5, 23, 59, 59);
        assert_eq!(dt.to_iso_date(), "2024-01-05");
        assert_eq!(DateTimeUtc::from_ymd(987, 1, 1).to_iso_date(), "0987-01-01");
    }

    #[test]
    fn test_to_rfc3339() {
        let dt = DateTimeUtc::new(2024, 6, 15, 14, 3, 5);
        assert_eq!(dt.to_rfc3339(), "2024-06-15T14:03:05Z");
    }

    #[test]
    fn test_to_long_date() {
        assert_eq!(
            DateTimeUtc::from_ymd(2023, 3, 2).to_long_date(),
            "March 02, 2023"
        );
        assert_eq!(
            DateTimeUtc::from_ymd(2022, 12, 25).to_long_date(),
            "December 25, 2022"
        );
    }

    #[test]
    fn test_month_index() {
        assert_eq!(DateTimeUtc::from_ymd(2023, 1, 1).month_index(), 0);
        assert_eq!(DateTimeUtc::from_ymd(2023, 12, 1).month_index(), 11);
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = DateTimeUtc::parse("2022-12-31T23:59:59Z").unwrap();
        let b = DateTimeUtc::parse("2023-01-01").unwrap();
        let c = DateTimeUtc::parse("2023-01-01T00:00:01Z").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_display() {
        assert_eq!(DateTimeUtc::from_ymd(2023, 3, 15).to_string(), "2023-03-15");
        assert_eq!(
            DateTimeUtc::new(2023, 3, 15, 8, 0, 0).to_string(),
            "2023-03-15T08:00:00Z"
        );
    }
}
