//! Date resolution errors.

use thiserror::Error;

/// A post's date could not be resolved to a calendar month and year.
///
/// Never recovered locally: the build fails rather than dropping the post.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDateError {
    #[error("missing `date` field")]
    Missing,

    #[error("`{value}` is not a date: {reason}")]
    Malformed { value: String, reason: &'static str },

    #[error("`{value}` is out of range: {reason}")]
    OutOfRange { value: String, reason: String },
}

impl InvalidDateError {
    pub(crate) fn malformed(value: &str, reason: &'static str) -> Self {
        Self::Malformed {
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn out_of_range(value: &str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(InvalidDateError::Missing.to_string(), "missing `date` field");

        let err = InvalidDateError::malformed("yesterday", "expected YYYY-MM-DD");
        assert_eq!(
            err.to_string(),
            "`yesterday` is not a date: expected YYYY-MM-DD"
        );

        let err = InvalidDateError::out_of_range("2023-13-01", "month is invalid: 13");
        assert!(err.to_string().contains("month is invalid: 13"));
    }
}
