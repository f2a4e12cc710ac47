//! Argument checks applied before any request reaches the API server.
//!
//! Every predicate is pure and reports a [`Error`] describing the violated
//! constraint; callers attach the name of the offending field.

use std::time::Duration;

use snafu::{OptionExt, ResultExt, Snafu, ensure};

use crate::selector::{self, FieldSelector, LabelSelector};

#[derive(Clone, Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("value is required"))]
    Required,

    #[snafu(display("{actual:?} is below the minimum of {minimum:?}"))]
    DurationTooShort { actual: Duration, minimum: Duration },

    #[snafu(display("{value} is not greater than 0"))]
    NotPositive { value: i64 },

    #[snafu(display("{value} exceeds the maximum of {maximum}"))]
    TooLarge { value: i64, maximum: u32 },

    #[snafu(display("{source}"))]
    Selector { source: selector::ParseError },
}

/// Rejects empty strings.
///
/// # Errors
///
/// Returns [`Error::Required`] when `value` is empty.
pub fn required(value: &str) -> Result<(), Error> {
    ensure!(!value.is_empty(), RequiredSnafu);
    Ok(())
}

/// Rejects durations shorter than `minimum`.
///
/// # Errors
///
/// Returns [`Error::DurationTooShort`] when `value < minimum`.
pub fn min_duration(value: Duration, minimum: Duration) -> Result<(), Error> {
    ensure!(value >= minimum, DurationTooShortSnafu { actual: value, minimum });
    Ok(())
}

/// Checks that `value` is a usable page size and narrows it to the width the
/// API server accepts.
///
/// # Errors
///
/// Returns [`Error::NotPositive`] for zero or negative values and
/// [`Error::TooLarge`] for values that do not fit in a `u32`.
pub fn positive(value: i64) -> Result<u32, Error> {
    ensure!(value > 0, NotPositiveSnafu { value });
    u32::try_from(value).ok().context(TooLargeSnafu { value, maximum: u32::MAX })
}

/// Parses a non-empty label selector.
///
/// # Errors
///
/// Returns [`Error::Required`] for an empty string and [`Error::Selector`]
/// for malformed expressions.
pub fn label_selector(value: &str) -> Result<LabelSelector, Error> {
    required(value)?;
    value.parse::<LabelSelector>().context(SelectorSnafu)
}

/// Parses a non-empty field selector.
///
/// # Errors
///
/// Returns [`Error::Required`] for an empty string and [`Error::Selector`]
/// for malformed expressions.
pub fn field_selector(value: &str) -> Result<FieldSelector, Error> {
    required(value)?;
    value.parse::<FieldSelector>().context(SelectorSnafu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(required("default").is_ok());
        assert_eq!(required(""), Err(Error::Required));
    }

    #[test]
    fn test_min_duration() {
        let minimum = Duration::from_secs(1);
        assert!(min_duration(Duration::from_secs(1), minimum).is_ok());
        assert!(min_duration(Duration::from_millis(1500), minimum).is_ok());
        assert!(matches!(
            min_duration(Duration::from_millis(2), minimum),
            Err(Error::DurationTooShort { .. })
        ));
        assert!(min_duration(Duration::ZERO, minimum).is_err());
    }

    #[test]
    fn test_positive() {
        assert_eq!(positive(1), Ok(1));
        assert_eq!(positive(500), Ok(500));
        assert_eq!(positive(0), Err(Error::NotPositive { value: 0 }));
        assert_eq!(positive(-1), Err(Error::NotPositive { value: -1 }));
        assert!(matches!(positive(i64::MAX), Err(Error::TooLarge { .. })));
    }

    #[test]
    fn test_selectors() {
        assert!(label_selector("app=test-app").is_ok());
        assert_eq!(label_selector("").unwrap_err(), Error::Required);
        assert!(matches!(label_selector("app in ("), Err(Error::Selector { .. })));

        assert!(field_selector("metadata.name=web").is_ok());
        assert_eq!(field_selector("").unwrap_err(), Error::Required);
        assert!(matches!(field_selector("metadata.name"), Err(Error::Selector { .. })));
    }
}
