//! Date values and their ISO-8601 text form.
//!
//! A [`Date`] stores an ECMAScript time value: milliseconds since the Unix
//! epoch as an `f64`. Construction applies the usual clipping: non-finite
//! values and values beyond ±8.64e15 ms produce an invalid date, and fractional
//! milliseconds are truncated toward zero.
//!
//! Valid dates stringify as `YYYY-MM-DDTHH:mm:ss.sssZ`. Years before 0 or after
//! 9999 use the expanded `±YYYYYY` form. Invalid dates stringify as `null`.
//!
//! ```rust
//! use serde_stringify::Date;
//!
//! assert_eq!(
//!     Date::from_millis(0.0).to_iso_string().as_deref(),
//!     Some("1970-01-01T00:00:00.000Z")
//! );
//! assert_eq!(Date::from_millis(f64::INFINITY).to_iso_string(), None);
//! ```

use chrono::{DateTime, Utc};
use std::fmt;

/// Largest absolute time value a date may hold, in milliseconds.
pub const MAX_TIME_VALUE: f64 = 8.64e15;

const MS_PER_DAY: i64 = 86_400_000;

/// Converts days since 1970-01-01 to a proleptic Gregorian `(year, month, day)`.
///
/// Works in 400-year eras of 146097 days, with years starting on March 1 so
/// the leap day falls at the end of each year.
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// A point in time with millisecond precision, or the invalid date.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Date {
    time: f64,
}

impl Date {
    /// Creates a date from milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_millis(millis: f64) -> Self {
        let time = if millis.is_finite() && millis.abs() <= MAX_TIME_VALUE {
            // +0.0 normalizes a truncated -0
            millis.trunc() + 0.0
        } else {
            f64::NAN
        };
        Date { time }
    }

    /// Creates the invalid date.
    #[must_use]
    pub const fn invalid() -> Self {
        Date { time: f64::NAN }
    }

    /// The current time.
    #[must_use]
    pub fn now() -> Self {
        Date::from(Utc::now())
    }

    /// Returns the time value in milliseconds, `NaN` for an invalid date.
    #[inline]
    #[must_use]
    pub const fn time_value(&self) -> f64 {
        self.time
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.time.is_nan()
    }

    /// Converts to a `chrono` timestamp.
    ///
    /// Returns `None` for invalid dates and for the few valid time values
    /// that lie beyond `chrono`'s supported year range.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if !self.is_valid() {
            return None;
        }
        DateTime::from_timestamp_millis(self.time as i64)
    }

    /// Formats the date as an ISO-8601 UTC timestamp with milliseconds.
    ///
    /// Every valid time value has a text form, up to `+275760-09-13` and
    /// down to `-271821-04-20`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_stringify::Date;
    ///
    /// let before_epoch = Date::from_millis(-1.0);
    /// assert_eq!(
    ///     before_epoch.to_iso_string().as_deref(),
    ///     Some("1969-12-31T23:59:59.999Z")
    /// );
    /// ```
    #[must_use]
    pub fn to_iso_string(&self) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        let time = self.time as i64;
        let (year, month, day) = civil_from_days(time.div_euclid(MS_PER_DAY));
        let ms_of_day = time.rem_euclid(MS_PER_DAY);

        let year_field = if (0..=9999).contains(&year) {
            format!("{:04}", year)
        } else {
            format!("{:+07}", year)
        };
        Some(format!(
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            year_field,
            month,
            day,
            ms_of_day / 3_600_000,
            ms_of_day / 60_000 % 60,
            ms_of_day / 1_000 % 60,
            ms_of_day % 1_000
        ))
    }
}

impl From<DateTime<Utc>> for Date {
    fn from(value: DateTime<Utc>) -> Self {
        Date::from_millis(value.timestamp_millis() as f64)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_iso_string() {
            Some(s) => f.write_str(&s),
            None => f.write_str("Invalid Date"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_epoch() {
        assert_eq!(
            Date::from_millis(0.0).to_iso_string().as_deref(),
            Some("1970-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_millisecond_padding() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        let date = Date::from_millis(dt.timestamp_millis() as f64 + 42.0);
        assert_eq!(
            date.to_iso_string().as_deref(),
            Some("2024-03-05T07:08:09.042Z")
        );
    }

    #[test]
    fn test_fraction_is_truncated() {
        let date = Date::from_millis(1.9);
        assert_eq!(date.time_value(), 1.0);
        let date = Date::from_millis(-0.5);
        assert_eq!(date.time_value(), 0.0);
        assert!(date.time_value().is_sign_positive());
    }

    #[test]
    fn test_expanded_years() {
        let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            Date::from(far).to_iso_string().as_deref(),
            Some("+010000-01-01T00:00:00.000Z")
        );

        let ancient = Utc.with_ymd_and_hms(-1, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(
            Date::from(ancient).to_iso_string().as_deref(),
            Some("-000001-06-15T12:00:00.000Z")
        );

        let year_zero = Utc.with_ymd_and_hms(0, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            Date::from(year_zero).to_iso_string().as_deref(),
            Some("0000-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_largest_representable_year() {
        let last = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            Date::from(last).to_iso_string().as_deref(),
            Some("9999-12-31T23:59:59.000Z")
        );
    }

    #[test]
    fn test_invalid_dates() {
        assert!(!Date::invalid().is_valid());
        assert!(!Date::from_millis(f64::NAN).is_valid());
        assert!(!Date::from_millis(f64::NEG_INFINITY).is_valid());
        assert!(!Date::from_millis(MAX_TIME_VALUE + 1.0).is_valid());
        assert!(Date::from_millis(MAX_TIME_VALUE).is_valid());
        assert!(Date::from_millis(-MAX_TIME_VALUE).is_valid());
        assert_eq!(Date::invalid().to_iso_string(), None);
        assert_eq!(Date::invalid().to_string(), "Invalid Date");
    }

    #[test]
    fn test_time_value_limits_have_text() {
        assert_eq!(
            Date::from_millis(MAX_TIME_VALUE).to_iso_string().as_deref(),
            Some("+275760-09-13T00:00:00.000Z")
        );
        assert_eq!(
            Date::from_millis(-MAX_TIME_VALUE).to_iso_string().as_deref(),
            Some("-271821-04-20T00:00:00.000Z")
        );
        assert_eq!(Date::from_millis(MAX_TIME_VALUE).to_datetime(), None);
    }

    #[test]
    fn test_calendar_matches_chrono() {
        use chrono::Datelike;

        let samples = [
            Utc.with_ymd_and_hms(2000, 2, 29, 23, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(1900, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(1600, 12, 31, 12, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(-400, 2, 29, 1, 2, 3).unwrap(),
            Utc.with_ymd_and_hms(200_000, 7, 4, 0, 0, 0).unwrap(),
        ];
        for dt in samples {
            let days = dt.timestamp_millis().div_euclid(MS_PER_DAY);
            assert_eq!(
                civil_from_days(days),
                (i64::from(dt.year()), i64::from(dt.month()), i64::from(dt.day())),
                "{}",
                dt
            );
        }
    }
}
