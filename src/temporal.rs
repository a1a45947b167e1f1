//! Fixed-point currency and floating-point timestamps
//!
//! These are the two value types whose representation decides their
//! equality. A [`Currency`] is a scaled integer and compares exactly. A
//! [`Timestamp`] counts days as a floating-point number and is compared
//! with the same tolerance as an `f64`.

use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};

use crate::equality::{bits_equal, float, Category, Equatable, Precision};

/// A fixed-point amount with four decimal places
///
/// Stored as the amount multiplied by [`Currency::SCALE`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Currency(i64);

impl Currency {
    pub const SCALE: i64 = 10_000;

    pub const ZERO: Self = Self(0);

    pub const fn from_scaled(scaled: i64) -> Self {
        Self(scaled)
    }

    pub const fn scaled(self) -> i64 {
        self.0
    }

    /// A whole amount, if it fits
    pub fn from_units(units: i64) -> Option<Self> {
        units.checked_mul(Self::SCALE).map(Self)
    }

    /// Round a floating-point amount to four decimal places, if it fits
    pub fn from_f64(amount: f64) -> Option<Self> {
        let scaled = (amount * Self::SCALE as f64).round();
        if !scaled.is_finite()
            || scaled < i64::MIN as f64
            || scaled >= i64::MAX as f64
        {
            return None;
        }
        Some(Self(scaled as i64))
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / Self::SCALE as u64;
        let fraction = abs % Self::SCALE as u64;
        if fraction == 0 {
            return write!(f, "{sign}{units}");
        }
        let digits = format!("{fraction:04}");
        write!(f, "{sign}{units}.{}", digits.trim_end_matches('0'))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseCurrencyError(String);

impl Display for ParseCurrencyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid currency amount {:?}", self.0)
    }
}

impl std::error::Error for ParseCurrencyError {}

impl FromStr for Currency {
    type Err = ParseCurrencyError;

    /// Parse a decimal amount with at most four fractional digits
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCurrencyError(s.to_string());

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (units, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if units.is_empty()
            || fraction.len() > 4
            || !all_digits(units)
            || !all_digits(fraction)
        {
            return Err(err());
        }

        let units: i64 = units.parse().map_err(|_| err())?;
        let fraction: i64 = if fraction.is_empty() {
            0
        } else {
            let padded = format!("{fraction:0<4}");
            padded.parse().map_err(|_| err())?
        };

        let scaled = units
            .checked_mul(Self::SCALE)
            .and_then(|x| x.checked_add(fraction))
            .ok_or_else(err)?;
        Ok(Self(if negative { -scaled } else { scaled }))
    }
}

impl Equatable for Currency {
    const CATEGORY: Category = Category::Currency;

    #[inline]
    fn value_equals(x: &Self, y: &Self) -> bool {
        bits_equal(x.0.to_ne_bytes(), y.0.to_ne_bytes())
    }
}

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Days between the timestamp epoch (1899-12-30) and the Unix epoch
pub const UNIX_EPOCH_DAYS: f64 = 25_569.0;

/// A point in time as a number of days since 1899-12-30 00:00 UTC
///
/// The fractional part is the time of day. Values before the epoch are
/// negative and count backwards with floor semantics, so `-0.25` is
/// 1899-12-29 18:00.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Timestamp(f64);

impl Timestamp {
    pub const fn from_days(days: f64) -> Self {
        Self(days)
    }

    pub const fn days(self) -> f64 {
        self.0
    }

    pub fn from_unix_seconds(seconds: f64) -> Self {
        Self(seconds / 86_400.0 + UNIX_EPOCH_DAYS)
    }

    pub fn to_unix_seconds(self) -> f64 {
        (self.0 - UNIX_EPOCH_DAYS) * 86_400.0
    }

    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        let days = datetime.timestamp_millis() as f64 / MILLIS_PER_DAY;
        Self(days + UNIX_EPOCH_DAYS)
    }

    /// The point in time rounded to the millisecond
    ///
    /// Returns `None` for non-finite values and for values outside the
    /// range of [`DateTime`].
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if !self.0.is_finite() {
            return None;
        }
        let millis = ((self.0 - UNIX_EPOCH_DAYS) * MILLIS_PER_DAY).round();
        if millis < i64::MIN as f64 || millis >= i64::MAX as f64 {
            return None;
        }
        DateTime::from_timestamp_millis(millis as i64)
    }

    /// Build a timestamp from a calendar date and time of day in UTC
    ///
    /// Returns `None` when any of the fields is out of range, including
    /// years outside the range of [`NaiveDate`].
    pub fn from_ymd_hms(
        year: i64,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        let year = i32::try_from(year).ok()?;
        let datetime = NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, minute, second)?;
        Some(Self::from_datetime(datetime.and_utc()))
    }
}

impl Display for Timestamp {
    /// `YYYY-MM-DD HH:MM:SS`, with milliseconds only when there are any
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(datetime) = self.to_datetime() else {
            return write!(f, "{}", self.0);
        };
        let format = if datetime.timestamp_subsec_millis() == 0 {
            "%Y-%m-%d %H:%M:%S"
        } else {
            "%Y-%m-%d %H:%M:%S%.3f"
        };
        write!(f, "{}", datetime.format(format))
    }
}

impl Equatable for Timestamp {
    const CATEGORY: Category = Category::Temporal;

    #[inline]
    fn value_equals(x: &Self, y: &Self) -> bool {
        float::same_value(x.0, y.0, Precision::Double)
    }
}
