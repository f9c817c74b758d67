//! Signed hours/minutes/seconds time model.
//!
//! # Design
//!
//! An [`Offset`] is either a point in the day ("09:30:00") or, under its
//! [`Duration`] alias, a length of time.  Both use the same representation:
//!
//!   value = sign × (hours·3600 + minutes·60 + seconds)
//!
//! with the magnitude held in normalized denominations
//! (`0 ≤ minutes, seconds < 60`, hours unbounded) and the sign stored
//! separately.  Every represented duration therefore has exactly one
//! normalized form, so the derived `PartialEq`/`Hash` are exact and zero is
//! never negative.
//!
//! Integer seconds are the finest resolution.  Scaling by a floating ratio
//! (used to stretch free activities over available slack) rounds to the
//! nearest second.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::{DsError, DsResult};

// ── Offset ────────────────────────────────────────────────────────────────────

/// A signed `[-]HH:MM:SS` value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Offset {
    hours:    i64,
    minutes:  u8,
    seconds:  u8,
    negative: bool,
}

/// An [`Offset`] used as a length of time.
pub type Duration = Offset;

/// Largest hours value accepted from text: the whole value in seconds still
/// fits in an `i64`.
pub const MAX_HOURS: i64 = i64::MAX / 3600 - 1;

impl Offset {
    pub const ZERO: Offset = Offset { hours: 0, minutes: 0, seconds: 0, negative: false };

    /// Build an offset from raw denominations.
    ///
    /// Inputs may be negative or overflow their denomination; they are folded
    /// into the normalized form (`new(0, 90, 0)` is 01:30:00, `new(1, -30, 0)`
    /// is 00:30:00, `new(0, 0, -30)` is -00:00:30).
    pub const fn new(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self::normalize(hours, minutes, seconds, false)
    }

    /// Build the negation of `new(hours, minutes, seconds)`.
    pub const fn new_negative(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self::normalize(hours, minutes, seconds, true)
    }

    /// A time of day supplied by the caller (the library never reads a clock).
    pub const fn from_time_of_day(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self::new(hours, minutes, seconds)
    }

    /// An offset of `seconds` seconds, folded into hours and minutes.
    pub const fn from_seconds(seconds: i64) -> Self {
        Self::new(0, 0, seconds)
    }

    /// Parse `[-]H:M:S`.  See the [`FromStr`] impl for the accepted forms.
    pub fn parse(text: &str) -> DsResult<Self> {
        text.parse()
    }

    const fn normalize(mut hours: i64, mut minutes: i64, mut seconds: i64, flagged: bool) -> Self {
        // View the value in a positive context.
        if flagged {
            hours = hours.saturating_neg();
            minutes = minutes.saturating_neg();
            seconds = seconds.saturating_neg();
        }

        let mut negative = false;
        loop {
            minutes = minutes.saturating_add(seconds / 60);
            hours = hours.saturating_add(minutes / 60);
            seconds %= 60;
            minutes %= 60;

            // Borrow from the next denomination to fill any negatives.
            if seconds < 0 {
                minutes -= 1;
                seconds += 60;
            }
            if minutes < 0 {
                hours = hours.saturating_sub(1);
                minutes += 60;
            }

            if hours >= 0 {
                break;
            }

            // The whole value is negative: flip and resolve the magnitude.
            negative = true;
            hours = hours.saturating_neg();
            minutes = -minutes;
            seconds = -seconds;
        }

        if hours == 0 && minutes == 0 && seconds == 0 {
            negative = false;
        }

        Offset { hours, minutes: minutes as u8, seconds: seconds as u8, negative }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    fn sign(self) -> i64 {
        if self.negative { -1 } else { 1 }
    }

    /// Signed hours denomination.
    #[inline]
    pub fn hours(self) -> i64 {
        self.sign() * self.hours
    }

    /// Signed minutes denomination, in `-59..=59`.
    #[inline]
    pub fn minutes(self) -> i64 {
        self.sign() * self.minutes as i64
    }

    /// Signed seconds denomination, in `-59..=59`.
    #[inline]
    pub fn seconds(self) -> i64 {
        self.sign() * self.seconds as i64
    }

    /// The whole value in minutes; seconds are truncated.  Saturates at the
    /// `i64` bounds.
    pub fn total_minutes(self) -> i64 {
        self.hours().saturating_mul(60).saturating_add(self.minutes())
    }

    /// The whole value in seconds.  Saturates at the `i64` bounds.
    pub fn total_seconds(self) -> i64 {
        self.total_minutes().saturating_mul(60).saturating_add(self.seconds())
    }

    /// The value with whole hours removed.
    pub fn hour_remainder(self) -> Duration {
        Self::normalize(0, self.minutes as i64, self.seconds as i64, self.negative)
    }

    /// The value with whole hours and minutes removed.
    pub fn minute_remainder(self) -> Duration {
        Self::normalize(0, 0, self.seconds as i64, self.negative)
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// The magnitude, with the sign dropped.
    pub fn abs(self) -> Self {
        Offset { negative: false, ..self }
    }

    // ── Scaling ───────────────────────────────────────────────────────────

    /// Multiply by `factor`, one denomination at a time.
    ///
    /// The fractional part of the scaled hours is carried into minutes and
    /// the fractional part of the scaled minutes into seconds, so the error
    /// does not compound through re-normalization.  Seconds round to nearest.
    /// A non-finite factor yields zero.
    pub fn scale(self, factor: f64) -> Self {
        if !factor.is_finite() {
            return Offset::ZERO;
        }
        let hours = factor * self.hours() as f64;
        let minutes = factor * self.minutes() as f64 + 60.0 * hours.fract();
        let seconds = factor * self.seconds() as f64 + 60.0 * minutes.fract();

        Offset::new(hours.trunc() as i64, minutes.trunc() as i64, seconds.round() as i64)
    }

    /// `self / other` as a floating ratio, or `None` when `other` is zero.
    pub fn ratio(self, other: Offset) -> Option<f64> {
        if other.is_zero() {
            None
        } else {
            Some(self.total_seconds() as f64 / other.total_seconds() as f64)
        }
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────────

// Hours saturate; minutes and seconds are bounded by normalization.

impl Add for Offset {
    type Output = Offset;
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(
            self.hours().saturating_add(rhs.hours()),
            self.minutes() + rhs.minutes(),
            self.seconds() + rhs.seconds(),
        )
    }
}

impl Sub for Offset {
    type Output = Offset;
    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(
            self.hours().saturating_sub(rhs.hours()),
            self.minutes() - rhs.minutes(),
            self.seconds() - rhs.seconds(),
        )
    }
}

impl Neg for Offset {
    type Output = Offset;
    fn neg(self) -> Offset {
        if self.is_zero() { self } else { Offset { negative: !self.negative, ..self } }
    }
}

impl Mul<f64> for Offset {
    type Output = Offset;
    #[inline]
    fn mul(self, rhs: f64) -> Offset {
        self.scale(rhs)
    }
}

impl Div<f64> for Offset {
    type Output = Offset;
    /// Division by zero yields zero (see [`Offset::scale`]).
    #[inline]
    fn div(self, rhs: f64) -> Offset {
        self.scale(rhs.recip())
    }
}

impl AddAssign for Offset {
    fn add_assign(&mut self, rhs: Offset) {
        *self = *self + rhs;
    }
}

impl SubAssign for Offset {
    fn sub_assign(&mut self, rhs: Offset) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Offset {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl DivAssign<f64> for Offset {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl Sum for Offset {
    fn sum<I: Iterator<Item = Offset>>(iter: I) -> Offset {
        iter.fold(Offset::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Offset> for Offset {
    fn sum<I: Iterator<Item = &'a Offset>>(iter: I) -> Offset {
        iter.copied().sum()
    }
}

// ── Ordering ──────────────────────────────────────────────────────────────────

impl Ord for Offset {
    /// Lexicographic on the signed denominations.  In normalized form every
    /// non-zero denomination carries the overall sign, so this agrees with
    /// comparing total seconds without risking overflow.
    fn cmp(&self, other: &Offset) -> Ordering {
        (self.hours(), self.minutes(), self.seconds())
            .cmp(&(other.hours(), other.minutes(), other.seconds()))
    }
}

impl PartialOrd for Offset {
    fn partial_cmp(&self, other: &Offset) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── Text form ─────────────────────────────────────────────────────────────────

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(f, "{sign}{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl FromStr for Offset {
    type Err = DsError;

    /// Parse `[-]H:M:S`.
    ///
    /// Missing leading fields default to zero (`"45"` is 45 s, `"5:00"` is
    /// five minutes).  A leading `-` negates the whole value, matching the
    /// `Display` form.  Overflowing fields are normalized; a value above
    /// [`MAX_HOURS`] hours is rejected.
    fn from_str(text: &str) -> DsResult<Self> {
        let trimmed = text.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        if body.is_empty() {
            return Err(DsError::parse(text, "no time given"));
        }

        let fields: Vec<&str> = body.split(':').collect();
        if fields.len() > 3 {
            return Err(DsError::parse(text, "expected at most three fields (H:M:S)"));
        }

        let mut values = [0i64; 3];
        let pad = 3 - fields.len();
        for (slot, field) in values[pad..].iter_mut().zip(&fields) {
            let field = field.trim();
            if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(DsError::parse(text, "fields must be unsigned integers"));
            }
            *slot = field
                .parse()
                .map_err(|_| DsError::parse(text, "field out of range"))?;
        }

        let [hours, minutes, seconds] = values;
        let offset = Offset::normalize(hours, minutes, seconds, negative);
        if offset.hours > MAX_HOURS {
            return Err(DsError::parse(text, "value too large"));
        }
        Ok(offset)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Offset {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Offset {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
