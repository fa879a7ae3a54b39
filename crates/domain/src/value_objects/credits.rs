//! Fixed-point monetary amount.
//!
//! Amounts are held as whole hundredths in an `i64`. Candidate amounts arrive
//! as decimals and must fit that representation exactly: non-negative, at
//! most [`MAX_CREDITS`], and with at most two fractional digits. The stored
//! hundredths are read off the shortest decimal rendering of the amount, so
//! the value a client sent is the value that reads back.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest accepted amount: the greatest `f64` at or under `i64::MAX`
/// hundredths. The next `f64` up, 92233720368547760, no longer fits.
pub const MAX_CREDITS: f64 = 92_233_720_368_547_744.0;

const MAX_FRACTION_DIGITS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CreditsError {
    #[error("costInCredits exceeds the maximum allowed credits")]
    ExceedsMaximum,
    #[error("costInCredits should be greater than or equal to zero")]
    Negative,
    #[error("costInCredits is not in a valid monetary format")]
    InvalidFormat,
}

/// A non-negative amount of credits with two implied decimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Credits {
    cents: i64,
}

impl Credits {
    /// Checks a decimal amount against the monetary format and converts it.
    ///
    /// The fractional digit count is taken from the shortest decimal
    /// rendering that round-trips to the same `f64`; Rust never renders
    /// floats in exponent form, so the count is exact.
    pub fn try_from_amount(amount: f64) -> Result<Self, CreditsError> {
        if !amount.is_finite() {
            return Err(CreditsError::InvalidFormat);
        }
        if amount > MAX_CREDITS {
            return Err(CreditsError::ExceedsMaximum);
        }
        if amount < 0.0 {
            return Err(CreditsError::Negative);
        }

        let rendered = amount.to_string();
        let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(CreditsError::InvalidFormat);
        }

        let whole: i64 = whole.parse().map_err(|_| CreditsError::InvalidFormat)?;
        let fraction: i64 = if fraction.is_empty() {
            0
        } else {
            format!("{fraction:0<2}")
                .parse()
                .map_err(|_| CreditsError::InvalidFormat)?
        };
        let cents = whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .ok_or(CreditsError::ExceedsMaximum)?;

        Ok(Self { cents })
    }

    /// Rebuilds an amount from its stored hundredths.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn cents(self) -> i64 {
        self.cents
    }

    /// The `f64` nearest to the exact decimal amount.
    pub fn as_amount(self) -> f64 {
        self.to_string()
            .parse()
            .unwrap_or(self.cents as f64 / 100.0)
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let magnitude = self.cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

impl Serialize for Credits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_amount())
    }
}

impl<'de> Deserialize<'de> for Credits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Self::try_from_amount(amount).map_err(serde::de::Error::custom)
    }
}
