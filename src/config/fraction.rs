use std::{fmt, str::FromStr};

use crate::foundation::error::{MetroError, MetroResult};

/// A size or gutter fraction written as `"<int>/<int>"`, e.g. `"1/3"`.
///
/// The denominator is never zero once a value exists. Fractions travel through
/// serde as their string form.
///
/// Equality and hashing compare the written form, so `1/3 != 2/6` even though
/// both have the same [`ratio`](Self::ratio). Compare ratios or pixel extents
/// when the value is what matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fraction {
    num: i32,
    den: i32,
}

impl Fraction {
    /// `0/1`, used for absent gutters.
    pub const ZERO: Self = Self { num: 0, den: 1 };

    pub fn new(num: i32, den: i32) -> MetroResult<Self> {
        if den == 0 {
            return Err(MetroError::malformed_fraction(format!("{num}/{den}")));
        }
        Ok(Self { num, den })
    }

    /// Parse the literal `numerator/denominator` form.
    pub fn parse(input: &str) -> MetroResult<Self> {
        let mut parts = input.split('/');
        let (Some(num), Some(den), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(MetroError::malformed_fraction(input));
        };
        let num = num
            .parse::<i32>()
            .map_err(|_| MetroError::malformed_fraction(input))?;
        let den = den
            .parse::<i32>()
            .map_err(|_| MetroError::malformed_fraction(input))?;
        if den == 0 {
            return Err(MetroError::malformed_fraction(input));
        }
        Ok(Self { num, den })
    }

    pub fn numerator(self) -> i32 {
        self.num
    }

    pub fn denominator(self) -> i32 {
        self.den
    }

    pub fn ratio(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn is_positive(self) -> bool {
        self.ratio() > 0.0
    }

    /// `ceil(measured * ratio)` in pixels, saturating at the `i32` range.
    pub fn of_px(self, measured: u32) -> i32 {
        let px = (f64::from(measured) * self.ratio()).ceil();
        // `as` saturates for out-of-range floats.
        px as i32
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for Fraction {
    type Err = MetroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Fraction {
    type Error = MetroError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Fraction> for String {
    fn from(value: Fraction) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/fraction.rs"]
mod tests;
