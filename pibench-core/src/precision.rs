//! Floating-Point Width
//!
//! The series can be evaluated in single or double precision. The width is a
//! runtime [`Precision`] value; the summation code is written once against
//! [`SeriesFloat`] and monomorphized for `f32` and `f64`.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Arithmetic needed to evaluate and combine series terms.
pub trait SeriesFloat:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Additive identity
    const ZERO: Self;
    /// Multiplicative identity, also the first sign of the series
    const ONE: Self;
    /// Final scaling factor of the Leibniz series
    const FOUR: Self;
    /// Significant decimal digits worth printing for this width
    const PRINT_DIGITS: usize;

    /// Convert a term denominator `2i + 1` into this width
    fn from_index(n: u64) -> Self;

    /// Widen to `f64` for statistics and reporting
    fn to_f64(self) -> f64;
}

impl SeriesFloat for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const FOUR: Self = 4.0;
    const PRINT_DIGITS: usize = f32::DIGITS as usize + 1;

    #[inline(always)]
    fn from_index(n: u64) -> Self {
        n as f32
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl SeriesFloat for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const FOUR: Self = 4.0;
    const PRINT_DIGITS: usize = f64::DIGITS as usize + 1;

    #[inline(always)]
    fn from_index(n: u64) -> Self {
        n as f64
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }
}

/// Floating-point width used for every term, partial sum and combine step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Precision {
    /// IEEE-754 binary32
    #[serde(rename = "f32")]
    Single,
    /// IEEE-754 binary64
    #[default]
    #[serde(rename = "f64")]
    Double,
}

impl Precision {
    /// Significant digits used when printing an estimate of this width
    pub fn significant_digits(self) -> usize {
        match self {
            Precision::Single => <f32 as SeriesFloat>::PRINT_DIGITS,
            Precision::Double => <f64 as SeriesFloat>::PRINT_DIGITS,
        }
    }

    /// Short name (`f32` / `f64`)
    pub fn as_str(self) -> &'static str {
        match self {
            Precision::Single => "f32",
            Precision::Double => "f64",
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "f32" | "single" | "float" => Ok(Precision::Single),
            "f64" | "double" => Ok(Precision::Double),
            other => Err(format!("Unknown precision: {}", other)),
        }
    }
}
