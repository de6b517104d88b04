//! # Weight Module
//!
//! Provides the `Weight` type for handling parcel and item weights safely.
//!
//! ## Why Integer Milligrams?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With f64 kilograms:                                                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ > 0.3 capacity!                  │
//! │                                                                         │
//! │  A parcel filled with ten 0.1 kg items may "exceed" a 1 kg limit,      │
//! │  depending on the order the items were added.                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Milligrams                                       │
//! │    100_000 mg × 10 = 1_000_000 mg == 1 kg capacity  ✅ exact            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use freight_core::weight::Weight;
//!
//! let capacity = Weight::from_kg_g(31, 500);   // 31.5 kg
//! let unit = Weight::from_grams(750);
//!
//! // How many whole units fit?
//! assert_eq!(capacity / unit, 42);
//!
//! // Unit-aware parsing, exact decimal arithmetic
//! let parsed: Weight = "31.5kg".parse().unwrap();
//! assert_eq!(parsed, capacity);
//! assert_eq!(parsed.to_string(), "31.5 kg");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::WeightParseError;

const MG_PER_GRAM: u64 = 1_000;
const MG_PER_KILOGRAM: u64 = 1_000_000;

/// Longest fractional part accepted when parsing, keeps the scale inside u128.
const MAX_FRACTION_DIGITS: usize = 18;

// =============================================================================
// Weight Unit
// =============================================================================

/// Units accepted when parsing a weight.
///
/// Imperial units use the international definitions
/// (1 lb = 453.59237 g, 1 oz = 1/16 lb) and are rounded to the nearest
/// milligram on conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    Milligram,
    Gram,
    Kilogram,
    Pound,
    Ounce,
}

impl WeightUnit {
    /// Short symbol used in weight strings.
    pub const fn symbol(&self) -> &'static str {
        match self {
            WeightUnit::Milligram => "mg",
            WeightUnit::Gram => "g",
            WeightUnit::Kilogram => "kg",
            WeightUnit::Pound => "lb",
            WeightUnit::Ounce => "oz",
        }
    }

    /// Milligrams per unit as an exact fraction `(numerator, denominator)`.
    const fn milligram_ratio(&self) -> (u128, u128) {
        match self {
            WeightUnit::Milligram => (1, 1),
            WeightUnit::Gram => (MG_PER_GRAM as u128, 1),
            WeightUnit::Kilogram => (MG_PER_KILOGRAM as u128, 1),
            WeightUnit::Pound => (45_359_237, 100),
            WeightUnit::Ounce => (45_359_237, 1_600),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for WeightUnit {
    type Err = WeightParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mg" => Ok(WeightUnit::Milligram),
            "g" | "gr" => Ok(WeightUnit::Gram),
            "kg" => Ok(WeightUnit::Kilogram),
            "lb" | "lbs" => Ok(WeightUnit::Pound),
            "oz" => Ok(WeightUnit::Ounce),
            "" => Err(WeightParseError::MissingUnit),
            other => Err(WeightParseError::UnknownUnit(other.to_string())),
        }
    }
}

// =============================================================================
// Weight Type
// =============================================================================

/// A non-negative weight stored as whole milligrams.
///
/// ## Design Decisions
/// - **u64 (unsigned)**: a parcel or item can never weigh less than nothing
/// - **Single field tuple struct**: zero-cost abstraction over u64
/// - **Milligrams**: fine enough for any shippable article, coarse enough
///   that a u64 holds ~18 million tonnes
///
/// ## Where Weight is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  OrderLine.unit_weight ──► PackableItem.unit_weight ──┐                 │
/// │                                                       ▼                 │
/// │  Carrier max_parcel_weight ──► BinPacker capacity ──► Parcel.total      │
/// │                                                       │                 │
/// │                                   PlannedParcel.total_weight ◄──┘       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u64", try_from = "WeightRepr")]
pub struct Weight(u64);

impl Weight {
    /// Creates a weight from milligrams (the canonical unit).
    #[inline]
    pub const fn from_milligrams(mg: u64) -> Self {
        Weight(mg)
    }

    /// Creates a weight from whole grams.
    ///
    /// ## Example
    /// ```rust
    /// use freight_core::weight::Weight;
    ///
    /// assert_eq!(Weight::from_grams(250).milligrams(), 250_000);
    /// ```
    #[inline]
    pub const fn from_grams(grams: u64) -> Self {
        Weight(grams * MG_PER_GRAM)
    }

    /// Creates a weight from whole kilograms.
    #[inline]
    pub const fn from_kilograms(kg: u64) -> Self {
        Weight(kg * MG_PER_KILOGRAM)
    }

    /// Creates a weight from kilograms and grams.
    ///
    /// ## Example
    /// ```rust
    /// use freight_core::weight::Weight;
    ///
    /// let limit = Weight::from_kg_g(31, 500); // 31.5 kg
    /// assert_eq!(limit.grams(), 31_500);
    /// ```
    #[inline]
    pub const fn from_kg_g(kg: u64, g: u64) -> Self {
        Weight(kg * MG_PER_KILOGRAM + g * MG_PER_GRAM)
    }

    /// Parses a weight string such as `"31.5kg"`, `"250 g"` or `"2lb"`.
    ///
    /// The decimal part is read exactly; no floating point is involved.
    ///
    /// ## Example
    /// ```rust
    /// use freight_core::weight::Weight;
    ///
    /// assert_eq!(Weight::parse("1.25 kg").unwrap(), Weight::from_grams(1_250));
    /// assert_eq!(Weight::parse("1lb").unwrap().milligrams(), 453_592);
    /// assert!(Weight::parse("-1kg").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, WeightParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(WeightParseError::Empty);
        }

        let split = input
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(input.len());
        let (number, unit) = input.split_at(split);
        if number.is_empty() {
            return Err(WeightParseError::InvalidNumber(input.to_string()));
        }
        let unit: WeightUnit = unit.parse()?;

        Self::from_decimal(number, unit)
    }

    /// Converts an unsigned decimal literal in `unit` to milligrams,
    /// rounding half-up.
    fn from_decimal(number: &str, unit: WeightUnit) -> Result<Self, WeightParseError> {
        let invalid = || WeightParseError::InvalidNumber(number.to_string());

        let (whole, fraction) = match number.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (number, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if fraction.contains('.') || fraction.len() > MAX_FRACTION_DIGITS {
            return Err(invalid());
        }

        let mut scaled: u128 = 0;
        for digit in whole.chars().chain(fraction.chars()) {
            let digit = digit.to_digit(10).ok_or_else(invalid)?;
            scaled = scaled
                .checked_mul(10)
                .and_then(|v| v.checked_add(u128::from(digit)))
                .ok_or(WeightParseError::Overflow)?;
        }

        let (numerator, denominator) = unit.milligram_ratio();
        let denominator = denominator * 10u128.pow(fraction.len() as u32);
        let mg = scaled
            .checked_mul(numerator)
            .and_then(|v| v.checked_mul(2))
            .and_then(|v| v.checked_add(denominator))
            .map(|v| v / (2 * denominator))
            .ok_or(WeightParseError::Overflow)?;

        u64::try_from(mg)
            .map(Weight)
            .map_err(|_| WeightParseError::Overflow)
    }

    /// Returns the weight in milligrams.
    #[inline]
    pub const fn milligrams(&self) -> u64 {
        self.0
    }

    /// Returns the weight in whole grams (floored).
    #[inline]
    pub const fn grams(&self) -> u64 {
        self.0 / MG_PER_GRAM
    }

    /// Returns zero weight.
    #[inline]
    pub const fn zero() -> Self {
        Weight(0)
    }

    /// Checks if the weight is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtraction that returns `None` instead of going below zero.
    #[inline]
    pub const fn checked_sub(self, other: Weight) -> Option<Weight> {
        match self.0.checked_sub(other.0) {
            Some(mg) => Some(Weight(mg)),
            None => None,
        }
    }

    /// Subtraction clamped at zero.
    #[inline]
    pub const fn saturating_sub(self, other: Weight) -> Weight {
        Weight(self.0.saturating_sub(other.0))
    }

    /// How many whole `unit`s fit into `self`; `None` for a zero unit.
    ///
    /// ## Example
    /// ```rust
    /// use freight_core::weight::Weight;
    ///
    /// let room = Weight::from_kilograms(10);
    /// assert_eq!(room.checked_div(Weight::from_kilograms(3)), Some(3));
    /// assert_eq!(room.checked_div(Weight::zero()), None);
    /// ```
    #[inline]
    pub const fn checked_div(self, unit: Weight) -> Option<u64> {
        self.0.checked_div(unit.0)
    }

    /// Weight of `quantity` units, `None` on overflow.
    #[inline]
    pub const fn checked_mul(self, quantity: u64) -> Option<Weight> {
        match self.0.checked_mul(quantity) {
            Some(mg) => Some(Weight(mg)),
            None => None,
        }
    }

    /// Weight of `quantity` units, clamped at the largest representable weight.
    #[inline]
    pub const fn saturating_mul(self, quantity: u64) -> Weight {
        Weight(self.0.saturating_mul(quantity))
    }
}

// =============================================================================
// Serde Representation
// =============================================================================

/// Accepted wire forms: integer milligrams or a unit string.
#[derive(Deserialize)]
#[serde(untagged)]
enum WeightRepr {
    Milligrams(u64),
    Text(String),
}

impl TryFrom<WeightRepr> for Weight {
    type Error = WeightParseError;

    fn try_from(repr: WeightRepr) -> Result<Self, Self::Error> {
        match repr {
            WeightRepr::Milligrams(mg) => Ok(Weight(mg)),
            WeightRepr::Text(text) => Weight::parse(&text),
        }
    }
}

impl From<Weight> for u64 {
    fn from(weight: Weight) -> u64 {
        weight.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Exact kilograms with trailing zeros trimmed: `8 kg`, `1.25 kg`, `0.0005 kg`.
impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kg = self.0 / MG_PER_KILOGRAM;
        let fraction = self.0 % MG_PER_KILOGRAM;
        if fraction == 0 {
            return write!(f, "{} kg", kg);
        }
        let fraction = format!("{:06}", fraction);
        write!(f, "{}.{} kg", kg, fraction.trim_end_matches('0'))
    }
}

impl FromStr for Weight {
    type Err = WeightParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weight::parse(s)
    }
}

impl Add for Weight {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Weight(self.0 + other.0)
    }
}

impl AddAssign for Weight {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Panics on underflow, like the underlying `u64`. Use
/// [`Weight::checked_sub`] or [`Weight::saturating_sub`] when the result
/// may go below zero.
impl Sub for Weight {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Weight(self.0 - other.0)
    }
}

impl SubAssign for Weight {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Weight of a quantity of units.
impl Mul<u32> for Weight {
    type Output = Self;

    #[inline]
    fn mul(self, quantity: u32) -> Self {
        Weight(self.0 * u64::from(quantity))
    }
}

impl Mul<u64> for Weight {
    type Output = Self;

    #[inline]
    fn mul(self, quantity: u64) -> Self {
        Weight(self.0 * quantity)
    }
}

/// Dimensionless ratio: how many whole `other`s fit into `self` (floored).
/// Panics on a zero divisor; see [`Weight::checked_div`].
impl Div for Weight {
    type Output = u64;

    #[inline]
    fn div(self, other: Self) -> u64 {
        self.0 / other.0
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Self {
        iter.fold(Weight::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Weight> for Weight {
    fn sum<I: Iterator<Item = &'a Weight>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
