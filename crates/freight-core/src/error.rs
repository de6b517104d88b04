//! # Error Types
//!
//! Domain-specific error types for freight-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  freight-core errors (this file)                                       │
//! │  ├── PackingError      - The packer cannot produce parcels             │
//! │  ├── ValidationError   - Input validation failures                     │
//! │  └── WeightParseError  - Malformed weight strings                      │
//! │                                                                         │
//! │  freight-ship errors (separate crate)                                  │
//! │  └── ShipError         - Config, I/O and wraps all of the above        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, exact weights)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::weight::Weight;

// =============================================================================
// Packing Error
// =============================================================================

/// Errors raised by the bin packer.
///
/// Packing is all-or-nothing: when one of these is returned, no parcels
/// were produced for any item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackingError {
    /// A single unit of an item is heavier than the parcel capacity.
    ///
    /// ## Operator Workflow
    /// ```text
    /// Pack order (capacity: 31.5 kg)
    ///      │
    ///      ▼
    /// "Cast iron stove" weighs 45 kg per unit
    ///      │
    ///      ▼
    /// ItemExceedsCapacity { name, unit_weight: 45 kg, capacity: 31.5 kg }
    ///      │
    ///      ▼
    /// Raise the carrier limit, or ship the item separately
    /// ```
    #[error(
        "item \"{name}\" (weight {unit_weight}) is heavier than the maximum configured parcel capacity of {capacity}"
    )]
    ItemExceedsCapacity {
        name: String,
        unit_weight: Weight,
        capacity: Weight,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation of order lines before packing runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: u64, max: u64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a SKU with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. the same SKU on two order lines).
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Weight Parse Error
// =============================================================================

/// Errors from parsing weight strings like `"31.5kg"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightParseError {
    #[error("weight is empty")]
    Empty,

    #[error("invalid weight value: '{0}'")]
    InvalidNumber(String),

    #[error("weight is missing a unit (mg, g, kg, lb, oz)")]
    MissingUnit,

    #[error("unknown weight unit '{0}'. Valid units: mg, g, kg, lb, oz")]
    UnknownUnit(String),

    #[error("weight is too large")]
    Overflow,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with PackingError.
pub type PackingResult<T> = Result<T, PackingError>;

// =============================================================================
// Unit Tests
// =============================================================================
