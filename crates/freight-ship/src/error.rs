//! # Shipment Error Types
//!
//! Error types for shipment preparation.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Shipment Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Input       │  │       Packing           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  InvalidOrder   │  │  Packing                │ │
//! │  │  UnknownCarrier │  │  Validation     │  │  (ItemExceedsCapacity)  │ │
//! │  │  ConfigLoad/Save│  │  InvalidWeight  │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Output: OutputFailed (plan serialization)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use freight_core::{PackingError, ValidationError, WeightParseError};
use thiserror::Error;

/// Result type alias for shipment operations.
pub type ShipResult<T> = Result<T, ShipError>;

/// Shipment error type covering config, input and packing failures.
#[derive(Debug, Error)]
pub enum ShipError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid freight configuration.
    #[error("Invalid freight configuration: {0}")]
    InvalidConfig(String),

    /// No carrier with this code is configured.
    #[error("Unknown carrier '{code}'. Configured carriers: {available}")]
    UnknownCarrier { code: String, available: String },

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Order file could not be read or decoded.
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Order content failed validation.
    #[error("Invalid order: {0}")]
    Validation(#[from] ValidationError),

    /// A weight string could not be parsed.
    #[error("Invalid weight: {0}")]
    InvalidWeight(#[from] WeightParseError),

    // =========================================================================
    // Packing Errors
    // =========================================================================
    /// The packer rejected the order.
    #[error(transparent)]
    Packing(#[from] PackingError),

    // =========================================================================
    // Output Errors
    // =========================================================================
    /// The finished plan could not be rendered.
    #[error("Failed to write shipment plan: {0}")]
    OutputFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for ShipError {
    fn from(err: serde_json::Error) -> Self {
        ShipError::InvalidOrder(err.to_string())
    }
}

impl From<std::io::Error> for ShipError {
    fn from(err: std::io::Error) -> Self {
        ShipError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ShipError {
    fn from(err: toml::de::Error) -> Self {
        ShipError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ShipError {
    fn from(err: toml::ser::Error) -> Self {
        ShipError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ShipError {
    /// Returns true if fixing the carrier configuration resolves this error.
    ///
    /// An item heavier than the parcel limit counts: raising the limit
    /// (or picking another carrier) is the operator's fix.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ShipError::InvalidConfig(_)
                | ShipError::UnknownCarrier { .. }
                | ShipError::ConfigLoadFailed(_)
                | ShipError::ConfigSaveFailed(_)
                | ShipError::Packing(PackingError::ItemExceedsCapacity { .. })
        )
    }

    /// Returns true if the order itself must be corrected.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ShipError::InvalidOrder(_) | ShipError::Validation(_) | ShipError::InvalidWeight(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_core::Weight;

    #[test]
    fn test_packing_error_is_transparent() {
        let err: ShipError = PackingError::ItemExceedsCapacity {
            name: "Stove".to_string(),
            unit_weight: Weight::from_kilograms(45),
            capacity: Weight::from_kg_g(31, 500),
        }
        .into();

        assert_eq!(
            err.to_string(),
            "item \"Stove\" (weight 45 kg) is heavier than the maximum configured parcel capacity of 31.5 kg"
        );
        assert!(err.is_config_error());
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_categories() {
        let err: ShipError = ValidationError::Required {
            field: "sku".to_string(),
        }
        .into();
        assert!(err.is_input_error());

        let err = ShipError::UnknownCarrier {
            code: "ups".to_string(),
            available: "dhl".to_string(),
        };
        assert!(err.is_config_error());
        assert_eq!(
            err.to_string(),
            "Unknown carrier 'ups'. Configured carriers: dhl"
        );
    }

    #[test]
    fn test_output_failure_is_neither_config_nor_input() {
        let err = ShipError::OutputFailed("broken pipe".to_string());
        assert!(!err.is_config_error());
        assert!(!err.is_input_error());
        assert_eq!(err.to_string(), "Failed to write shipment plan: broken pipe");
    }
}
