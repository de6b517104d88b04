//! # Validation Module
//!
//! Input validation for order lines and packing requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Types, unit strings ("31.5kg")                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Names, SKUs, quantity bounds, capacity                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: BinPacker                                                    │
//! │  └── Unit weight vs. capacity (ItemExceedsCapacity)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use freight_core::validation::{validate_sku, validate_quantity};
//!
//! validate_sku("MUG-350").unwrap();
//! validate_quantity(6).unwrap();
//! ```

use crate::error::ValidationError;
use crate::item::PackableItem;
use crate::weight::Weight;
use crate::{MAX_ITEMS_PER_PACKING, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_SKU_LEN: usize = 64;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Letters, digits, `.`, `-` and `_` only
///
/// ## Example
/// ```rust
/// use freight_core::validation::validate_sku;
///
/// assert!(validate_sku("SW-10.5").is_ok());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, dots, hyphens, and underscores"
                .to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit count.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: u64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a parcel capacity: zero would leave room for weightless items only.
pub fn validate_capacity(capacity: Weight) -> ValidationResult<()> {
    if capacity.is_zero() {
        return Err(ValidationError::MustBePositive {
            field: "capacity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a whole packing request.
///
/// ## Rules
/// - At most MAX_ITEMS_PER_PACKING distinct items
/// - Every item has a valid name and quantity
pub fn validate_items(items: &[PackableItem]) -> ValidationResult<()> {
    if items.len() > MAX_ITEMS_PER_PACKING {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 0,
            max: MAX_ITEMS_PER_PACKING as u64,
        });
    }

    for item in items {
        validate_item_name(&item.name)?;
        validate_quantity(item.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Stoneware mug 350ml").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("MUG-350").is_ok());
        assert!(validate_sku("tile_2.5kg").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(matches!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_quantity(MAX_ITEM_QUANTITY + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_capacity() {
        assert!(validate_capacity(Weight::from_grams(1)).is_ok());
        assert!(validate_capacity(Weight::zero()).is_err());
    }

    #[test]
    fn test_validate_items() {
        let good = vec![PackableItem::new("Mug", Weight::from_grams(350), 2)];
        assert!(validate_items(&good).is_ok());

        let bad = vec![
            PackableItem::new("Mug", Weight::from_grams(350), 2),
            PackableItem::new("Plate", Weight::from_grams(500), 0),
        ];
        assert!(validate_items(&bad).is_err());

        let too_many = vec![PackableItem::new("Pin", Weight::zero(), 1); MAX_ITEMS_PER_PACKING + 1];
        assert!(validate_items(&too_many).is_err());
    }
}
