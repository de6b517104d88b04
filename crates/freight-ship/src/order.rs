//! # Orders
//!
//! The order shape the planner accepts, and its translation into
//! [`PackableItem`]s.
//!
//! ## JSON Format
//! ```json
//! {
//!   "number": "SO-10042",
//!   "lines": [
//!     { "sku": "MUG-350", "name": "Stoneware mug", "unit_weight": "350g", "quantity": 6 },
//!     { "sku": "GIFT-25", "name": "Gift card", "unit_weight": "0g", "quantity": 1 },
//!     { "sku": "POSTER-A1", "name": "Poster A1", "quantity": 2 }
//!   ]
//! }
//! ```
//!
//! A line without `unit_weight` has no recorded weight. It is packed as
//! weightless and marks its parcel for the carrier's fallback weight.

use freight_core::validation::{validate_items, validate_sku};
use freight_core::{PackableItem, ValidationError, Weight};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ShipResult;

/// One line of a shop order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Stock Keeping Unit, unique within the order.
    pub sku: String,

    /// Product name, printed in packing errors.
    pub name: String,

    /// Weight of one unit, if the product has one on record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_weight: Option<Weight>,

    /// Units ordered.
    pub quantity: u32,
}

impl OrderLine {
    /// True when the product has a recorded weight.
    pub fn has_known_weight(&self) -> bool {
        self.unit_weight.is_some()
    }

    /// The packer's view of this line; the SKU becomes the reference.
    pub fn to_packable_item(&self) -> PackableItem {
        PackableItem::new(
            self.name.as_str(),
            self.unit_weight.unwrap_or_default(),
            self.quantity,
        )
        .with_reference(self.sku.as_str())
    }
}

/// A shop order to be shipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Shop order number.
    pub number: String,

    /// Order lines, in shop order.
    #[serde(default)]
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Parses an order from JSON.
    pub fn from_json(json: &str) -> ShipResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the order number, the line count, each line, and SKU uniqueness.
    pub fn validate(&self) -> ShipResult<()> {
        if self.number.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "order number".to_string(),
            }
            .into());
        }

        validate_items(&self.to_packable_items())?;

        let mut skus = HashSet::new();
        for line in &self.lines {
            validate_sku(&line.sku)?;
            if !skus.insert(line.sku.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "sku".to_string(),
                    value: line.sku.clone(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// All lines as packable items, in order-line order.
    pub fn to_packable_items(&self) -> Vec<PackableItem> {
        self.lines.iter().map(OrderLine::to_packable_item).collect()
    }
}
