//! # Packable Items
//!
//! One distinct article waiting to be packed: a label, a unit weight and a
//! unit count.
//!
//! The packer hands back *fragments*: copies of an item carrying only the
//! quantity placed in one parcel. Fragments keep the `name`, `unit_weight`
//! and `reference` of the item they came from.

use serde::{Deserialize, Serialize};

use crate::weight::Weight;

/// An article to be distributed over parcels.
///
/// ## Fields
/// - `name` only appears in diagnostics, packing never looks at it
/// - `unit_weight` may be zero (vouchers, gift cards packed as a token)
/// - `reference` is an opaque caller id (SKU, order line) copied onto every
///   fragment so parcels can be mapped back to their source lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackableItem {
    /// Display label used in error messages.
    pub name: String,

    /// Weight of a single unit.
    pub unit_weight: Weight,

    /// Units awaiting placement.
    pub quantity: u32,

    /// Caller-supplied identifier, not used for packing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl PackableItem {
    /// Creates an item without a reference.
    ///
    /// ## Example
    /// ```rust
    /// use freight_core::{PackableItem, Weight};
    ///
    /// let mugs = PackableItem::new("Mug", Weight::from_grams(350), 6);
    /// assert_eq!(mugs.total_weight(), Weight::from_grams(2_100));
    /// ```
    pub fn new(name: impl Into<String>, unit_weight: Weight, quantity: u32) -> Self {
        PackableItem {
            name: name.into(),
            unit_weight,
            quantity,
            reference: None,
        }
    }

    /// Attaches a caller reference (e.g. the SKU).
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Weight of all remaining units, clamped at the largest representable weight.
    #[inline]
    pub fn total_weight(&self) -> Weight {
        self.unit_weight.saturating_mul(u64::from(self.quantity))
    }

    /// True for items that never consume parcel capacity.
    #[inline]
    pub fn is_weightless(&self) -> bool {
        self.unit_weight.is_zero()
    }

    /// A copy of this item carrying `quantity` units instead.
    pub fn fragment(&self, quantity: u32) -> Self {
        PackableItem {
            quantity,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_keeps_identity() {
        let item = PackableItem::new("Anvil", Weight::from_kilograms(5), 3).with_reference("ANV-5");
        let fragment = item.fragment(1);

        assert_eq!(fragment.name, "Anvil");
        assert_eq!(fragment.unit_weight, Weight::from_kilograms(5));
        assert_eq!(fragment.reference.as_deref(), Some("ANV-5"));
        assert_eq!(fragment.quantity, 1);
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_total_weight_saturates() {
        let item = PackableItem::new("Planet", Weight::from_milligrams(u64::MAX), 2);
        assert_eq!(item.total_weight(), Weight::from_milligrams(u64::MAX));
    }

    #[test]
    fn test_deserialize_without_reference() {
        let item: PackableItem =
            serde_json::from_str(r#"{"name":"Voucher","unit_weight":"0g","quantity":4}"#).unwrap();
        assert!(item.is_weightless());
        assert_eq!(item.reference, None);
    }
}
