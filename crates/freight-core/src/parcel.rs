//! # Parcels
//!
//! A `Parcel` is one physical package being filled by the packer. It keeps
//! its fragments in insertion order and maintains the running total weight
//! as fragments are added.

use serde::Serialize;

use crate::item::PackableItem;
use crate::weight::Weight;

/// One package produced by the packer.
///
/// Callers only read parcels; filling them is the packer's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parcel {
    items: Vec<PackableItem>,
    total_weight: Weight,
}

impl Parcel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment and accounts for its weight.
    pub(crate) fn add(&mut self, fragment: PackableItem) {
        self.total_weight += fragment.total_weight();
        self.items.push(fragment);
    }

    /// Fragments in the order they were placed.
    pub fn items(&self) -> &[PackableItem] {
        &self.items
    }

    /// Consumes the parcel, returning its fragments.
    pub fn into_items(self) -> Vec<PackableItem> {
        self.items
    }

    /// Sum of `unit_weight × quantity` over all fragments.
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Room left under `capacity`, zero when full.
    pub fn remaining_capacity(&self, capacity: Weight) -> Weight {
        capacity.saturating_sub(self.total_weight)
    }

    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Units of the item called `name` in this parcel, over all its fragments.
    pub fn quantity_of(&self, name: &str) -> u64 {
        self.items
            .iter()
            .filter(|item| item.name == name)
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Units in this parcel, over all fragments.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
