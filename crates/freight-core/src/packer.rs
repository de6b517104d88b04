//! # Bin Packer
//!
//! Splits items into parcels that respect a per-parcel weight capacity,
//! using the first-fit decreasing heuristic.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     First-Fit Decreasing                                │
//! │                                                                         │
//! │  1. Copy the input, stable-sort by unit weight (heaviest first)        │
//! │  2. Reject the run if any unit is heavier than the capacity            │
//! │  3. Open one empty parcel                                              │
//! │  4. Pop the front item of the work queue:                              │
//! │       for each open parcel, oldest first:                              │
//! │         place min(remaining, ⌊room / unit_weight⌋) units               │
//! │         (weightless items: everything, into the first parcel)          │
//! │       units left? → open a parcel, push the item back to the FRONT     │
//! │  5. Queue empty → return parcels in opening order                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example: capacity 10 kg
//! ```text
//! Input:  A 5 kg ×3, B 8 kg ×1, C 3 kg ×2
//! Sorted: B(8) A(5) C(3)
//!
//! Parcel 0: B×1        = 8 kg
//! Parcel 1: A×2        = 10 kg
//! Parcel 2: A×1 C×1    = 8 kg
//! Parcel 3: C×1        = 3 kg
//! ```
//!
//! Every pass over the queue either exhausts the front item or opens a
//! parcel with full headroom, which always takes at least one unit, so the
//! loop terminates.

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use crate::error::{PackingError, PackingResult};
use crate::item::PackableItem;
use crate::parcel::Parcel;
use crate::weight::Weight;

/// Packs items into parcels of at most `capacity`.
///
/// ## Example
/// ```rust
/// use freight_core::{BinPacker, PackableItem, Weight};
///
/// let packer = BinPacker::new(Weight::from_kilograms(10));
/// let parcels = packer
///     .pack(&[PackableItem::new("Brick", Weight::from_kilograms(4), 5)])
///     .unwrap();
///
/// assert_eq!(parcels.len(), 3);
/// assert_eq!(parcels[0].total_weight(), Weight::from_kilograms(8));
/// assert_eq!(parcels[2].total_weight(), Weight::from_kilograms(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinPacker {
    capacity: Weight,
}

impl BinPacker {
    pub const fn new(capacity: Weight) -> Self {
        BinPacker { capacity }
    }

    /// Maximum weight of a single parcel.
    pub const fn capacity(&self) -> Weight {
        self.capacity
    }

    /// Distributes `items` over as few parcels as the heuristic finds.
    ///
    /// The caller's items are not touched: the run works on its own copy.
    /// An empty input (or one where every quantity is zero) yields no parcels.
    ///
    /// ## Errors
    /// [`PackingError::ItemExceedsCapacity`] when a single unit of any item
    /// outweighs the capacity. Nothing is packed in that case.
    pub fn pack(&self, items: &[PackableItem]) -> PackingResult<Vec<Parcel>> {
        let mut working = items.to_vec();
        // sort_by is stable: equal weights keep their input order
        working.sort_by(|a, b| b.unit_weight.cmp(&a.unit_weight));

        if let Some(item) = working.iter().find(|item| item.unit_weight > self.capacity) {
            warn!(
                item = %item.name,
                unit_weight = %item.unit_weight,
                capacity = %self.capacity,
                "Item heavier than parcel capacity"
            );
            return Err(PackingError::ItemExceedsCapacity {
                name: item.name.clone(),
                unit_weight: item.unit_weight,
                capacity: self.capacity,
            });
        }

        let mut queue: VecDeque<PackableItem> = working
            .into_iter()
            .filter(|item| item.quantity > 0)
            .collect();
        let mut parcels = vec![Parcel::new()];

        while let Some(mut item) = queue.pop_front() {
            for (index, parcel) in parcels.iter_mut().enumerate() {
                if item.quantity == 0 {
                    break;
                }
                let placeable = self.placeable_quantity(parcel, &item);
                if placeable == 0 {
                    continue;
                }
                trace!(parcel = index, item = %item.name, quantity = placeable, "Placing units");
                parcel.add(item.fragment(placeable));
                item.quantity -= placeable;
            }

            if item.quantity > 0 {
                parcels.push(Parcel::new());
                debug!(
                    parcel = parcels.len() - 1,
                    item = %item.name,
                    remaining = item.quantity,
                    "Opening parcel"
                );
                queue.push_front(item);
            }
        }

        // Only the initial parcel can still be empty here.
        parcels.retain(|parcel| !parcel.is_empty());

        debug!(
            parcels = parcels.len(),
            items = items.len(),
            capacity = %self.capacity,
            "Packing complete"
        );
        Ok(parcels)
    }

    /// Units of `item` that fit into `parcel` right now.
    fn placeable_quantity(&self, parcel: &Parcel, item: &PackableItem) -> u32 {
        match parcel
            .remaining_capacity(self.capacity)
            .checked_div(item.unit_weight)
        {
            // weightless: everything goes into the first parcel tried
            None => item.quantity,
            Some(fit) => item.quantity.min(u32::try_from(fit).unwrap_or(u32::MAX)),
        }
    }
}

/// Packs `items` into parcels of at most `bin_capacity`.
///
/// Shorthand for `BinPacker::new(bin_capacity).pack(items)`.
pub fn pack_into_bins(items: &[PackableItem], bin_capacity: Weight) -> PackingResult<Vec<Parcel>> {
    BinPacker::new(bin_capacity).pack(items)
}

// =============================================================================
// Unit Tests
// =============================================================================
