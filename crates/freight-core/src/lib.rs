//! # freight-core: Pure Parcel Packing for Freight
//!
//! This crate decides how an order's items are split into parcels that stay
//! under a carrier's maximum parcel weight. It contains no I/O: no config
//! files, no carrier APIs, no persistence.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Freight Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Shop order / fulfilment (external)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ order lines                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │      freight-ship: carrier config, order → items → plan         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PackableItem + capacity                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ freight-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  weight   │  │   item    │  │  packer   │  │ validation│  │   │
//! │  │   │  Weight   │  │ Packable  │  │ BinPacker │  │   rules   │  │   │
//! │  │   │WeightUnit │  │   Item    │  │  Parcel   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CONFIG FILES • NO NETWORK • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`weight`] - Weight type with integer milligram arithmetic
//! - [`item`] - Packable items and fragments
//! - [`parcel`] - Parcels produced by the packer
//! - [`packer`] - First-fit decreasing bin packer
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same input, same parcels, same order
//! 2. **No I/O**: callers supply items and capacity, and consume parcels
//! 3. **Integer Weights**: milligrams in a u64, capacity checks are exact
//! 4. **All-or-Nothing**: an error never comes with partial parcels
//!
//! ## Example Usage
//!
//! ```rust
//! use freight_core::{pack_into_bins, PackableItem, Weight};
//!
//! let items = vec![
//!     PackableItem::new("A", Weight::from_kilograms(5), 3),
//!     PackableItem::new("B", Weight::from_kilograms(8), 1),
//!     PackableItem::new("C", Weight::from_kilograms(3), 2),
//! ];
//!
//! let parcels = pack_into_bins(&items, Weight::from_kilograms(10)).unwrap();
//!
//! assert_eq!(parcels.len(), 4);
//! assert!(parcels
//!     .iter()
//!     .all(|p| p.total_weight() <= Weight::from_kilograms(10)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod item;
pub mod packer;
pub mod parcel;
pub mod validation;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{PackingError, PackingResult, ValidationError, WeightParseError};
pub use item::PackableItem;
pub use packer::{pack_into_bins, BinPacker};
pub use parcel::Parcel;
pub use weight::{Weight, WeightUnit};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum units of a single order line accepted for packing.
pub const MAX_ITEM_QUANTITY: u32 = 100_000;

/// Maximum distinct items in one packing request.
pub const MAX_ITEMS_PER_PACKING: usize = 10_000;
