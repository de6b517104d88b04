//! # freight-ship: Shipment Preparation for Freight
//!
//! Turns shop orders into shipment plans, using each carrier's parcel
//! weight limit and the packer from `freight-core`.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          freight-ship                                   │
//! │                                                                         │
//! │   freight.toml ──► FreightConfig ──► CarrierSettings                   │
//! │   FREIGHT_* env ─┘                        │                             │
//! │                                           ▼                             │
//! │   order.json ────► Order ─────────► plan_shipment ──► ShipmentPlan     │
//! │                                           │                             │
//! │                                           ▼                             │
//! │                                  freight_core::BinPacker                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Carrier packing settings (TOML file, env overrides)
//! - [`error`] - Shipment error types
//! - [`order`] - Order input and its packable items
//! - [`plan`] - Shipment plans with filler and fallback weights

pub mod config;
pub mod error;
pub mod order;
pub mod plan;

pub use config::{CarrierSettings, FreightConfig, PackingSettings};
pub use error::{ShipError, ShipResult};
pub use order::{Order, OrderLine};
pub use plan::{plan_shipment, ParcelContent, PlannedParcel, ShipmentPlan};
