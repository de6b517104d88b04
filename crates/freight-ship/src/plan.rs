//! # Shipment Plans
//!
//! Turns an [`Order`] and a carrier's [`PackingSettings`] into the list of
//! physical parcels to hand to the carrier integration.
//!
//! ## Planning Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Order ──validate──► PackableItems (reference = SKU)                    │
//! │                          │                                              │
//! │        max_parcel_weight? ├── none ──► one parcel, all lines            │
//! │                          │                                              │
//! │                          └── set ───► BinPacker(max − filler)           │
//! │                                          │                              │
//! │                                          ▼                              │
//! │  PlannedParcel per packed parcel:                                      │
//! │    contents_weight + filler = total_weight                             │
//! │    (any unweighed line + fallback configured → total = fallback)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use freight_core::{BinPacker, PackableItem, Parcel, Weight};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{CarrierSettings, PackingSettings};
use crate::error::ShipResult;
use crate::order::Order;

/// Part of an order line placed in one parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelContent {
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    /// `None` when the line has no recorded weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_weight: Option<Weight>,
}

/// One physical parcel of a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedParcel {
    /// Position in the shipment, starting at 0.
    pub index: usize,
    pub contents: Vec<ParcelContent>,
    /// Sum of the known content weights.
    pub contents_weight: Weight,
    /// Packaging weight added by the carrier settings.
    pub filler_weight: Weight,
    /// Weight to declare to the carrier.
    pub total_weight: Weight,
    /// True when `total_weight` is the configured fallback weight.
    pub weight_is_fallback: bool,
}

/// Parcels for one order and carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentPlan {
    pub id: Uuid,
    pub order_number: String,
    pub carrier_code: String,
    pub created_at: DateTime<Utc>,
    pub parcels: Vec<PlannedParcel>,
}

impl ShipmentPlan {
    pub fn parcel_count(&self) -> usize {
        self.parcels.len()
    }

    /// Declared weight of the whole shipment.
    pub fn total_weight(&self) -> Weight {
        self.parcels.iter().map(|parcel| parcel.total_weight).sum()
    }
}

/// Plans the parcels for `order` under `carrier`'s limits.
///
/// ## Errors
/// - `Validation` for malformed orders
/// - `InvalidConfig` when the filler leaves no room for items
/// - `Packing` when an item is heavier than the item capacity
///
/// ## Example
/// ```rust
/// use freight_core::Weight;
/// use freight_ship::config::FreightConfig;
/// use freight_ship::order::{Order, OrderLine};
/// use freight_ship::plan::plan_shipment;
///
/// let config = FreightConfig::default(); // dhl, 31.5 kg
/// let order = Order {
///     number: "SO-1".to_string(),
///     lines: vec![OrderLine {
///         sku: "TILE".to_string(),
///         name: "Floor tile".to_string(),
///         unit_weight: Some(Weight::from_kilograms(2)),
///         quantity: 20,
///     }],
/// };
///
/// let plan = plan_shipment(&order, config.default_carrier().unwrap()).unwrap();
/// assert_eq!(plan.parcel_count(), 2);
/// assert_eq!(plan.total_weight(), Weight::from_kilograms(40));
/// ```
pub fn plan_shipment(order: &Order, carrier: &CarrierSettings) -> ShipResult<ShipmentPlan> {
    order.validate()?;

    let packing = &carrier.packing;
    let items = order.to_packable_items();

    let groups: Vec<Vec<PackableItem>> = match packing.item_capacity()? {
        None => {
            debug!(carrier = %carrier.code, "No parcel weight limit, single parcel");
            if items.is_empty() {
                Vec::new()
            } else {
                vec![items]
            }
        }
        Some(capacity) => BinPacker::new(capacity)
            .pack(&items)?
            .into_iter()
            .map(Parcel::into_items)
            .collect(),
    };

    let unweighed: HashSet<&str> = order
        .lines
        .iter()
        .filter(|line| !line.has_known_weight())
        .map(|line| line.sku.as_str())
        .collect();

    let parcels: Vec<PlannedParcel> = groups
        .into_iter()
        .enumerate()
        .map(|(index, fragments)| plan_parcel(index, fragments, packing, &unweighed))
        .collect();

    let plan = ShipmentPlan {
        id: Uuid::new_v4(),
        order_number: order.number.clone(),
        carrier_code: carrier.code.clone(),
        created_at: Utc::now(),
        parcels,
    };

    info!(
        order = %plan.order_number,
        carrier = %plan.carrier_code,
        parcels = plan.parcel_count(),
        total_weight = %plan.total_weight(),
        "Shipment planned"
    );
    Ok(plan)
}

fn plan_parcel(
    index: usize,
    fragments: Vec<PackableItem>,
    packing: &PackingSettings,
    unweighed: &HashSet<&str>,
) -> PlannedParcel {
    let contents_weight: Weight = fragments.iter().map(PackableItem::total_weight).sum();
    let filler_weight = packing.filler_weight_per_parcel;

    let has_unweighed = fragments
        .iter()
        .any(|item| item.reference.as_deref().is_some_and(|sku| unweighed.contains(sku)));

    let (total_weight, weight_is_fallback) = match packing.fallback_parcel_weight {
        Some(fallback) if has_unweighed => (fallback, true),
        _ => (contents_weight + filler_weight, false),
    };

    let contents = fragments
        .into_iter()
        .map(|item| {
            let sku = item.reference.unwrap_or_default();
            let unit_weight = (!unweighed.contains(sku.as_str())).then_some(item.unit_weight);
            ParcelContent {
                sku,
                name: item.name,
                quantity: item.quantity,
                unit_weight,
            }
        })
        .collect();

    PlannedParcel {
        index,
        contents,
        contents_weight,
        filler_weight,
        total_weight,
        weight_is_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShipError;
    use crate::order::OrderLine;
    use freight_core::PackingError;
    use pretty_assertions::assert_eq;

    fn carrier(max: Option<Weight>, filler: Weight, fallback: Option<Weight>) -> CarrierSettings {
        CarrierSettings {
            code: "dhl".to_string(),
            name: "DHL Paket".to_string(),
            packing: PackingSettings {
                max_parcel_weight: max,
                filler_weight_per_parcel: filler,
                fallback_parcel_weight: fallback,
            },
        }
    }

    fn line(sku: &str, unit_weight: Option<Weight>, quantity: u32) -> OrderLine {
        OrderLine {
            sku: sku.to_string(),
            name: sku.to_lowercase(),
            unit_weight,
            quantity,
        }
    }

    fn order(lines: Vec<OrderLine>) -> Order {
        Order {
            number: "SO-100".to_string(),
            lines,
        }
    }

    fn kg(kg: u64) -> Weight {
        Weight::from_kilograms(kg)
    }

    /// (sku, quantity) per content, per parcel.
    fn layout(plan: &ShipmentPlan) -> Vec<Vec<(&str, u32)>> {
        plan.parcels
            .iter()
            .map(|p| p.contents.iter().map(|c| (c.sku.as_str(), c.quantity)).collect())
            .collect()
    }

    #[test]
    fn test_filler_reduces_item_capacity() {
        // 11 kg limit with 1 kg filler leaves 10 kg for items
        let order = order(vec![
            line("A", Some(kg(5)), 3),
            line("B", Some(kg(8)), 1),
            line("C", Some(kg(3)), 2),
        ]);
        let carrier = carrier(Some(kg(11)), kg(1), None);

        let plan = plan_shipment(&order, &carrier).unwrap();

        assert_eq!(
            layout(&plan),
            vec![
                vec![("B", 1)],
                vec![("A", 2)],
                vec![("A", 1), ("C", 1)],
                vec![("C", 1)],
            ]
        );
        let totals: Vec<Weight> = plan.parcels.iter().map(|p| p.total_weight).collect();
        assert_eq!(totals, vec![kg(9), kg(11), kg(9), kg(4)]);
        assert_eq!(plan.total_weight(), kg(33));
        assert!(plan.parcels.iter().enumerate().all(|(i, p)| p.index == i));
        assert_eq!(plan.order_number, "SO-100");
        assert_eq!(plan.carrier_code, "dhl");
    }

    #[test]
    fn test_no_limit_means_single_parcel() {
        let order = order(vec![line("SOFA", Some(kg(80)), 1), line("CHAIR", Some(kg(12)), 4)]);
        let carrier = carrier(None, Weight::from_grams(500), None);

        let plan = plan_shipment(&order, &carrier).unwrap();

        assert_eq!(layout(&plan), vec![vec![("SOFA", 1), ("CHAIR", 4)]]);
        assert_eq!(plan.parcels[0].contents_weight, kg(128));
        assert_eq!(plan.parcels[0].total_weight, Weight::from_kg_g(128, 500));
    }

    #[test]
    fn test_empty_order_has_no_parcels() {
        let plan = plan_shipment(&order(vec![]), &carrier(Some(kg(10)), Weight::zero(), None)).unwrap();
        assert_eq!(plan.parcel_count(), 0);

        let plan = plan_shipment(&order(vec![]), &carrier(None, Weight::zero(), None)).unwrap();
        assert_eq!(plan.parcel_count(), 0);
    }

    #[test]
    fn test_fallback_weight_for_unweighed_lines() {
        let order = order(vec![
            line("BOOK", Some(kg(4)), 3),
            line("POSTER", None, 1),
        ]);
        let carrier = carrier(Some(kg(10)), Weight::zero(), Some(kg(2)));

        let plan = plan_shipment(&order, &carrier).unwrap();

        assert_eq!(layout(&plan), vec![vec![("BOOK", 2), ("POSTER", 1)], vec![("BOOK", 1)]]);

        let first = &plan.parcels[0];
        assert!(first.weight_is_fallback);
        assert_eq!(first.total_weight, kg(2));
        assert_eq!(first.contents_weight, kg(8));
        assert_eq!(first.contents[1].unit_weight, None);

        let second = &plan.parcels[1];
        assert!(!second.weight_is_fallback);
        assert_eq!(second.total_weight, kg(4));
        assert_eq!(second.contents[0].unit_weight, Some(kg(4)));
    }

    #[test]
    fn test_unweighed_without_fallback_uses_known_weight() {
        let order = order(vec![line("POSTER", None, 3)]);
        let carrier = carrier(Some(kg(10)), Weight::from_grams(300), None);

        let plan = plan_shipment(&order, &carrier).unwrap();

        assert_eq!(plan.parcel_count(), 1);
        assert!(!plan.parcels[0].weight_is_fallback);
        assert_eq!(plan.parcels[0].total_weight, Weight::from_grams(300));
    }

    #[test]
    fn test_overweight_line_fails() {
        let order = order(vec![line("STOVE", Some(kg(45)), 1), line("MUG", Some(kg(1)), 1)]);
        let carrier = carrier(Some(Weight::from_kg_g(31, 500)), Weight::zero(), None);

        let err = plan_shipment(&order, &carrier).unwrap_err();

        assert!(matches!(
            err,
            ShipError::Packing(PackingError::ItemExceedsCapacity { ref name, .. }) if name == "stove"
        ));
    }

    #[test]
    fn test_filler_at_limit_is_config_error() {
        let order = order(vec![line("MUG", Some(kg(1)), 1)]);
        let carrier = carrier(Some(kg(1)), kg(1), None);

        let err = plan_shipment(&order, &carrier).unwrap_err();
        assert!(matches!(err, ShipError::InvalidConfig(_)));
    }

    #[test]
    fn test_invalid_order_is_rejected_before_packing() {
        let order = order(vec![line("MUG", Some(kg(1)), 0)]);
        let err = plan_shipment(&order, &carrier(Some(kg(10)), Weight::zero(), None)).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_plan_serializes_weights_as_milligrams() {
        let order = order(vec![line("MUG", Some(Weight::from_grams(350)), 1)]);
        let plan = plan_shipment(&order, &carrier(Some(kg(10)), Weight::zero(), None)).unwrap();

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["parcels"][0]["total_weight"], 350_000);
        assert_eq!(json["parcels"][0]["contents"][0]["sku"], "MUG");

        let back: ShipmentPlan = serde_json::from_value(json).unwrap();
        assert_eq!(back, plan);
    }
}
