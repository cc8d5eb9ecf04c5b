//! # Price Composition
//!
//! Derives the displayed price from the base price plus the sum of selected
//! option deltas, times quantity. This is a pure projection of the current
//! selection state: it is recomputed on every selection change and never
//! cached across changes.

use serde::Serialize;

use crate::catalog::SelectionSet;

/// One line of the itemized breakdown: a dimension's selected choice and its
/// contribution.
#[derive(Debug, Clone, Serialize)]
pub struct PriceLine {
    pub dimension: String,
    pub choice: String,
    /// Delta in cents.
    pub delta: i64,
}

/// Itemized price derivation for display. Derived, not stored.
#[derive(Debug, Clone, Serialize)]
pub struct PriceBreakdown {
    /// Base price in cents.
    pub base_price: i64,
    pub lines: Vec<PriceLine>,
    /// `max(0, base + Σ deltas)` in cents.
    pub unit_price: i64,
    pub quantity: u32,
    /// `unit_price × quantity` in cents.
    pub total: i64,
}

/// Total price in cents: `(base + Σ selected deltas) × quantity`.
///
/// Deltas add algebraically — negative deltas subtract, with no
/// special-casing of sign. The unit price is floored at zero so the total is
/// never negative.
pub fn compute_total(selections: &SelectionSet, base_price: i64, quantity: u32) -> i64 {
    unit_price(selections, base_price) * quantity as i64
}

/// Unit price in cents, floored at zero.
#[inline]
pub fn unit_price(selections: &SelectionSet, base_price: i64) -> i64 {
    (base_price + selections.delta_sum()).max(0)
}

/// Full itemized breakdown for the current selections.
pub fn breakdown(selections: &SelectionSet, base_price: i64, quantity: u32) -> PriceBreakdown {
    let lines = selections
        .dimensions()
        .iter()
        .map(|d| {
            let choice = d.selected_choice();
            PriceLine {
                dimension: d.label.clone(),
                choice: choice.label.clone(),
                delta: choice.price_delta,
            }
        })
        .collect();

    let unit = unit_price(selections, base_price);
    PriceBreakdown {
        base_price,
        lines,
        unit_price: unit,
        quantity,
        total: unit * quantity as i64,
    }
}
