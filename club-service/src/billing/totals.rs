//! Document totals engine.
//!
//! Derives HT/TVA/TTC amounts from a document's line items. Missing numeric
//! fields degrade to zero so partially-populated drafts always produce a
//! total; these functions never fail. No rounding happens here: amounts are
//! rounded to two decimals only when formatted for display or export.

use crate::models::LineItem;
use rust_decimal::Decimal;
use serde::Serialize;

/// Derived totals for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentTotals {
    pub total_ht: Decimal,
    pub total_vat: Decimal,
    pub total_ttc: Decimal,
}

impl DocumentTotals {
    pub fn compute(items: &[LineItem]) -> Self {
        let total_ht = compute_ht(items);
        let total_vat = compute_vat(items);
        Self {
            total_ht,
            total_vat,
            total_ttc: total_ht + total_vat,
        }
    }
}

fn line_total(item: &LineItem) -> Decimal {
    item.quantity.unwrap_or(Decimal::ZERO) * item.unit_price.unwrap_or(Decimal::ZERO)
}

/// Sum of quantity * unit_price over all items, before tax.
pub fn compute_ht(items: &[LineItem]) -> Decimal {
    items.iter().map(line_total).sum()
}

/// Sum of per-line VAT amounts. A missing rate counts as 0%.
pub fn compute_vat(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .map(|item| line_total(item) * item.vat_rate.unwrap_or(Decimal::ZERO) / Decimal::ONE_HUNDRED)
        .sum()
}

/// Total including tax: `compute_ht + compute_vat`.
pub fn compute_ttc(items: &[LineItem]) -> Decimal {
    compute_ht(items) + compute_vat(items)
}

/// Presentation-layer rounding: a 2-decimal string for CSV export and
/// display. Persisted and re-aggregated amounts are never rounded.
pub fn format_amount(amount: &Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
