//! Document totals engine tests.

use chrono::Utc;
use club_service::billing::{
    compute_ht, compute_ttc, compute_vat, format_amount, DocumentTotals,
};
use club_service::models::LineItem;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Helper to build a line item with the given amounts.
fn item(
    quantity: Option<Decimal>,
    unit_price: Option<Decimal>,
    vat_rate: Option<Decimal>,
) -> LineItem {
    LineItem {
        line_item_id: Uuid::new_v4(),
        document_id: Uuid::new_v4(),
        tenant_id: Uuid::new_v4(),
        designation: "Test item".to_string(),
        description: None,
        quantity,
        unit_price,
        vat_rate,
        sort_order: 0,
        created_utc: Utc::now(),
    }
}

#[test]
fn empty_list_totals_are_zero() {
    assert_eq!(compute_ht(&[]), Decimal::ZERO);
    assert_eq!(compute_vat(&[]), Decimal::ZERO);
    assert_eq!(compute_ttc(&[]), Decimal::ZERO);
}

#[test]
fn missing_numeric_fields_degrade_to_zero() {
    let items = vec![
        item(None, Some(Decimal::from(100)), Some(Decimal::from(20))),
        item(Some(Decimal::from(3)), None, Some(Decimal::from(20))),
        item(None, None, None),
    ];

    assert_eq!(compute_ht(&items), Decimal::ZERO);
    assert_eq!(compute_vat(&items), Decimal::ZERO);
    assert_eq!(compute_ttc(&items), Decimal::ZERO);
}

#[test]
fn mixed_vat_rates_scenario() {
    // [{quantity: 2, unit_price: 100, vat_rate: 20}, {quantity: 1, unit_price: 50}]
    let items = vec![
        item(
            Some(Decimal::from(2)),
            Some(Decimal::from(100)),
            Some(Decimal::from(20)),
        ),
        item(Some(Decimal::from(1)), Some(Decimal::from(50)), None),
    ];

    assert_eq!(compute_ht(&items), Decimal::from(250));
    assert_eq!(compute_vat(&items), Decimal::from(40));
    assert_eq!(compute_ttc(&items), Decimal::from(290));
}

#[test]
fn zero_quantity_zeroes_the_line() {
    let items = vec![item(
        Some(Decimal::ZERO),
        Some(Decimal::from(100)),
        Some(Decimal::from(20)),
    )];

    assert_eq!(compute_ht(&items), Decimal::ZERO);
    assert_eq!(compute_vat(&items), Decimal::ZERO);
    assert_eq!(compute_ttc(&items), Decimal::ZERO);
}

#[test]
fn ttc_equals_ht_plus_vat() {
    let items = vec![
        item(
            Some(Decimal::new(25, 1)), // 2.5
            Some(Decimal::from(100)),
            Some(Decimal::new(77, 1)), // 7.7%
        ),
        item(
            Some(Decimal::from(4)),
            Some(Decimal::new(1999, 2)), // 19.99
            Some(Decimal::from(20)),
        ),
        item(Some(Decimal::from(1)), Some(Decimal::from(50)), None),
    ];

    assert_eq!(
        compute_ttc(&items),
        compute_ht(&items) + compute_vat(&items)
    );
}

#[test]
fn recomputation_is_idempotent() {
    let items = vec![item(
        Some(Decimal::from(3)),
        Some(Decimal::new(3333, 2)), // 33.33
        Some(Decimal::new(77, 1)),   // 7.7%
    )];

    let first = DocumentTotals::compute(&items);
    let second = DocumentTotals::compute(&items);
    assert_eq!(first, second);
}

#[test]
fn no_rounding_before_presentation() {
    // 3 * 33.33 = 99.99 HT; VAT at 7.7% = 7.699230 exactly.
    let items = vec![item(
        Some(Decimal::from(3)),
        Some(Decimal::new(3333, 2)),
        Some(Decimal::new(77, 1)),
    )];

    assert_eq!(compute_ht(&items), Decimal::new(9999, 2));
    assert_eq!(compute_vat(&items), Decimal::new(769923, 5));
}

#[test]
fn negative_amounts_pass_through() {
    // Corrections are the caller's concern; arithmetic is sign-preserving.
    let items = vec![
        item(
            Some(Decimal::from(2)),
            Some(Decimal::from(100)),
            Some(Decimal::from(20)),
        ),
        item(
            Some(Decimal::from(-1)),
            Some(Decimal::from(100)),
            Some(Decimal::from(20)),
        ),
    ];

    assert_eq!(compute_ht(&items), Decimal::from(100));
    assert_eq!(compute_vat(&items), Decimal::from(20));
}

#[test]
fn fractional_quantities() {
    let items = vec![item(
        Some(Decimal::new(25, 1)), // 2.5
        Some(Decimal::from(100)),
        None,
    )];

    assert_eq!(compute_ht(&items), Decimal::from(250));
}

#[test]
fn format_amount_rounds_to_two_decimals() {
    assert_eq!(format_amount(&Decimal::new(769923, 5)), "7.70");
    assert_eq!(format_amount(&Decimal::from(250)), "250.00");
    assert_eq!(format_amount(&Decimal::new(9999, 2)), "99.99");
    assert_eq!(format_amount(&Decimal::ZERO), "0.00");
}
