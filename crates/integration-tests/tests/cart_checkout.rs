//! Cart totals through the checkout flow.

#![allow(clippy::unwrap_used)]

use aurelia_core::{Money, ProductId};
use aurelia_integration_tests::{default_policy, seed_catalog};
use aurelia_storefront::cart::Cart;
use aurelia_storefront::checkout::{self, CheckoutContact, CheckoutError};
use rust_decimal::dec;
use serde_json::json;

fn contact() -> CheckoutContact {
    CheckoutContact {
        email: "noor@example.com".to_owned(),
        shipping_address: "4 Quay Street, Galway".to_owned(),
    }
}

/// `total == round(subtotal + tax + shipping, 2)` after every mutation
/// in a realistic add/update/remove sequence.
#[test]
fn totals_equation_holds_through_a_session() {
    let catalog = seed_catalog();
    let mut cart = Cart::new(default_policy());

    let studs = ProductId::new("diamond-stud-earrings");
    let hoops = ProductId::new("gold-hoop-earrings");
    let band = ProductId::new("classic-wedding-band");

    let check = |cart: &Cart| {
        let t = cart.totals();
        let expected = Money::new(
            t.subtotal.amount + t.tax.amount + t.shipping.amount,
            t.total.currency_code,
        )
        .round_to_cents();
        assert_eq!(t.total, expected);
    };

    cart.add(catalog.product(&studs).unwrap(), 2);
    check(&cart);
    cart.add(catalog.product(&hoops).unwrap(), 1);
    check(&cart);
    cart.add(catalog.product(&band).unwrap(), 1);
    check(&cart);
    cart.update_quantity(&studs, 5);
    check(&cart);
    cart.remove(&band);
    check(&cart);
    cart.update_quantity(&hoops, 0);
    check(&cart);
}

/// Adding the same product twice merges into one line with summed
/// quantity.
#[test]
fn merge_on_add_sums_quantities() {
    let catalog = seed_catalog();
    let mut cart = Cart::new(default_policy());
    let studs = ProductId::new("diamond-stud-earrings");

    cart.add(catalog.product(&studs).unwrap(), 2);
    cart.add(catalog.product(&studs).unwrap(), 3);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.totals().item_count, 5);
    // 5 x 45.99 = 229.95; over the free-shipping threshold.
    assert_eq!(cart.totals().subtotal.amount, dec!(229.95));
    assert_eq!(cart.totals().shipping.amount, dec!(0));
}

/// The full flow: build an order from the cart, apply the backend's
/// confirmation, and observe the cart cleared.
#[test]
fn checkout_clears_the_cart_on_confirmation() {
    let catalog = seed_catalog();
    let mut cart = Cart::new(default_policy());
    cart.add(
        catalog.product(&ProductId::new("gold-pendant-necklace")).unwrap(),
        1,
    );

    let request = checkout::build_order_request(&cart, &contact()).unwrap();
    assert_eq!(request.items.len(), 1);
    assert_eq!(request.total, cart.totals().total);

    // Simulated backend response.
    let payload = json!({"order": {"id": "ord-2024-118", "status": "confirmed"}});
    let confirmation = checkout::apply_confirmation(&mut cart, &payload).unwrap();

    assert_eq!(confirmation.status, "confirmed");
    assert!(cart.is_empty());
    assert_eq!(cart.totals().item_count, 0);
}

/// A failed order placement leaves the cart intact for retry by the
/// user (never automatic).
#[test]
fn failed_confirmation_preserves_the_cart() {
    let catalog = seed_catalog();
    let mut cart = Cart::new(default_policy());
    cart.add(
        catalog.product(&ProductId::new("silver-chain-necklace")).unwrap(),
        2,
    );

    let err = checkout::apply_confirmation(&mut cart, &json!({"error": "payment declined"}))
        .unwrap_err();
    assert!(matches!(err, CheckoutError::Remote(_)));
    assert_eq!(cart.totals().item_count, 2);
}

/// Free shipping boundary at the configured threshold.
#[test]
fn free_shipping_boundary_is_inclusive() {
    let catalog = seed_catalog();
    let policy = default_policy();

    // 2 x 49.99 = 99.98: below the threshold, flat fee applies.
    let mut below = Cart::new(policy.clone());
    below.add(
        catalog.product(&ProductId::new("silver-chain-necklace")).unwrap(),
        2,
    );
    assert_eq!(below.totals().subtotal.amount, dec!(99.98));
    assert_eq!(below.totals().shipping.amount, dec!(9.99));

    // 120.00 clears the threshold.
    let mut above = Cart::new(policy);
    above.add(
        catalog.product(&ProductId::new("gold-pendant-necklace")).unwrap(),
        1,
    );
    assert_eq!(above.totals().subtotal.amount, dec!(120.00));
    assert_eq!(above.totals().shipping.amount, dec!(0));
}
