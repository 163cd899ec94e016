//! Cart/wishlist round-trips through the file store.

#![allow(clippy::unwrap_used)]

use aurelia_core::ProductId;
use aurelia_integration_tests::{default_policy, seed_catalog};
use aurelia_storefront::cart::Cart;
use aurelia_storefront::storage::{self, FileStore, StateStore, CART_KEY};
use aurelia_storefront::wishlist::Wishlist;

/// Serialize, drop in-memory state, reload: same item list, recomputed
/// totals.
#[test]
fn cart_round_trip_reproduces_items_and_totals() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();
    let catalog = seed_catalog();
    let policy = default_policy();

    let mut cart = Cart::new(policy.clone());
    cart.add(
        catalog.product(&ProductId::new("sapphire-halo-ring")).unwrap(),
        1,
    );
    cart.add(
        catalog.product(&ProductId::new("leather-cord-bracelet")).unwrap(),
        3,
    );
    storage::save_cart(&store, &cart).unwrap();
    let expected_items = cart.items().to_vec();
    let expected_totals = cart.totals().clone();
    drop(cart);

    let reloaded = storage::load_cart(&store, &policy).unwrap();
    assert_eq!(reloaded.items(), expected_items.as_slice());
    assert_eq!(reloaded.totals(), &expected_totals);
}

/// Cart and wishlist persist under independent keys; clearing one does
/// not touch the other.
#[test]
fn cart_and_wishlist_keys_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();
    let catalog = seed_catalog();
    let policy = default_policy();

    let mut cart = Cart::new(policy.clone());
    cart.add(catalog.products().first().unwrap(), 1);
    storage::save_cart(&store, &cart).unwrap();

    let mut wishlist = Wishlist::new();
    wishlist.add(catalog.products().last().unwrap());
    storage::save_wishlist(&store, &wishlist).unwrap();

    store.remove(CART_KEY).unwrap();

    assert!(storage::load_cart(&store, &policy).unwrap().is_empty());
    assert_eq!(storage::load_wishlist(&store).unwrap(), wishlist);
}

/// Corrupt state degrades to empty rather than failing; the next save
/// overwrites the corrupt snapshot (last write wins).
#[test]
fn corrupt_state_recovers_on_next_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();
    let catalog = seed_catalog();
    let policy = default_policy();

    store.save(CART_KEY, "{\"items\": \"definitely not\"").unwrap();
    let mut cart = storage::load_cart(&store, &policy).unwrap();
    assert!(cart.is_empty());

    cart.add(catalog.products().first().unwrap(), 1);
    storage::save_cart(&store, &cart).unwrap();

    let reloaded = storage::load_cart(&store, &policy).unwrap();
    assert_eq!(reloaded.items().len(), 1);
}
