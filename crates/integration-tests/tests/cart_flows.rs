//! End-to-end cart aggregator scenarios.
//!
//! These tests walk full shopping sessions through the aggregator the way
//! the route handlers do, without requiring a server or database.

use tangerine_core::{Cart, LineKey, NewLineItem, Price, ProductId};

fn shirt(size: &str) -> NewLineItem {
    NewLineItem {
        id: ProductId::new(10),
        name: "Linen shirt".to_owned(),
        price: Price::from_minor_units(4500),
        image: Some("/img/shirt.jpg".to_owned()),
        size: Some(size.to_owned()),
        color: None,
    }
}

fn tote() -> NewLineItem {
    NewLineItem {
        id: ProductId::new(20),
        name: "Canvas tote".to_owned(),
        price: Price::from_minor_units(1200),
        image: None,
        size: None,
        color: None,
    }
}

fn key_of(item: &NewLineItem) -> LineKey {
    item.key()
}

// =============================================================================
// Shopping Session Scenarios
// =============================================================================

#[test]
fn test_full_shopping_session() {
    let mut cart = Cart::new();

    // Browse, add a medium shirt twice and a tote once.
    cart.add(shirt("M"), None);
    cart.add(shirt("M"), None);
    cart.add(tote(), Some(1));

    assert_eq!(cart.line_count(), 2);
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.subtotal(), Price::from_minor_units(2 * 4500 + 1200));

    // Bump the tote to 3 via the quantity field.
    assert!(cart.set_quantity(&key_of(&tote()), 3));
    assert_eq!(cart.subtotal(), Price::from_minor_units(2 * 4500 + 3 * 1200));

    // Change of heart: drop the shirts.
    assert!(cart.remove(&key_of(&shirt("M"))));
    assert_eq!(cart.line_count(), 1);
    assert_eq!(cart.subtotal(), Price::from_minor_units(3 * 1200));
}

#[test]
fn test_stepper_controls_session() {
    let mut cart = Cart::new();
    cart.add(tote(), None);
    let key = key_of(&tote());

    // Click + three times, then - five times: the floor is 1.
    for _ in 0..3 {
        assert!(cart.adjust(&key, 1));
    }
    assert_eq!(cart.item_count(), 4);

    for _ in 0..5 {
        assert!(cart.adjust(&key, -1));
    }
    assert_eq!(cart.item_count(), 1);
    assert_eq!(cart.line_count(), 1);
}

#[test]
fn test_variants_shop_as_separate_lines() {
    let mut cart = Cart::new();
    cart.add(shirt("M"), None);
    cart.add(shirt("L"), None);
    cart.add(shirt("M"), Some(2));

    assert_eq!(cart.line_count(), 2);

    let m_key = key_of(&shirt("M"));
    let m_line = cart.items().iter().find(|i| i.key() == m_key).unwrap();
    assert_eq!(m_line.quantity, 3);

    // Removing one size leaves the other untouched.
    assert!(cart.remove(&m_key));
    assert_eq!(cart.line_count(), 1);
    assert_eq!(cart.items()[0].size.as_deref(), Some("L"));
}

#[test]
fn test_catalog_price_change_does_not_reprice_existing_line() {
    let mut cart = Cart::new();
    cart.add(shirt("M"), None);

    // The catalog repriced the shirt between two adds.
    let mut repriced = shirt("M");
    repriced.price = Price::from_minor_units(4900);
    cart.add(repriced, None);

    // The line keeps the price captured at first add.
    assert_eq!(cart.items()[0].price, Price::from_minor_units(4500));
    assert_eq!(cart.subtotal(), Price::from_minor_units(9000));
}

// =============================================================================
// Sign-in Merge Scenarios
// =============================================================================

/// Merging a guest cart into an account cart line-by-line, the way the
/// login flow replays guest lines through merge-add.
fn merge(account: &mut Cart, guest: Cart) {
    for item in guest.into_items() {
        let quantity = item.quantity;
        account.add(item.into(), Some(quantity));
    }
}

#[test]
fn test_sign_in_merges_guest_cart_into_account() {
    let mut account = Cart::new();
    account.add(shirt("M"), Some(1));

    let mut guest = Cart::new();
    guest.add(shirt("M"), Some(2));
    guest.add(tote(), None);

    merge(&mut account, guest);

    assert_eq!(account.line_count(), 2);
    let m_line = account
        .items()
        .iter()
        .find(|i| i.key() == key_of(&shirt("M")))
        .unwrap();
    assert_eq!(m_line.quantity, 3);
    assert_eq!(account.item_count(), 4);
}

#[test]
fn test_sign_in_merge_into_empty_account() {
    let mut account = Cart::new();

    let mut guest = Cart::new();
    guest.add(tote(), Some(2));

    merge(&mut account, guest);

    assert_eq!(account.line_count(), 1);
    assert_eq!(account.item_count(), 2);
    assert_eq!(account.subtotal(), Price::from_minor_units(2400));
}
