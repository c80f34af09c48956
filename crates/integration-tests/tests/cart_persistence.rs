//! Cart snapshot persistence behavior.
//!
//! The session store keeps carts as JSON snapshots; these tests pin the
//! wire shape and the version-gated restore path.

use tangerine_core::{Cart, CartSnapshot, NewLineItem, Price, ProductId, SNAPSHOT_VERSION};

fn mug() -> NewLineItem {
    NewLineItem {
        id: ProductId::new(3),
        name: "Ceramic mug".to_owned(),
        price: Price::from_minor_units(1800),
        image: None,
        size: None,
        color: Some("sand".to_owned()),
    }
}

#[test]
fn test_snapshot_json_shape() {
    let mut cart = Cart::new();
    cart.add(mug(), Some(2));

    let snapshot = CartSnapshot::capture(&cart);
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["version"], SNAPSHOT_VERSION);
    assert_eq!(json["items"][0]["id"], 3);
    assert_eq!(json["items"][0]["quantity"], 2);
    assert_eq!(json["items"][0]["price"], 1800);
    assert_eq!(json["items"][0]["color"], "sand");
    // Absent variant fields are omitted entirely, not serialized as null.
    assert!(json["items"][0].get("size").is_none());
}

#[test]
fn test_mutate_persist_rehydrate_cycle() {
    let mut cart = Cart::new();
    cart.add(mug(), None);

    // Every mutation writes the full snapshot; simulate two cycles.
    let stored = serde_json::to_string(&CartSnapshot::capture(&cart)).unwrap();
    let mut rehydrated: Cart = serde_json::from_str::<CartSnapshot>(&stored)
        .unwrap()
        .restore();
    assert_eq!(rehydrated, cart);

    rehydrated.add(mug(), Some(4));
    let stored = serde_json::to_string(&CartSnapshot::capture(&rehydrated)).unwrap();
    let again: Cart = serde_json::from_str::<CartSnapshot>(&stored)
        .unwrap()
        .restore();

    assert_eq!(again.line_count(), 1);
    assert_eq!(again.item_count(), 5);
}

#[test]
fn test_future_version_restores_empty_instead_of_guessing() {
    let json = format!(
        r#"{{"version":{},"items":[{{"id":3,"name":"Ceramic mug","price":1800,"quantity":2}}]}}"#,
        SNAPSHOT_VERSION + 1
    );
    let snapshot: CartSnapshot = serde_json::from_str(&json).unwrap();
    assert!(snapshot.restore().is_empty());
}

#[test]
fn test_missing_optional_fields_deserialize() {
    // A minimal stored line from a client that never set variants.
    let json = r#"{"version":1,"items":[{"id":7,"name":"Wool beanie","price":2200,"quantity":1}]}"#;
    let snapshot: CartSnapshot = serde_json::from_str(json).unwrap();
    let cart = snapshot.restore();

    assert_eq!(cart.line_count(), 1);
    assert_eq!(cart.items()[0].size, None);
    assert_eq!(cart.items()[0].color, None);
    assert_eq!(cart.items()[0].image, None);
}
