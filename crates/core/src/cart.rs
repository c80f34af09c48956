//! The cart aggregator.
//!
//! Owns an ordered collection of line items and exposes the mutation and
//! query operations with deterministic merge semantics. Two line items are
//! the *same line* exactly when their [`LineKey`] (product id plus optional
//! size/color variant) matches; adding a matching candidate merges
//! quantities and keeps every other field of the existing line, including
//! its denormalized name and price.
//!
//! The aggregator is pure in-memory state. Persistence happens through
//! [`CartSnapshot`], a versioned serialized shape, so the stored form can
//! evolve without corrupting rehydrated carts.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Version tag written into every persisted snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// One product selection in a cart.
///
/// `name`, `price`, and `image` are denormalized copies taken from the
/// catalog when the line was first added; they are never refreshed by later
/// merges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identity.
    pub id: ProductId,
    /// Display label, captured at add time.
    pub name: String,
    /// Unit price in minor currency units, captured at add time.
    pub price: Price,
    /// Line quantity; always at least 1.
    pub quantity: u32,
    /// Optional display image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Optional size variant discriminator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Optional color variant discriminator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LineItem {
    /// The identity key for this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            id: self.id,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }
}

/// The identity key of a line: product id plus variant discriminators.
///
/// `{id: 1}` and `{id: 1, size: "L"}` are distinct lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    /// Product identity.
    pub id: ProductId,
    /// Optional size variant discriminator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Optional color variant discriminator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A candidate line item: everything but the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    /// Product identity.
    pub id: ProductId,
    /// Display label.
    pub name: String,
    /// Unit price in minor currency units.
    pub price: Price,
    /// Optional display image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Optional size variant discriminator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Optional color variant discriminator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NewLineItem {
    /// The identity key this candidate would merge under.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            id: self.id,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }
}

impl From<LineItem> for NewLineItem {
    /// Strip the quantity off an existing line, leaving a candidate that
    /// merges back under the same key.
    fn from(item: LineItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            image: item.image,
            size: item.size,
            color: item.color,
        }
    }
}

/// An ordered collection of line items, insertion order preserved.
///
/// Mutations are synchronous single-step state replacements; none of them
/// can fail on well-formed input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a candidate line item, merging into an existing line when the
    /// identity key matches.
    ///
    /// `quantity` defaults to 1 when absent or zero. On a merge only the
    /// quantity changes; the existing line's denormalized name, price, and
    /// image win over the candidate's.
    pub fn add(&mut self, candidate: NewLineItem, quantity: Option<u32>) {
        let added = match quantity {
            Some(q) if q > 0 => q,
            _ => 1,
        };

        let key = candidate.key();
        if let Some(existing) = self.items.iter_mut().find(|item| item.key() == key) {
            existing.quantity = existing.quantity.saturating_add(added);
        } else {
            self.items.push(LineItem {
                id: candidate.id,
                name: candidate.name,
                price: candidate.price,
                quantity: added,
                image: candidate.image,
                size: candidate.size,
                color: candidate.color,
            });
        }
    }

    /// Remove the line matching `key`.
    ///
    /// Returns `true` if a line was removed; no-op when absent.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.key() != *key);
        self.items.len() != before
    }

    /// Set the quantity of the line matching `key` directly.
    ///
    /// A `quantity` below 1 rejects the whole call: the cart is left
    /// unchanged and `false` is returned. This is deliberately different
    /// from [`Cart::adjust`], which clamps.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) -> bool {
        if quantity < 1 {
            return false;
        }
        match self.items.iter_mut().find(|item| item.key() == *key) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Adjust the quantity of the line matching `key` by `delta`, clamping
    /// at 1. This backs the paired increment/decrement controls: a
    /// decrement at quantity 1 is a no-op, never zero or negative.
    ///
    /// Returns `true` if the line exists.
    pub fn adjust(&mut self, key: &LineKey, delta: i64) -> bool {
        match self.items.iter_mut().find(|item| item.key() == *key) {
            Some(item) => {
                let next = i64::from(item.quantity).saturating_add(delta).max(1);
                item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
                true
            }
            None => false,
        }
    }

    /// Order subtotal: Σ(price × quantity) over all lines.
    ///
    /// Recomputed on demand, never cached. An empty cart totals zero.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().fold(Price::ZERO, |acc, item| {
            acc.saturating_add(item.price.saturating_mul_quantity(item.quantity))
        })
    }

    /// Total unit count across all lines, for the badge display.
    ///
    /// Distinct from [`Cart::line_count`], the number of distinct lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the cart and return its lines.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }
}

impl FromIterator<LineItem> for Cart {
    fn from_iter<T: IntoIterator<Item = LineItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// The versioned persisted shape of a cart.
///
/// Written in full after every mutation (write-through) and rehydrated at
/// startup. A snapshot with an unknown version restores as an empty cart
/// rather than guessing at the old layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Snapshot layout version; see [`SNAPSHOT_VERSION`].
    pub version: u32,
    /// The persisted lines.
    pub items: Vec<LineItem>,
}

impl CartSnapshot {
    /// Capture the current cart state for persistence.
    #[must_use]
    pub fn capture(cart: &Cart) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            items: cart.items.clone(),
        }
    }

    /// Restore a cart from a snapshot.
    ///
    /// Unknown versions restore empty.
    #[must_use]
    pub fn restore(self) -> Cart {
        if self.version == SNAPSHOT_VERSION {
            Cart { items: self.items }
        } else {
            Cart::new()
        }
    }
}
