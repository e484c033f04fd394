// SPDX-License-Identifier: MPL-2.0
//! The in-memory quote cart and its mutation API.
//!
//! The cart is the single writer for the session's line items. It hydrates
//! once from persisted storage at construction and persists the whole
//! collection after every content-changing mutation. Persistence is
//! best-effort: in-memory state stays authoritative for the running
//! session, and a failed write is simply lost until the next mutation
//! triggers another attempt.
//!
//! Corrupt persisted data is fail open by contract: a blob that does not
//! parse as a list of line items is discarded and treated exactly like "no
//! data present". It never aborts startup.

use super::storage::CartStorage;
use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Upper bound on a single line item's quantity.
pub const MAX_QUANTITY_PER_PRODUCT: u32 = 999;

/// The one persisted-storage key the cart owns.
pub const STORAGE_KEY: &str = "pacific-foods-quote-cart";

/// One (product, quantity) pair in the cart.
///
/// Carries a full copy of the product as it existed at add time; it is
/// never revalidated against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteItem {
    pub product: Product,
    pub quantity: u32,
}

/// Handle returned by [`QuoteCart::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&[QuoteItem])>;

/// Session-scoped quote cart backed by a [`CartStorage`] blob.
///
/// There is exactly one writer path (the mutation methods below) and
/// arbitrarily many readers. UI layers observe changes through
/// [`QuoteCart::subscribe`] rather than through any ambient singleton.
pub struct QuoteCart<S: CartStorage> {
    items: Vec<QuoteItem>,
    storage: S,
    hydrated: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: CartStorage> QuoteCart<S> {
    /// Creates the cart and hydrates it from `storage`.
    ///
    /// Construction never writes: an empty in-memory cart must not
    /// overwrite a previously saved blob during startup.
    pub fn new(storage: S) -> Self {
        let mut cart = Self {
            items: Vec::new(),
            storage,
            hydrated: false,
            listeners: Vec::new(),
            next_subscription: 0,
        };
        cart.hydrate();
        cart
    }

    fn hydrate(&mut self) {
        match self.storage.read(STORAGE_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<QuoteItem>>(&blob) {
                Ok(items) => self.items = items,
                Err(error) => {
                    eprintln!("Discarding unreadable quote cart blob: {}", error);
                }
            },
            Ok(None) => {}
            Err(error) => {
                eprintln!("Failed to load quote cart: {}", error);
            }
        }
        self.hydrated = true;
    }

    /// Adds one unit of `product`.
    ///
    /// A new slug appends a line item with quantity 1; an existing slug
    /// increments. At [`MAX_QUANTITY_PER_PRODUCT`] the call is a silent
    /// no-op: nothing is persisted and no listener fires.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.slug == product.slug)
        {
            if item.quantity >= MAX_QUANTITY_PER_PRODUCT {
                return;
            }
            item.quantity += 1;
        } else {
            self.items.push(QuoteItem {
                product: product.clone(),
                quantity: 1,
            });
        }
        self.on_change();
    }

    /// Removes the line item for `slug`. No-op, not an error, if absent.
    pub fn remove_item(&mut self, slug: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.product.slug != slug);
        if self.items.len() != before {
            self.on_change();
        }
    }

    /// Sets the quantity for `slug`, clamped to [`MAX_QUANTITY_PER_PRODUCT`].
    ///
    /// A clamped value of zero or below removes the line item entirely; a
    /// zero-quantity entry is never representable. No-op if `slug` is not
    /// in the cart.
    pub fn update_quantity(&mut self, slug: &str, quantity: i64) {
        let Some(pos) = self.items.iter().position(|item| item.product.slug == slug) else {
            return;
        };
        if quantity <= 0 {
            self.items.remove(pos);
        } else {
            self.items[pos].quantity = quantity.min(i64::from(MAX_QUANTITY_PER_PRODUCT)) as u32;
        }
        self.on_change();
    }

    /// Empties the cart unconditionally and persists the empty collection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.on_change();
    }

    /// Whether a line item for `slug` exists. Pure query.
    pub fn is_in_cart(&self, slug: &str) -> bool {
        self.items.iter().any(|item| item.product.slug == slug)
    }

    /// Sum of all quantities, recomputed on every call.
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[QuoteItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Registers a change listener; it receives the post-mutation items.
    pub fn subscribe(&mut self, listener: impl Fn(&[QuoteItem]) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a previously registered listener. No-op for stale handles.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn on_change(&mut self) {
        self.persist();
        for (_, listener) in &self.listeners {
            listener(&self.items);
        }
    }

    fn persist(&mut self) {
        if !self.hydrated {
            return;
        }
        let blob = match serde_json::to_string(&self.items) {
            Ok(blob) => blob,
            Err(error) => {
                eprintln!("Failed to serialize quote cart: {}", error);
                return;
            }
        };
        if let Err(error) = self.storage.write(STORAGE_KEY, &blob) {
            eprintln!("Failed to save quote cart: {}", error);
        }
    }
}
