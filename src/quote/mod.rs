// SPDX-License-Identifier: MPL-2.0
//! The quote cart: session-scoped line items with fail-open persistence.

pub mod cart;
pub mod storage;

pub use cart::{QuoteCart, QuoteItem, SubscriptionId, MAX_QUANTITY_PER_PRODUCT, STORAGE_KEY};
pub use storage::{CartStorage, FileStorage, MemoryStorage};
