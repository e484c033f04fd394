// SPDX-License-Identifier: MPL-2.0
//! `pacific_quote` is the quote-request core of a wholesale food
//! distributor's product-catalog application.
//!
//! It provides the session quote cart with fail-open local persistence,
//! the bundled product catalog the cart references, and the adapter that
//! turns cart contents into an outbound quote-request payload.

pub mod catalog;
pub mod config;
pub mod error;
pub mod paths;
pub mod quote;
pub mod submission;
