// SPDX-License-Identifier: MPL-2.0
//! Quote submission adapter.
//!
//! Converts the cart's line items plus contact details into the JSON
//! payload the sales endpoint expects and posts it over HTTPS. On failure
//! the cart is left untouched so the user can retry without re-entering
//! items; only the caller clears it after confirmed success.

use crate::error::{Error, Result};
use crate::quote::QuoteItem;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const USER_AGENT: &str = "PacificQuote/0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub product_name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub total_items: u32,
    pub total_unique_products: usize,
    pub submitted_at: String,
}

/// The outbound quote request, serialized field-for-field as the endpoint
/// expects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequestPayload {
    pub contact_info: ContactInfo,
    pub quote_items: Vec<QuoteLine>,
    pub metadata: Metadata,
    pub agreed_to_contact: bool,
}

#[derive(Debug, Deserialize)]
struct SubmissionResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Builds the payload from the current cart contents.
///
/// `product_names` maps slugs to English display names; a missing entry
/// falls back to the slug itself so a stale name map never blocks a quote.
pub fn build_payload(
    items: &[QuoteItem],
    contact: ContactInfo,
    agreed_to_contact: bool,
    product_names: &HashMap<String, String>,
) -> QuoteRequestPayload {
    build_payload_at(items, contact, agreed_to_contact, product_names, Utc::now())
}

/// [`build_payload`] with an explicit submission instant, for deterministic
/// tests.
pub fn build_payload_at(
    items: &[QuoteItem],
    contact: ContactInfo,
    agreed_to_contact: bool,
    product_names: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> QuoteRequestPayload {
    let quote_items = items
        .iter()
        .map(|item| QuoteLine {
            product_name: format!(
                "{} ({})",
                product_names
                    .get(&item.product.slug)
                    .map(String::as_str)
                    .unwrap_or(&item.product.slug),
                item.product.overall_size
            ),
            quantity: item.quantity,
        })
        .collect();

    let metadata = Metadata {
        total_items: items.iter().map(|item| item.quantity).sum(),
        total_unique_products: items.len(),
        submitted_at: format_submitted_at(now),
    };

    QuoteRequestPayload {
        contact_info: contact,
        quote_items,
        metadata,
        agreed_to_contact,
    }
}

/// Formats the submission instant as `MM/DD/YYYY, hh:mm AM|PM` in US
/// Pacific time.
///
/// Deliberately not ISO-8601: the downstream consumer of the payload
/// expects exactly this human-readable string.
pub fn format_submitted_at(now: DateTime<Utc>) -> String {
    let offset_hours = if in_us_dst(now) { -7 } else { -8 };
    let offset = FixedOffset::east_opt(offset_hours * 3600).expect("fixed offset in range");
    now.with_timezone(&offset).format("%m/%d/%Y, %I:%M %p").to_string()
}

// US daylight saving window: 02:00 local on the second Sunday of March
// through 02:00 local on the first Sunday of November. For Pacific time
// that is 10:00 UTC (02:00 PST) and 09:00 UTC (02:00 PDT).
fn in_us_dst(now: DateTime<Utc>) -> bool {
    let year = now.year();
    let Some(start_day) = NaiveDate::from_weekday_of_month_opt(year, 3, Weekday::Sun, 2) else {
        return false;
    };
    let Some(end_day) = NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Sun, 1) else {
        return false;
    };
    let start = start_day.and_hms_opt(10, 0, 0).map(|dt| dt.and_utc());
    let end = end_day.and_hms_opt(9, 0, 0).map(|dt| dt.and_utc());
    match (start, end) {
        (Some(start), Some(end)) => now >= start && now < end,
        _ => false,
    }
}

/// Posts the payload to the quote endpoint.
///
/// A non-success HTTP status or a `{ "success": false }` response body is
/// an [`Error::Submission`].
pub async fn submit(url: &str, payload: &QuoteRequestPayload) -> Result<()> {
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

    let response = client.post(url).json(payload).send().await?;

    if !response.status().is_success() {
        return Err(Error::Submission(format!(
            "HTTP status: {}",
            response.status()
        )));
    }

    let body: SubmissionResponse = response.json().await?;
    if !body.success {
        return Err(Error::Submission(
            body.error
                .unwrap_or_else(|| "quote endpoint reported failure".to_string()),
        ));
    }

    Ok(())
}
