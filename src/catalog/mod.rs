// SPDX-License-Identifier: MPL-2.0
//! Bundled product catalog.
//!
//! Product records are shipped with the binary as embedded JSON and are
//! immutable at runtime. The quote cart copies a full [`Product`] into each
//! line item at add time, so the serde field names here are also the wire
//! shape of the persisted cart blob.

use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(RustEmbed)]
#[folder = "assets/data/"]
struct Asset;

const PRODUCTS_FILE: &str = "products.json";
const CATEGORIES_FILE: &str = "categories.json";
const NAMES_FILE: &str = "product-names.en.json";

/// Closed set of catalog categories, kebab-case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryKey {
    TraditionalStaples,
    Desserts,
    FrozenFoods,
    Beverages,
    Snacks,
    Seasonings,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 6] = [
        CategoryKey::TraditionalStaples,
        CategoryKey::Desserts,
        CategoryKey::FrozenFoods,
        CategoryKey::Beverages,
        CategoryKey::Snacks,
        CategoryKey::Seasonings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::TraditionalStaples => "traditional-staples",
            CategoryKey::Desserts => "desserts",
            CategoryKey::FrozenFoods => "frozen-foods",
            CategoryKey::Beverages => "beverages",
            CategoryKey::Snacks => "snacks",
            CategoryKey::Seasonings => "seasonings",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CategoryKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::Catalog(format!("unknown category key: {}", s)))
    }
}

/// One immutable catalog record.
///
/// Field names serialize in camelCase to stay compatible with persisted
/// cart blobs written by earlier deployments of the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub slug: String,
    pub item_number: String,
    pub unit_per_pack: u32,
    pub overall_size: String,
    pub image_url: String,
    pub category_key: CategoryKey,
    #[serde(default)]
    pub featured: bool,
}

/// The loaded catalog: products, category images, and English display names.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    category_images: HashMap<CategoryKey, String>,
    english_names: HashMap<String, String>,
}

impl Catalog {
    /// Parses the embedded catalog data.
    ///
    /// The bundled files are curated at build time, so any parse failure is
    /// a packaging bug and surfaces as [`Error::Catalog`] rather than being
    /// silently filtered.
    pub fn load() -> Result<Self> {
        let products: Vec<Product> = serde_json::from_str(&embedded(PRODUCTS_FILE)?)
            .map_err(|e| Error::Catalog(format!("{}: {}", PRODUCTS_FILE, e)))?;
        let category_images: HashMap<CategoryKey, String> =
            serde_json::from_str(&embedded(CATEGORIES_FILE)?)
                .map_err(|e| Error::Catalog(format!("{}: {}", CATEGORIES_FILE, e)))?;
        let english_names: HashMap<String, String> = serde_json::from_str(&embedded(NAMES_FILE)?)
            .map_err(|e| Error::Catalog(format!("{}: {}", NAMES_FILE, e)))?;

        Ok(Self {
            products,
            category_images,
            english_names,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    pub fn featured_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    pub fn products_by_category(&self, key: CategoryKey) -> Vec<&Product> {
        self.products.iter().filter(|p| p.category_key == key).collect()
    }

    /// Distinct categories in first-seen catalog order.
    pub fn categories(&self) -> Vec<CategoryKey> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category_key) {
                seen.push(product.category_key);
            }
        }
        seen
    }

    pub fn category_image(&self, key: CategoryKey) -> Option<&str> {
        self.category_images.get(&key).map(String::as_str)
    }

    pub fn english_name(&self, slug: &str) -> Option<&str> {
        self.english_names.get(slug).map(String::as_str)
    }

    /// Slug to English display name map, as consumed by the submission adapter.
    pub fn english_names(&self) -> &HashMap<String, String> {
        &self.english_names
    }
}

fn embedded(name: &str) -> Result<String> {
    let file =
        Asset::get(name).ok_or_else(|| Error::Catalog(format!("missing bundled file: {}", name)))?;
    Ok(String::from_utf8_lossy(file.data.as_ref()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_parses_bundled_catalog() {
        let catalog = Catalog::load().expect("bundled catalog should parse");
        assert!(!catalog.products().is_empty());
    }

    #[test]
    fn product_lookup_by_slug() {
        let catalog = Catalog::load().unwrap();
        let product = catalog.product_by_slug("poi-fresh").expect("known slug");
        assert_eq!(product.category_key, CategoryKey::TraditionalStaples);
        assert!(catalog.product_by_slug("no-such-product").is_none());
    }

    #[test]
    fn every_product_has_an_english_name_and_category_image() {
        let catalog = Catalog::load().unwrap();
        for product in catalog.products() {
            assert!(
                catalog.english_name(&product.slug).is_some(),
                "missing name for {}",
                product.slug
            );
            assert!(
                catalog.category_image(product.category_key).is_some(),
                "missing category image for {}",
                product.category_key
            );
        }
    }

    #[test]
    fn categories_are_distinct_and_in_first_seen_order() {
        let catalog = Catalog::load().unwrap();
        let categories = catalog.categories();
        assert!(!categories.is_empty());
        for (i, key) in categories.iter().enumerate() {
            assert!(!categories[..i].contains(key), "duplicate category {}", key);
        }

        let mut expected = Vec::new();
        for product in catalog.products() {
            if !expected.contains(&product.category_key) {
                expected.push(product.category_key);
            }
        }
        assert_eq!(categories, expected);
    }

    #[test]
    fn featured_products_are_a_subset() {
        let catalog = Catalog::load().unwrap();
        let featured = catalog.featured_products();
        assert!(!featured.is_empty());
        assert!(featured.len() < catalog.products().len());
        assert!(featured.iter().all(|p| p.featured));
    }

    #[test]
    fn category_key_round_trips_through_strings() {
        for key in CategoryKey::ALL {
            let parsed: CategoryKey = key.as_str().parse().unwrap();
            assert_eq!(parsed, key);
        }
        assert!("fresh-fish".parse::<CategoryKey>().is_err());
    }

    #[test]
    fn product_serializes_with_camel_case_fields() {
        let catalog = Catalog::load().unwrap();
        let product = catalog.product_by_slug("taro-chips").unwrap();
        let value = serde_json::to_value(product).unwrap();
        assert!(value.get("itemNumber").is_some());
        assert!(value.get("unitPerPack").is_some());
        assert!(value.get("overallSize").is_some());
        assert!(value.get("categoryKey").is_some());
        assert_eq!(value["categoryKey"], "snacks");
    }
}
