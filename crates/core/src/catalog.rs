//! The static product catalog.
//!
//! A [`Catalog`] is built once at startup, validated, and then only read.
//! Queries preserve declaration order and never fail: an unknown tag simply
//! matches nothing.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CurrencyCode, Price, ProductId, Tag};

/// Number of `includes` entries shown on a catalog card.
pub const INCLUDES_PREVIEW: usize = 4;

/// Label of the wildcard filter that matches every product.
pub const ALL_TAG: &str = "All";

/// Errors raised while validating catalog data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    #[error("product {0} must have a positive price")]
    NonPositivePrice(ProductId),

    #[error("product {id} compare-at price {compare_at} is below its price {price}")]
    CompareAtBelowPrice {
        id: ProductId,
        price: Decimal,
        compare_at: Decimal,
    },

    #[error("product {id} lists tag {tag} more than once")]
    DuplicateTag { id: ProductId, tag: Tag },

    #[error("product {0} uses the reserved tag \"All\"")]
    ReservedTag(ProductId),
}

/// Color family used to decorate a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Cranberry,
    Green,
    Gold,
    Chocolate,
}

impl Accent {
    /// Lowercase key, also used as the CSS modifier.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Cranberry => "cranberry",
            Self::Green => "green",
            Self::Gold => "gold",
            Self::Chocolate => "chocolate",
        }
    }
}

/// A purchasable gift box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at: Option<Decimal>,
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub accent: Accent,
}

impl Product {
    /// Whether the product carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// The first [`INCLUDES_PREVIEW`] entries of `includes`.
    #[must_use]
    pub fn includes_preview(&self) -> &[String] {
        let end = self.includes.len().min(INCLUDES_PREVIEW);
        self.includes.get(..end).unwrap_or_default()
    }

    /// Whether `includes` has entries beyond the preview.
    #[must_use]
    pub fn has_more_includes(&self) -> bool {
        self.includes.len() > INCLUDES_PREVIEW
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.price <= Decimal::ZERO {
            return Err(CatalogError::NonPositivePrice(self.id.clone()));
        }

        if let Some(compare_at) = self.compare_at {
            if compare_at < self.price {
                return Err(CatalogError::CompareAtBelowPrice {
                    id: self.id.clone(),
                    price: self.price,
                    compare_at,
                });
            }
        }

        let mut seen = HashSet::new();
        for tag in &self.tags {
            if tag.as_str() == ALL_TAG {
                return Err(CatalogError::ReservedTag(self.id.clone()));
            }
            if !seen.insert(tag) {
                return Err(CatalogError::DuplicateTag {
                    id: self.id.clone(),
                    tag: tag.clone(),
                });
            }
        }

        Ok(())
    }
}

/// A catalog filter: the "All" wildcard or a single tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TagFilter {
    #[default]
    All,
    Tag(Tag),
}

impl TagFilter {
    /// Parse a filter from a query value. Empty input and "All" select everything.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value == ALL_TAG {
            return Self::All;
        }
        Tag::new(value).map_or(Self::All, Self::Tag)
    }

    /// Display label of the filter.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_TAG,
            Self::Tag(tag) => tag.as_str(),
        }
    }

    /// Whether the filter admits `product`.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => product.has_tag(tag),
        }
    }
}

/// Shape of a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub currency: CurrencyCode,
    pub products: Vec<Product>,
}

/// The validated, read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    currency: CurrencyCode,
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating every product.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found, in declaration order.
    pub fn new(currency: CurrencyCode, products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        for product in &products {
            if !ids.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            product.validate()?;
        }

        Ok(Self { currency, products })
    }

    /// Currency used to display every price in the catalog.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// All products in declaration order.
    #[must_use]
    pub fn list_all(&self) -> &[Product] {
        &self.products
    }

    /// Products matching `filter`, in declaration order.
    ///
    /// [`TagFilter::All`] returns the full list without testing membership.
    #[must_use]
    pub fn list_by_tag(&self, filter: &TagFilter) -> Vec<&Product> {
        match filter {
            TagFilter::All => self.products.iter().collect(),
            TagFilter::Tag(_) => self.products.iter().filter(|p| filter.matches(p)).collect(),
        }
    }

    /// The "All" wildcard followed by every tag once, in first-seen order.
    #[must_use]
    pub fn tag_universe(&self) -> Vec<TagFilter> {
        let mut seen = HashSet::new();
        let mut universe = vec![TagFilter::All];
        for tag in self.products.iter().flat_map(|p| &p.tags) {
            if seen.insert(tag) {
                universe.push(TagFilter::Tag(tag.clone()));
            }
        }
        universe
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Display price of a product in the catalog currency.
    #[must_use]
    pub const fn price_of(&self, product: &Product) -> Price {
        Price::new(product.price, self.currency)
    }

    /// Display compare-at price of a product, when it has one.
    #[must_use]
    pub fn compare_at_of(&self, product: &Product) -> Option<Price> {
        product
            .compare_at
            .map(|amount| Price::new(amount, self.currency))
    }

    /// The built-in four-box holiday catalog.
    #[must_use]
    pub fn sample() -> Self {
        let products = vec![
            sample_product(
                "lux-holiday-1",
                "Luxury Holiday Cozy Box",
                189,
                Some(219),
                &["Holiday", "Premium"],
                &[
                    "Cashmere-blend throw",
                    "Gourmet fig jam",
                    "Honey in glass jar",
                    "Ceramic mug",
                    "Gingerbread plush with lights",
                    "Metal tea tin",
                    "Fireplace stocking",
                    "Ornaments & festive filler",
                ],
                Accent::Cranberry,
            ),
            sample_product(
                "classic-tea-1",
                "Classic Tea & Comfort",
                119,
                None,
                &["Classic"],
                &[
                    "Loose-leaf black tea",
                    "Honey dipper + honey",
                    "Stoneware mug",
                    "Butter cookies",
                    "Festive ornament",
                ],
                Accent::Green,
            ),
            sample_product(
                "chocolate-delight-1",
                "Chocolate Delight",
                99,
                None,
                &["Sweet", "Popular"],
                &[
                    "Assorted artisan chocolates",
                    "Cocoa mix",
                    "Candle (vanilla)",
                    "Holiday ribbon & filler",
                ],
                Accent::Chocolate,
            ),
            sample_product(
                "corporate-classic-1",
                "Corporate Classic (Bulk)",
                85,
                None,
                &["Corporate", "Bulk"],
                &[
                    "Branded card (optional)",
                    "Tea or coffee selection",
                    "Cookies",
                    "Festive ornament",
                ],
                Accent::Gold,
            ),
        ];

        // The sample data is fixed and covered by tests.
        Self {
            currency: CurrencyCode::USD,
            products,
        }
    }
}

impl TryFrom<CatalogData> for Catalog {
    type Error = CatalogError;

    fn try_from(data: CatalogData) -> Result<Self, Self::Error> {
        Self::new(data.currency, data.products)
    }
}

fn sample_product(
    id: &str,
    name: &str,
    price: i64,
    compare_at: Option<i64>,
    tags: &[&str],
    includes: &[&str],
    accent: Accent,
) -> Product {
    Product {
        id: ProductId(id.to_owned()),
        name: name.to_owned(),
        price: Decimal::from(price),
        compare_at: compare_at.map(Decimal::from),
        tags: tags.iter().map(|t| Tag((*t).to_owned())).collect(),
        includes: includes.iter().map(|i| (*i).to_owned()).collect(),
        accent,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tag(s: &str) -> Tag {
        Tag::new(s).unwrap()
    }

    fn product(id: &str, price: i64, tags: &[&str]) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            name: id.to_uppercase(),
            price: Decimal::from(price),
            compare_at: None,
            tags: tags.iter().map(|t| tag(t)).collect(),
            includes: Vec::new(),
            accent: Accent::default(),
        }
    }

    #[test]
    fn test_sample_is_valid() {
        let sample = Catalog::sample();
        let rebuilt = Catalog::new(sample.currency(), sample.list_all().to_vec());
        assert!(rebuilt.is_ok());
        assert_eq!(sample.list_all().len(), 4);
    }

    #[test]
    fn test_list_by_tag_all_returns_everything_in_order() {
        let catalog = Catalog::sample();
        let ids: Vec<_> = catalog
            .list_by_tag(&TagFilter::All)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(
            ids,
            [
                "lux-holiday-1",
                "classic-tea-1",
                "chocolate-delight-1",
                "corporate-classic-1"
            ]
        );
    }

    #[test]
    fn test_list_by_tag_bulk() {
        let catalog = Catalog::sample();
        let bulk = catalog.list_by_tag(&TagFilter::parse("Bulk"));
        assert_eq!(bulk.len(), 1);
        assert_eq!(bulk.first().unwrap().name, "Corporate Classic (Bulk)");
    }

    #[test]
    fn test_list_by_tag_unknown_is_empty() {
        let catalog = Catalog::sample();
        assert!(catalog.list_by_tag(&TagFilter::parse("Easter")).is_empty());
    }

    #[test]
    fn test_every_universe_tag_filters_to_members() {
        let catalog = Catalog::sample();
        for filter in catalog.tag_universe() {
            let TagFilter::Tag(t) = &filter else {
                continue;
            };
            let matches = catalog.list_by_tag(&filter);
            assert!(!matches.is_empty(), "tag {t} matches nothing");
            assert!(matches.iter().all(|p| p.has_tag(t)));
        }
    }

    #[test]
    fn test_tag_universe_order() {
        let catalog = Catalog::new(
            CurrencyCode::USD,
            vec![
                product("a", 10, &["Sweet", "Holiday"]),
                product("b", 10, &["Holiday", "Bulk"]),
            ],
        )
        .unwrap();
        let labels: Vec<_> = catalog
            .tag_universe()
            .iter()
            .map(|f| f.label().to_owned())
            .collect();
        assert_eq!(labels, ["All", "Sweet", "Holiday", "Bulk"]);
    }

    #[test]
    fn test_tag_filter_parse() {
        assert_eq!(TagFilter::parse("All"), TagFilter::All);
        assert_eq!(TagFilter::parse(""), TagFilter::All);
        assert_eq!(TagFilter::parse(" Sweet "), TagFilter::Tag(tag("Sweet")));
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let err = Catalog::new(
            CurrencyCode::USD,
            vec![product("a", 10, &["X"]), product("a", 12, &["Y"])],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(_)));
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let err = Catalog::new(CurrencyCode::USD, vec![product("a", 0, &["X"])]).unwrap_err();
        assert!(matches!(err, CatalogError::NonPositivePrice(_)));
    }

    #[test]
    fn test_rejects_compare_at_below_price() {
        let mut p = product("a", 100, &["X"]);
        p.compare_at = Some(Decimal::from(90));
        let err = Catalog::new(CurrencyCode::USD, vec![p]).unwrap_err();
        assert!(matches!(err, CatalogError::CompareAtBelowPrice { .. }));
    }

    #[test]
    fn test_accepts_compare_at_equal_to_price() {
        let mut p = product("a", 100, &["X"]);
        p.compare_at = Some(Decimal::from(100));
        assert!(Catalog::new(CurrencyCode::USD, vec![p]).is_ok());
    }

    #[test]
    fn test_rejects_duplicate_and_reserved_tags() {
        let err =
            Catalog::new(CurrencyCode::USD, vec![product("a", 10, &["X", "X"])]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTag { .. }));

        let err = Catalog::new(CurrencyCode::USD, vec![product("a", 10, &["All"])]).unwrap_err();
        assert!(matches!(err, CatalogError::ReservedTag(_)));
    }

    #[test]
    fn test_includes_preview() {
        let catalog = Catalog::sample();
        let lux = catalog.get("lux-holiday-1").unwrap();
        assert_eq!(lux.includes_preview().len(), INCLUDES_PREVIEW);
        assert!(lux.has_more_includes());

        let choco = catalog.get("chocolate-delight-1").unwrap();
        assert_eq!(choco.includes_preview().len(), 4);
        assert!(!choco.has_more_includes());
    }

    #[test]
    fn test_display_prices() {
        let catalog = Catalog::sample();
        let lux = catalog.get("lux-holiday-1").unwrap();
        assert_eq!(catalog.price_of(lux).to_string(), "$189");
        assert_eq!(catalog.compare_at_of(lux).unwrap().to_string(), "$219");
    }

    #[test]
    fn test_catalog_data_deserializes_numbers() {
        let json = r#"{
            "products": [
                {"id": "x", "name": "X", "price": 12, "tags": ["Sweet"], "accent": "gold"}
            ]
        }"#;
        let data: CatalogData = serde_json::from_str(json).unwrap();
        let catalog = Catalog::try_from(data).unwrap();
        assert_eq!(catalog.currency(), CurrencyCode::USD);
        assert_eq!(catalog.get("x").unwrap().accent, Accent::Gold);
    }
}
