//! Catalog grid route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use sole_gifts_core::{Catalog, Product, TagFilter};
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

// =============================================================================
// Views
// =============================================================================

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub compare_at: Option<String>,
    pub tags: Vec<String>,
    pub includes: Vec<String>,
    pub more_includes: bool,
    pub accent: &'static str,
}

impl ProductView {
    /// Build the card for `product`, with prices in the catalog currency.
    #[must_use]
    pub fn new(catalog: &Catalog, product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: catalog.price_of(product).to_string(),
            compare_at: catalog.compare_at_of(product).map(|p| p.to_string()),
            tags: product.tags.iter().map(ToString::to_string).collect(),
            includes: product.includes_preview().to_vec(),
            more_includes: product.has_more_includes(),
            accent: product.accent.key(),
        }
    }
}

/// A filter chip above the grid.
#[derive(Clone)]
pub struct TagChipView {
    pub label: String,
    pub href: String,
    pub active: bool,
}

fn tag_chips(catalog: &Catalog, active: &TagFilter) -> Vec<TagChipView> {
    catalog
        .tag_universe()
        .into_iter()
        .map(|filter| TagChipView {
            label: filter.label().to_string(),
            href: match &filter {
                TagFilter::All => "/".to_string(),
                TagFilter::Tag(tag) => format!("/?tag={}", urlencoding::encode(tag.as_str())),
            },
            active: &filter == active,
        })
        .collect()
}

fn product_cards(catalog: &Catalog, filter: &TagFilter) -> Vec<ProductView> {
    catalog
        .list_by_tag(filter)
        .into_iter()
        .map(|product| ProductView::new(catalog, product))
        .collect()
}

// =============================================================================
// Handlers
// =============================================================================

/// Tag filter query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct TagQuery {
    pub tag: Option<String>,
}

impl TagQuery {
    fn filter(&self) -> TagFilter {
        self.tag.as_deref().map_or(TagFilter::All, TagFilter::parse)
    }
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogIndexTemplate {
    pub chips: Vec<TagChipView>,
    pub products: Vec<ProductView>,
    pub active_tag: String,
}

/// Product grid fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductView>,
    pub active_tag: String,
}

/// Display the catalog grid, optionally filtered by `?tag=`.
///
/// A tag no product carries yields an empty grid.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<TagQuery>) -> CatalogIndexTemplate {
    let catalog = state.catalog();
    let filter = query.filter();

    CatalogIndexTemplate {
        chips: tag_chips(catalog, &filter),
        products: product_cards(catalog, &filter),
        active_tag: filter.label().to_string(),
    }
}

/// Grid fragment for partial page updates.
#[instrument(skip(state))]
pub async fn grid(State(state): State<AppState>, Query(query): Query<TagQuery>) -> ProductGridTemplate {
    let filter = query.filter();

    ProductGridTemplate {
        products: product_cards(state.catalog(), &filter),
        active_tag: filter.label().to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sole_gifts_core::ProductId;

    use super::*;

    #[test]
    fn test_product_view_truncates_includes() {
        let catalog = Catalog::sample();
        let view = ProductView::new(&catalog, catalog.get("lux-holiday-1").unwrap());
        assert_eq!(view.price, "$189");
        assert_eq!(view.compare_at.as_deref(), Some("$219"));
        assert_eq!(view.includes.len(), 4);
        assert!(view.more_includes);
        assert_eq!(view.accent, "cranberry");
    }

    #[test]
    fn test_tag_chips_mark_active() {
        let catalog = Catalog::sample();
        let chips = tag_chips(&catalog, &TagFilter::parse("Bulk"));

        assert_eq!(chips.first().unwrap().label, "All");
        assert_eq!(chips.first().unwrap().href, "/");
        let active: Vec<_> = chips.iter().filter(|c| c.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active.first().unwrap().label, "Bulk");
        assert_eq!(active.first().unwrap().href, "/?tag=Bulk");
    }

    #[test]
    fn test_template_renders_cards() {
        let catalog = Catalog::sample();
        let filter = TagFilter::parse("Sweet");
        let html = ProductGridTemplate {
            products: product_cards(&catalog, &filter),
            active_tag: filter.label().to_string(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Chocolate Delight"));
        assert!(html.contains("/order/chocolate-delight-1"));
        assert!(!html.contains("Classic Tea"));
    }

    #[test]
    fn test_order_link_encodes_product_id() {
        let catalog = Catalog::sample();
        let mut product = catalog.get("classic-tea-1").unwrap().clone();
        product.id = ProductId::new("tea box/2?gift").unwrap();

        let html = ProductGridTemplate {
            products: vec![ProductView::new(&catalog, &product)],
            active_tag: "All".to_string(),
        }
        .render()
        .unwrap();

        assert!(html.contains("href=\"/order/tea%20box%2F2%3Fgift\""));
    }
}
