//! Catalog inspection commands.

use std::path::Path;

use sole_gifts_core::{Catalog, Product, Tag, TagFilter};
use tracing::info;

use super::{CommandError, resolve_catalog};

/// List products, optionally filtered by tag.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn list(path: Option<&Path>, tag: Option<&str>) -> Result<(), CommandError> {
    let catalog = resolve_catalog(path)?;
    let filter = tag.map_or(TagFilter::All, TagFilter::parse);
    let products = catalog.list_by_tag(&filter);

    info!(tag = %filter.label(), count = products.len(), "Products");
    for product in products {
        info!("{}", describe(&catalog, product));
    }
    Ok(())
}

/// List the tag universe.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn tags(path: Option<&Path>) -> Result<(), CommandError> {
    let catalog = resolve_catalog(path)?;
    let labels: Vec<String> = catalog
        .tag_universe()
        .iter()
        .map(|filter| filter.label().to_string())
        .collect();

    info!("Tags: {}", labels.join(", "));
    Ok(())
}

/// One-line summary: `id  name  price [was compare-at]  [tags]`.
fn describe(catalog: &Catalog, product: &Product) -> String {
    let mut line = format!(
        "{:<22} {:<28} {}",
        product.id.as_str(),
        product.name,
        catalog.price_of(product)
    );
    if let Some(compare_at) = catalog.compare_at_of(product) {
        line.push_str(&format!(" (was {compare_at})"));
    }
    let tags: Vec<&str> = product.tags.iter().map(Tag::as_str).collect();
    line.push_str(&format!("  [{}]", tags.join(", ")));
    line
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_includes_compare_at_and_tags() {
        let catalog = Catalog::sample();
        let line = describe(&catalog, catalog.get("lux-holiday-1").unwrap());
        assert!(line.starts_with("lux-holiday-1"));
        assert!(line.contains("$189 (was $219)"));
        assert!(line.ends_with("[Holiday, Premium]"));
    }
}
