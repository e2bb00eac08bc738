//! Catalog loading.
//!
//! The storefront serves the built-in sample catalog unless `CATALOG_PATH`
//! points at a YAML file of the form:
//!
//! ```yaml
//! currency: USD
//! products:
//!   - id: chocolate-delight-1
//!     name: Chocolate Delight
//!     price: 99
//!     tags: [Sweet, Popular]
//!     includes: [Assorted artisan chocolates, Cocoa mix]
//!     accent: chocolate
//! ```

use std::path::Path;

use sole_gifts_core::catalog::CatalogData;
use sole_gifts_core::{Catalog, CatalogError};
use thiserror::Error;

/// Errors that can occur while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}

/// Load the catalog from `path`, or the sample catalog when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogLoadError> {
    let Some(path) = path else {
        tracing::info!("Using built-in sample catalog");
        return Ok(Catalog::sample());
    };

    let content = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(&content)?;
    tracing::info!(
        path = %path.display(),
        products = catalog.list_all().len(),
        "Loaded catalog"
    );
    Ok(catalog)
}

/// Parse and validate catalog YAML.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or the catalog is invalid.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, CatalogLoadError> {
    let data: CatalogData = serde_yaml::from_str(yaml)?;
    Ok(Catalog::try_from(data)?)
}
