//! CLI subcommands.

pub mod catalog;
pub mod order;

use std::path::{Path, PathBuf};

use sole_gifts_core::Catalog;
use sole_gifts_storefront::catalog::{CatalogLoadError, load_catalog};
use thiserror::Error;

/// Errors raised by subcommands before any handoff happens.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no product with id '{0}'")]
    UnknownProduct(String),

    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
}

/// Load the catalog from `path`, else `CATALOG_PATH`, else the sample.
///
/// # Errors
///
/// Returns an error if a configured file cannot be loaded.
pub fn resolve_catalog(path: Option<&Path>) -> Result<Catalog, CommandError> {
    let from_env = std::env::var("CATALOG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from);
    Ok(load_catalog(path.or(from_env.as_deref()))?)
}
