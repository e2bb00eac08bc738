//! Storefront-side models.

pub mod session;

pub use session::{keys as session_keys, load_sheet, reload_sheet, store_sheet};
