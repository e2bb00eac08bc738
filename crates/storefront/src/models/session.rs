//! Session-stored state.
//!
//! Each browser session owns at most one [`OrderSheet`].

use chrono::Utc;
use sole_gifts_core::OrderSheet;
use tower_sessions::Session;

/// Session keys.
pub mod keys {
    /// Key for the customer's quick-order sheet.
    pub const ORDER_SHEET: &str = "order_sheet";
}

/// Load the session's order sheet; a missing entry is a closed sheet.
///
/// A submit left `Submitting` past [`sole_gifts_core::SUBMIT_STALE_AFTER_SECS`]
/// (its request was dropped) comes back open.
///
/// # Errors
///
/// Returns an error if the session store cannot be read or the stored value
/// does not deserialize.
pub async fn load_sheet(session: &Session) -> Result<OrderSheet, tower_sessions::session::Error> {
    let mut sheet = session
        .get::<OrderSheet>(keys::ORDER_SHEET)
        .await?
        .unwrap_or_default();
    if sheet.release_stale(Utc::now()) {
        tracing::warn!("Reopened abandoned order submit");
    }
    Ok(sheet)
}

/// Re-read the order sheet from the store, dropping this request's cached copy.
///
/// Used after an await during which other requests may have changed the sheet.
///
/// # Errors
///
/// Same as [`load_sheet`].
pub async fn reload_sheet(session: &Session) -> Result<OrderSheet, tower_sessions::session::Error> {
    session.load().await?;
    load_sheet(session).await
}

/// Store the order sheet.
///
/// A closed sheet is stored rather than removed so the session record is
/// saved; an emptied session is never written back to the store.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn store_sheet(
    session: &Session,
    sheet: &OrderSheet,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::ORDER_SHEET, sheet).await
}
