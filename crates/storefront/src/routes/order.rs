//! Quick-order sheet route handlers.
//!
//! The sheet lives in the session. Each handler loads it, requests one
//! transition, and stores it back. During a submit the sheet is saved as
//! `Submitting` before the handoff runs so a repeated submit or edit gets 409.
//! Closing or opening a product still works while a submit is in flight; the
//! submit then settles against whatever the session holds after the handoff.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use sole_gifts_core::{
    Delivery, DraftField, DraftFieldError, HandoffSink, Notice, OrderDraft, OrderSheet, SheetError,
    SubmitOutcome,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::{load_sheet, reload_sheet, store_sheet};
use crate::state::AppState;

// =============================================================================
// Views
// =============================================================================

/// Order sheet display data for templates.
#[derive(Clone)]
pub struct SheetView {
    pub product_id: String,
    pub product_name: String,
    pub accent: &'static str,
    pub includes: Vec<String>,
    pub unit_price: String,
    pub subtotal: String,
    pub quantity: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
}

impl From<&OrderDraft> for SheetView {
    fn from(draft: &OrderDraft) -> Self {
        let product = draft.product();
        Self {
            product_id: product.id.to_string(),
            product_name: product.name.clone(),
            accent: product.accent.key(),
            includes: product.includes_preview().to_vec(),
            unit_price: draft.unit_price().to_string(),
            subtotal: draft.subtotal().to_string(),
            quantity: draft.field(DraftField::Quantity).to_string(),
            name: draft.field(DraftField::Name).to_string(),
            email: draft.field(DraftField::Email).to_string(),
            phone: draft.field(DraftField::Phone).to_string(),
            address: draft.field(DraftField::Address).to_string(),
            notes: draft.field(DraftField::Notes).to_string(),
        }
    }
}

/// Order sheet page template.
#[derive(Template, WebTemplate)]
#[template(path = "order/sheet.html")]
pub struct OrderSheetTemplate {
    pub sheet: SheetView,
    pub submit_label: &'static str,
    pub notice: Option<Notice>,
    /// Payload text shown for manual copy after a failed handoff.
    pub manual_copy: Option<String>,
}

/// Submit confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "order/confirmation.html")]
pub struct ConfirmationTemplate {
    pub notice: Notice,
    pub order_text: String,
    /// `mailto:` link for the email channel; the page opens it on load.
    pub compose_link: Option<String>,
}

fn sheet_page(state: &AppState, draft: &OrderDraft) -> OrderSheetTemplate {
    OrderSheetTemplate {
        sheet: SheetView::from(draft),
        submit_label: state.handoff().channel().submit_label(),
        notice: None,
        manual_copy: None,
    }
}

fn open_draft(sheet: &OrderSheet) -> Result<&OrderDraft> {
    match sheet {
        OrderSheet::Open(draft) => Ok(draft),
        OrderSheet::Submitting(_) => Err(SheetError::SubmitInProgress.into()),
        OrderSheet::Closed => Err(SheetError::NotOpen.into()),
    }
}

// =============================================================================
// Form Handling
// =============================================================================

/// Raw form pairs; each key must name a [`DraftField`].
pub type OrderForm = Vec<(String, String)>;

/// Apply submitted form fields to the open sheet.
fn apply_form(sheet: &mut OrderSheet, form: OrderForm) -> Result<()> {
    for (key, value) in form {
        let field: DraftField = key
            .parse()
            .map_err(|e: DraftFieldError| AppError::BadRequest(e.to_string()))?;
        sheet.update_field(field, value)?;
    }
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// Open the order sheet for a product.
///
/// Replaces any draft already open in this session, including one that is
/// being submitted.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<OrderSheetTemplate> {
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let mut sheet = load_sheet(&session).await?;
    if sheet.is_submitting() {
        add_breadcrumb("order", "Discarded in-flight submit", &[("product_id", id.as_str())]);
    }

    sheet.open(product.clone(), state.catalog().currency());
    store_sheet(&session, &sheet).await?;
    add_breadcrumb("order", "Opened order sheet", &[("product_id", id.as_str())]);

    let page = sheet_page(&state, open_draft(&sheet)?);
    Ok(page)
}

/// Apply form fields and re-render the sheet with the new subtotal.
#[instrument(skip(state, session, form))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<OrderForm>,
) -> Result<OrderSheetTemplate> {
    let mut sheet = load_sheet(&session).await?;
    apply_form(&mut sheet, form)?;
    store_sheet(&session, &sheet).await?;

    let page = sheet_page(&state, open_draft(&sheet)?);
    Ok(page)
}

/// Apply form fields and hand the order to the configured channel.
///
/// On success the sheet closes and a confirmation page is shown. A failed
/// handoff re-renders the sheet with the notice and the order text for
/// manual copy. If the customer closed or replaced the sheet while the
/// handoff ran, a failure just returns them to the catalog.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<OrderForm>,
) -> Result<Response> {
    let mut sheet = load_sheet(&session).await?;
    apply_form(&mut sheet, form)?;

    let submission = sheet.begin_submit()?;
    store_sheet(&session, &sheet).await?;
    session.save().await?;
    add_breadcrumb(
        "order",
        "Submitted order",
        &[("product_id", submission.payload.product_id.as_str())],
    );

    let result = state.handoff().deliver(&submission.payload).await;

    let mut sheet = reload_sheet(&session).await?;
    let outcome = sheet.finish_submit(submission, result);
    store_sheet(&session, &sheet).await?;

    let response = match outcome {
        SubmitOutcome::Delivered { delivery, payload } => {
            let notice = delivery.notice();
            let compose_link = match delivery {
                Delivery::Compose(link) => Some(link.into()),
                Delivery::Copied | Delivery::Logged => None,
            };
            ConfirmationTemplate {
                notice,
                order_text: payload.text(),
                compose_link,
            }
            .into_response()
        }
        SubmitOutcome::Failed { notice, payload } => {
            let mut page = sheet_page(&state, open_draft(&sheet)?);
            page.notice = Some(notice);
            page.manual_copy = Some(payload.text());
            page.into_response()
        }
        SubmitOutcome::Cancelled { .. } => Redirect::to("/").into_response(),
    };

    Ok(response)
}

/// Cancel the order and return to the catalog.
#[instrument(skip(session))]
pub async fn close(session: Session) -> Result<Redirect> {
    let mut sheet = load_sheet(&session).await?;
    sheet.close();
    store_sheet(&session, &sheet).await?;
    Ok(Redirect::to("/"))
}
