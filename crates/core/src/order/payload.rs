//! Serialized order handed to a handoff channel.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, Quantity};

/// A submitted order draft.
///
/// The struct form goes to structured sinks (logging); [`Payload::text`] is
/// the flat rendering used for the clipboard and the email body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: Quantity,
    pub unit_price: Price,
    pub total: Price,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Payload {
    /// Email subject line for the order.
    #[must_use]
    pub fn subject(&self) -> String {
        format!("Order: {}", self.product_name)
    }

    /// The payload as `Label: value` lines.
    ///
    /// Phone and notes lines are omitted when empty.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.subject(),
            format!("Qty: {}", self.quantity),
            format!("Total: {}", self.total),
            format!("Name: {}", self.name),
            format!("Email: {}", self.email),
        ];
        if let Some(phone) = &self.phone {
            lines.push(format!("Phone: {phone}"));
        }
        lines.push(format!("Address: {}", self.address));
        if let Some(notes) = &self.notes {
            lines.push(format!("Notes: {notes}"));
        }
        lines
    }

    /// Lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::catalog::Catalog;
    use crate::order::{DraftField, OrderDraft};

    fn draft() -> OrderDraft {
        let catalog = Catalog::sample();
        let product = catalog.get("chocolate-delight-1").unwrap().clone();
        OrderDraft::open(product, catalog.currency())
            .update_field(DraftField::Quantity, "3")
            .update_field(DraftField::Name, "Jane Doe")
            .update_field(DraftField::Email, "jane@example.com")
            .update_field(DraftField::Phone, "(555) 555-5555")
            .update_field(DraftField::Address, "1 Main St, Springfield")
    }

    #[test]
    fn test_text_without_notes() {
        let text = draft().to_payload().text();
        assert_eq!(
            text,
            "Order: Chocolate Delight\n\
             Qty: 3\n\
             Total: $297\n\
             Name: Jane Doe\n\
             Email: jane@example.com\n\
             Phone: (555) 555-5555\n\
             Address: 1 Main St, Springfield"
        );
        assert!(!text.contains("Notes"));
    }

    #[test]
    fn test_text_with_notes_has_single_notes_line() {
        let text = draft()
            .update_field(DraftField::Notes, "Cranberry ribbon")
            .to_payload()
            .text();
        let notes: Vec<_> = text.lines().filter(|l| l.starts_with("Notes")).collect();
        assert_eq!(notes, ["Notes: Cranberry ribbon"]);
    }

    #[test]
    fn test_text_omits_empty_phone() {
        let text = draft()
            .update_field(DraftField::Phone, "")
            .to_payload()
            .text();
        assert!(!text.contains("Phone:"));
        assert!(text.contains("Address: 1 Main St"));
    }

    #[test]
    fn test_text_is_deterministic() {
        let payload = draft().to_payload();
        assert_eq!(payload.text(), payload.clone().text());
        assert_eq!(payload.to_string(), payload.text());
    }

    #[test]
    fn test_serializes_structured_fields() {
        let json = serde_json::to_value(draft().to_payload()).unwrap();
        assert_eq!(json["product_id"], "chocolate-delight-1");
        assert_eq!(json["quantity"], 3);
        assert!(json.get("notes").is_none());
    }
}
