//! Order draft form state.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::order::Payload;
use crate::types::{CurrencyCode, Price, Quantity};

/// Unknown form field name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown order field: {0}")]
pub struct DraftFieldError(pub String);

/// An editable field of an [`OrderDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Quantity,
    Name,
    Email,
    Phone,
    Address,
    Notes,
}

impl DraftField {
    /// Every field, in form order.
    pub const ALL: [Self; 6] = [
        Self::Quantity,
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::Notes,
    ];

    /// Form input name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quantity => "quantity",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Notes => "notes",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = DraftFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DraftFieldError(s.to_owned()))
    }
}

/// In-progress order form for a single product.
///
/// Field values are stored exactly as entered. Quantity is resolved only when
/// it is read, so replacing a field never fails and never validates across
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    product: Product,
    currency: CurrencyCode,
    quantity: String,
    name: String,
    email: String,
    phone: String,
    address: String,
    notes: String,
}

impl OrderDraft {
    /// Start a draft for `product` with quantity 1 and empty contact fields.
    #[must_use]
    pub fn open(product: Product, currency: CurrencyCode) -> Self {
        Self {
            product,
            currency,
            quantity: Quantity::DEFAULT.to_string(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            notes: String::new(),
        }
    }

    /// Replace one field's raw value.
    #[must_use]
    pub fn update_field(mut self, field: DraftField, value: impl Into<String>) -> Self {
        self.set_field(field, value);
        self
    }

    /// Replace one field's raw value in place.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Quantity => self.quantity = value,
            DraftField::Name => self.name = value,
            DraftField::Email => self.email = value,
            DraftField::Phone => self.phone = value,
            DraftField::Address => self.address = value,
            DraftField::Notes => self.notes = value,
        }
    }

    /// Raw value of a field as entered.
    #[must_use]
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Quantity => &self.quantity,
            DraftField::Name => &self.name,
            DraftField::Email => &self.email,
            DraftField::Phone => &self.phone,
            DraftField::Address => &self.address,
            DraftField::Notes => &self.notes,
        }
    }

    /// The selected product.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Unit price in the catalog currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::new(self.product.price, self.currency)
    }

    /// Quantity resolved from the raw input.
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        Quantity::from_input(&self.quantity)
    }

    /// `quantity * price`, always positive.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.unit_price().times(self.quantity().get())
    }

    /// Serialize the draft into a handoff payload.
    #[must_use]
    pub fn to_payload(&self) -> Payload {
        Payload {
            product_id: self.product.id.clone(),
            product_name: self.product.name.clone(),
            quantity: self.quantity(),
            unit_price: self.unit_price(),
            total: self.subtotal(),
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: non_empty(&self.phone),
            address: self.address.trim().to_owned(),
            notes: non_empty(&self.notes),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::Catalog;

    fn chocolate_draft() -> OrderDraft {
        let catalog = Catalog::sample();
        let product = catalog.get("chocolate-delight-1").unwrap().clone();
        OrderDraft::open(product, catalog.currency())
    }

    #[test]
    fn test_subtotal_saturates_for_huge_orders() {
        let mut draft = chocolate_draft();
        draft.product.price = Decimal::from(100_000_000_000_000_000_000_u128);
        draft.set_field(DraftField::Quantity, "99999999999");

        assert_eq!(draft.quantity().get(), u32::MAX);
        assert_eq!(draft.subtotal().amount, Decimal::MAX);
    }

    #[test]
    fn test_open_defaults() {
        let draft = chocolate_draft();
        assert_eq!(draft.field(DraftField::Quantity), "1");
        for field in [
            DraftField::Name,
            DraftField::Email,
            DraftField::Phone,
            DraftField::Address,
            DraftField::Notes,
        ] {
            assert_eq!(draft.field(field), "");
        }
        assert_eq!(draft.subtotal().amount, Decimal::from(99));
    }

    #[test]
    fn test_subtotal_for_quantity_three() {
        let draft = chocolate_draft().update_field(DraftField::Quantity, "3");
        assert_eq!(draft.subtotal().amount, Decimal::from(297));
        assert_eq!(draft.subtotal().to_string(), "$297");
    }

    #[test]
    fn test_subtotal_never_non_positive() {
        for input in ["", "0", "-3", "abc", " ", "-0"] {
            let draft = chocolate_draft().update_field(DraftField::Quantity, input);
            assert_eq!(draft.quantity().get(), 1, "input {input:?}");
            assert_eq!(draft.subtotal().amount, Decimal::from(99));
        }
    }

    #[test]
    fn test_update_field_is_idempotent() {
        let once = chocolate_draft().update_field(DraftField::Notes, "Gold ribbon");
        let twice = once
            .clone()
            .update_field(DraftField::Notes, "Gold ribbon");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_update_field_keeps_raw_input() {
        let draft = chocolate_draft().update_field(DraftField::Quantity, "  4 ");
        assert_eq!(draft.field(DraftField::Quantity), "  4 ");
        assert_eq!(draft.quantity().get(), 4);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("notes".parse::<DraftField>().unwrap(), DraftField::Notes);
        assert_eq!(
            "ribbon".parse::<DraftField>(),
            Err(DraftFieldError("ribbon".to_string()))
        );
    }

    #[test]
    fn test_to_payload_trims_and_drops_empty_optionals() {
        let payload = chocolate_draft()
            .update_field(DraftField::Name, "  Jane Doe ")
            .update_field(DraftField::Phone, "   ")
            .update_field(DraftField::Notes, "")
            .to_payload();
        assert_eq!(payload.name, "Jane Doe");
        assert_eq!(payload.phone, None);
        assert_eq!(payload.notes, None);
    }
}
