//! Order aggregate and its line items.
//!
//! An order is created against one delivery service, collects line items from
//! any room member, and is eventually paid and settled by its creator. The
//! stored `total` is always the sum of the line totals; every mutation goes
//! through a method here that recomputes it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{extras_total, Article, DeliveryService, PriceOption};
use crate::domain::foundation::{Timestamp, User, UserId};

use super::OrderError;

/// One orderable entry of an order.
///
/// Field order matters: scalar fields precede the nested user tables so the
/// record serializes cleanly as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub article_number: String,
    pub article_name: String,
    pub variant: String,
    /// Extras as typed by the orderer, for the call script.
    #[serde(default)]
    pub extras: String,
    /// Variant price plus the prices of all chosen extras.
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub comment: String,
    pub ordered_by: User,
    /// Other members sharing this line. Not used for settlement.
    #[serde(default)]
    pub additional_orderers: Vec<User>,
}

impl LineItem {
    /// Builds a line from resolved catalog entries.
    pub fn new(
        article: &Article,
        variant: &PriceOption,
        extras: &[&PriceOption],
        extras_text: impl Into<String>,
        quantity: u32,
        comment: impl Into<String>,
        ordered_by: User,
    ) -> Result<Self, OrderError> {
        if quantity < 1 {
            return Err(OrderError::invalid_quantity("Menge muss mindestens 1 sein"));
        }
        Ok(Self {
            article_number: article.number.clone(),
            article_name: article.name.clone(),
            variant: variant.name.clone(),
            extras: extras_text.into(),
            unit_price: variant.price + extras_total(extras),
            quantity,
            comment: comment.into(),
            ordered_by,
            additional_orderers: Vec::new(),
        })
    }

    /// `unit_price × quantity`.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Whether `user` is the member who created this line.
    pub fn is_ordered_by(&self, user: &UserId) -> bool {
        self.ordered_by.is(user)
    }

    /// All members on this line, the one of record first.
    pub fn orderers(&self) -> impl Iterator<Item = &User> {
        std::iter::once(&self.ordered_by).chain(self.additional_orderers.iter())
    }

    /// Two lines describe the same dish with the same instructions. Used to
    /// merge lines in the phone script only.
    pub fn is_equivalent(&self, other: &LineItem) -> bool {
        self.article_number == other.article_number
            && self.article_name == other.article_name
            && self.variant == other.variant
            && self.extras == other.extras
            && self.comment == other.comment
    }
}

/// A group order against one delivery service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub created_at: Timestamp,
    pub delivery_service: String,
    #[serde(default)]
    pub phone_number: String,
    pub total: Decimal,
    #[serde(default)]
    pub amount_paid: Decimal,
    pub creator: User,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl Order {
    /// Opens an empty order. Service name and phone number are copied from
    /// the catalog entry.
    pub fn open(creator: User, service: &DeliveryService, created_at: Timestamp) -> Self {
        Self {
            created_at,
            delivery_service: service.name.clone(),
            phone_number: service.phone_number.clone(),
            total: Decimal::ZERO,
            amount_paid: Decimal::ZERO,
            creator,
            line_items: Vec::new(),
        }
    }

    pub fn is_creator(&self, user: &UserId) -> bool {
        self.creator.is(user)
    }

    /// Sum of all line totals.
    pub fn computed_total(&self) -> Decimal {
        self.line_items.iter().map(LineItem::line_total).sum()
    }

    pub fn recalculate_total(&mut self) {
        self.total = self.computed_total();
    }

    /// Appends a line. Anyone may add.
    pub fn add_line(&mut self, item: LineItem) {
        self.line_items.push(item);
        self.recalculate_total();
    }

    /// Removes the line at `index`.
    ///
    /// Allowed for the order creator and for the line's orderer of record.
    pub fn remove_line(&mut self, index: i64, requester: &UserId) -> Result<LineItem, OrderError> {
        let len = self.line_items.len();
        let position = usize::try_from(index)
            .ok()
            .filter(|i| *i < len)
            .ok_or_else(|| OrderError::position_not_found(index, len))?;

        if !self.is_creator(requester) && !self.line_items[position].is_ordered_by(requester) {
            return Err(OrderError::Unauthorized);
        }

        let removed = self.line_items.remove(position);
        self.recalculate_total();
        Ok(removed)
    }

    /// Creator-only gate used by close and ledger settlement.
    pub fn authorize_creator(&self, requester: &UserId) -> Result<(), OrderError> {
        if self.is_creator(requester) {
            Ok(())
        } else {
            Err(OrderError::Unauthorized)
        }
    }

    /// Records what the creator actually paid the delivery service.
    ///
    /// A missing or zero amount means "paid exactly the total".
    pub fn record_payment(&mut self, amount: Option<Decimal>) -> Decimal {
        let paid = match amount {
            Some(amount) if !amount.is_zero() => amount,
            _ => self.total,
        };
        self.amount_paid = paid;
        paid
    }

    pub fn is_paid(&self) -> bool {
        !self.amount_paid.is_zero()
    }
}
