//! Order-specific error types.
//!
//! | Error | Class |
//! |-------|-------|
//! | NotFound, PositionNotFound | not found |
//! | InvalidSlug, InvalidQuantity, InvalidAmount, NotPaid, NothingToAllocate | argument |
//! | Unauthorized | authorization |

use crate::domain::foundation::{DomainError, ErrorCode};

/// Fixed reply for every creator-only mutation.
pub const UNAUTHORIZED_MESSAGE: &str =
    "Nur der Bestellungs ersteller kann dieses Kommando ausführen";

/// Order-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// No order document exists under this slug.
    NotFound(String),

    /// The text given as order name is not a three-word slug.
    InvalidSlug(String),

    /// Line index outside `[0, len)`.
    PositionNotFound { index: i64, len: usize },

    /// Requester may not perform this mutation.
    Unauthorized,

    /// Quantity failed to parse or is below one.
    InvalidQuantity(String),

    /// Paid amount failed to parse, is out of range, or cannot be split.
    InvalidAmount(String),

    /// Settlement requested before an amount was paid.
    NotPaid,

    /// Allocation over an order whose total is zero.
    NothingToAllocate,
}

impl OrderError {
    pub fn not_found(slug: impl Into<String>) -> Self {
        OrderError::NotFound(slug.into())
    }

    pub fn invalid_slug(slug: impl Into<String>) -> Self {
        OrderError::InvalidSlug(slug.into())
    }

    pub fn position_not_found(index: i64, len: usize) -> Self {
        OrderError::PositionNotFound { index, len }
    }

    pub fn invalid_quantity(reason: impl Into<String>) -> Self {
        OrderError::InvalidQuantity(reason.into())
    }

    pub fn invalid_amount(reason: impl Into<String>) -> Self {
        OrderError::InvalidAmount(reason.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::NotFound(_) | OrderError::InvalidSlug(_) => ErrorCode::OrderNotFound,
            OrderError::PositionNotFound { .. } => ErrorCode::PositionNotFound,
            OrderError::Unauthorized => ErrorCode::Unauthorized,
            OrderError::InvalidQuantity(_) | OrderError::InvalidAmount(_) => ErrorCode::InvalidNumber,
            OrderError::NotPaid => ErrorCode::OrderNotPaid,
            OrderError::NothingToAllocate => ErrorCode::EmptyOrder,
        }
    }

    /// Returns a user-facing message.
    pub fn message(&self) -> String {
        match self {
            OrderError::NotFound(_) | OrderError::InvalidSlug(_) => {
                "Bestellung nicht vorhanden".to_string()
            }
            OrderError::PositionNotFound { .. } => "Position nicht vorhanden".to_string(),
            OrderError::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
            OrderError::InvalidQuantity(reason) => {
                format!("Menge konnte nicht konvertiert werden: {}", reason)
            }
            OrderError::InvalidAmount(reason) => {
                format!("Zahlung konnte nicht konvertiert werden: {}", reason)
            }
            OrderError::NotPaid => "Bestellung hat noch keinen gezahlten Geldwert".to_string(),
            OrderError::NothingToAllocate => {
                "Bestellung hat keinen Betrag zum Aufteilen".to_string()
            }
        }
    }
}

impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for OrderError {}

impl From<OrderError> for DomainError {
    fn from(err: OrderError) -> Self {
        let error = DomainError::new(err.code(), err.message());
        match &err {
            OrderError::NotFound(slug) | OrderError::InvalidSlug(slug) => {
                error.with_detail("order", slug)
            }
            OrderError::PositionNotFound { index, len } => error
                .with_detail("index", index.to_string())
                .with_detail("len", len.to_string()),
            _ => error,
        }
    }
}
