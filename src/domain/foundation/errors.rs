//! Error types for the domain layer.
//!
//! Every concern-specific error (`CatalogError`, `OrderError`, store and ledger
//! errors) converts into [`DomainError`], which is what a chat handler hands
//! back to the dispatcher. The dispatcher renders it as a single reply.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// The five user-facing error classes, plus a catch-all for bugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Argument,
    NotFound,
    Authorization,
    ExternalService,
    Persistence,
    Internal,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Argument errors
    WrongArgumentCount,
    InvalidNumber,
    InvalidArgument,

    // Not found errors
    ServiceNotFound,
    ArticleNotFound,
    VariantNotFound,
    ExtraNotFound,
    OrderNotFound,
    PositionNotFound,
    LedgerAccountNotFound,
    PayerNotLinked,

    // Authorization errors
    Unauthorized,

    // State errors surfaced as argument problems
    OrderNotPaid,
    EmptyOrder,

    // External service errors
    LedgerError,
    GatewayError,

    // Persistence errors
    StorageError,

    InternalError,
}

impl ErrorCode {
    /// Maps the code onto its taxonomy class.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::WrongArgumentCount
            | ErrorCode::InvalidNumber
            | ErrorCode::InvalidArgument
            | ErrorCode::OrderNotPaid
            | ErrorCode::EmptyOrder => ErrorCategory::Argument,
            ErrorCode::ServiceNotFound
            | ErrorCode::ArticleNotFound
            | ErrorCode::VariantNotFound
            | ErrorCode::ExtraNotFound
            | ErrorCode::OrderNotFound
            | ErrorCode::PositionNotFound
            | ErrorCode::LedgerAccountNotFound
            | ErrorCode::PayerNotLinked => ErrorCategory::NotFound,
            ErrorCode::Unauthorized => ErrorCategory::Authorization,
            ErrorCode::LedgerError | ErrorCode::GatewayError => ErrorCategory::ExternalService,
            ErrorCode::StorageError => ErrorCategory::Persistence,
            ErrorCode::InternalError => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::WrongArgumentCount => "WRONG_ARGUMENT_COUNT",
            ErrorCode::InvalidNumber => "INVALID_NUMBER",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::ServiceNotFound => "SERVICE_NOT_FOUND",
            ErrorCode::ArticleNotFound => "ARTICLE_NOT_FOUND",
            ErrorCode::VariantNotFound => "VARIANT_NOT_FOUND",
            ErrorCode::ExtraNotFound => "EXTRA_NOT_FOUND",
            ErrorCode::OrderNotFound => "ORDER_NOT_FOUND",
            ErrorCode::PositionNotFound => "POSITION_NOT_FOUND",
            ErrorCode::LedgerAccountNotFound => "LEDGER_ACCOUNT_NOT_FOUND",
            ErrorCode::PayerNotLinked => "PAYER_NOT_LINKED",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::OrderNotPaid => "ORDER_NOT_PAID",
            ErrorCode::EmptyOrder => "EMPTY_ORDER",
            ErrorCode::LedgerError => "LEDGER_ERROR",
            ErrorCode::GatewayError => "GATEWAY_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Attaches a pointer to a listing command the user can run instead.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.with_detail("hint", hint)
    }

    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Text shown in the chat room: the message, followed by the hint if any.
    pub fn user_message(&self) -> String {
        match self.details.get("hint") {
            Some(hint) => format!("{}, {}", self.message, hint),
            None => self.message.clone(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
