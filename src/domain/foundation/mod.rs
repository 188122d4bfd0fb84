//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the group order domain.

mod errors;
mod ids;
mod timestamp;
mod user;

pub use errors::{DomainError, ErrorCategory, ErrorCode, ValidationError};
pub use ids::{LedgerAccountId, OrderSlug, UserId};
pub use timestamp::Timestamp;
pub use user::User;
