//! Domain layer containing the order model and its algorithms.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, users, timestamps, errors)
//! - `catalog` - Delivery services, articles and case-insensitive lookups
//! - `order` - Order aggregate, slug generation, tips and the call script
//! - `settlement` - Proportional debt split, ledger links and settlement reports

pub mod catalog;
pub mod foundation;
pub mod order;
pub mod settlement;
