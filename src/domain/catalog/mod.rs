//! Catalog module - delivery services and their menus.
//!
//! The catalog is produced by an offline import and read from the persistent
//! document tier at startup. This module only models and searches it.

mod errors;
mod lookup;
mod model;

pub use errors::CatalogError;
pub use lookup::extras_total;
pub use model::{Article, Catalog, DeliveryService, PriceOption};
