//! Order module - the group order aggregate, its naming and pricing.

mod aggregate;
mod errors;
mod pricing;
mod slug;

pub use aggregate::{LineItem, Order};
pub use errors::{OrderError, UNAUTHORIZED_MESSAGE};
pub use pricing::{call_text, merge_equivalent, TipSuggestions};
pub use slug::{generate_slug, ADJECTIVES, NOUNS, NUMBERS};
