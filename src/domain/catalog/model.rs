//! Catalog entities as stored in `lieferdienste.toml`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A priced option on an article: either a size/variant or an extra ("Zusatz").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOption {
    pub name: String,
    pub price: Decimal,
}

impl PriceOption {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// One menu entry. The first variant is the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Number printed on the restaurant's menu; may be empty.
    #[serde(default)]
    pub number: String,
    pub name: String,
    pub variants: Vec<PriceOption>,
    #[serde(default)]
    pub extras: Vec<PriceOption>,
}

/// A restaurant with its phone number and menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryService {
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// All delivery services known to the process. Loaded once, read-mostly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub delivery_services: Vec<DeliveryService>,
}

impl Catalog {
    pub fn new(delivery_services: Vec<DeliveryService>) -> Self {
        Self { delivery_services }
    }
}
