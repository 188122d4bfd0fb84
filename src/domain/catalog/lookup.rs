//! Case-insensitive lookups over the catalog.
//!
//! Chat arguments arrive lower-cased, so every comparison lower-cases the
//! catalog side as well.

use rust_decimal::Decimal;

use super::{Article, Catalog, CatalogError, DeliveryService, PriceOption};

/// Prefix the upstream menu import puts in front of extra names ("mit Käse").
const IMPORTED_EXTRA_PREFIX: &str = "mit ";

fn same(token: &str, name: &str) -> bool {
    token.trim().to_lowercase() == name.to_lowercase()
}

impl Catalog {
    /// Finds a delivery service by exact, case-insensitive name.
    pub fn find_service(&self, name: &str) -> Result<&DeliveryService, CatalogError> {
        self.delivery_services
            .iter()
            .find(|s| same(name, &s.name))
            .ok_or_else(|| CatalogError::ServiceNotFound {
                service: name.to_string(),
            })
    }
}

impl DeliveryService {
    /// Finds an article by name or menu number. First match wins.
    pub fn find_article(&self, token: &str) -> Result<&Article, CatalogError> {
        self.articles
            .iter()
            .find(|a| same(token, &a.name) || (!a.number.is_empty() && same(token, &a.number)))
            .ok_or_else(|| CatalogError::ArticleNotFound {
                service: self.name.clone(),
                article: token.to_string(),
            })
    }
}

impl Article {
    /// Picks the variant for an order line.
    ///
    /// A single-variant article ignores the token. Otherwise a missing token
    /// selects the first variant and an unmatched token is an error.
    pub fn resolve_variant(&self, token: Option<&str>) -> Result<&PriceOption, CatalogError> {
        let first = self.variants.first().ok_or_else(|| CatalogError::NoVariants {
            article: self.name.clone(),
        })?;
        if self.variants.len() == 1 {
            return Ok(first);
        }
        match token.map(str::trim).filter(|t| !t.is_empty()) {
            None => Ok(first),
            Some(token) => self
                .variants
                .iter()
                .find(|v| same(token, &v.name))
                .ok_or_else(|| CatalogError::VariantNotFound {
                    article: self.name.clone(),
                    variant: token.to_string(),
                }),
        }
    }

    /// Resolves a comma-separated list of extras. All-or-nothing.
    pub fn resolve_extras(&self, csv: &str) -> Result<Vec<&PriceOption>, CatalogError> {
        csv.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                self.extras
                    .iter()
                    .find(|e| extra_matches(entry, &e.name))
                    .ok_or_else(|| CatalogError::ExtraNotFound {
                        article: self.name.clone(),
                        extra: entry.to_string(),
                    })
            })
            .collect()
    }
}

fn extra_matches(token: &str, extra_name: &str) -> bool {
    let name = extra_name.to_lowercase();
    let token = token.to_lowercase();
    if token == name {
        return true;
    }
    name.strip_prefix(IMPORTED_EXTRA_PREFIX)
        .map(|stripped| stripped.trim() == token)
        .unwrap_or(false)
}

/// Sum of the prices of the chosen extras.
pub fn extras_total(extras: &[&PriceOption]) -> Decimal {
    extras.iter().map(|e| e.price).sum()
}
