//! Catalog lookup errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Lieferdienst nicht gefunden")]
    ServiceNotFound { service: String },

    #[error("Artikel nicht gefunden")]
    ArticleNotFound { service: String, article: String },

    #[error("Version {variant} von {article} nicht gefunden")]
    VariantNotFound { article: String, variant: String },

    #[error("Artikel {article} hat keine Versionen")]
    NoVariants { article: String },

    #[error("Konnte Zusatz {extra} nicht zuordnen")]
    ExtraNotFound { article: String, extra: String },
}

impl CatalogError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::ServiceNotFound { .. } => ErrorCode::ServiceNotFound,
            CatalogError::ArticleNotFound { .. } => ErrorCode::ArticleNotFound,
            CatalogError::VariantNotFound { .. } | CatalogError::NoVariants { .. } => {
                ErrorCode::VariantNotFound
            }
            CatalogError::ExtraNotFound { .. } => ErrorCode::ExtraNotFound,
        }
    }
}

impl From<CatalogError> for DomainError {
    fn from(err: CatalogError) -> Self {
        let error = DomainError::new(err.code(), err.to_string());
        match &err {
            CatalogError::ServiceNotFound { service } => error.with_detail("service", service),
            CatalogError::ArticleNotFound { service, article } => error
                .with_detail("service", service)
                .with_detail("article", article),
            CatalogError::VariantNotFound { article, variant } => error
                .with_detail("article", article)
                .with_detail("variant", variant),
            CatalogError::NoVariants { article } => error.with_detail("article", article),
            CatalogError::ExtraNotFound { article, extra } => error
                .with_detail("article", article)
                .with_detail("extra", extra),
        }
    }
}
