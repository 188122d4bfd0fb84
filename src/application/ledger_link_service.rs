//! LedgerLinkService - chat identity to tally-ledger account links.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::settlement::{LedgerLink, LEDGER_LINK_FILENAME};
use crate::ports::{
    find_account, load_document, save_document, DocumentFormat, DocumentKey, DocumentStore, Ledger,
    LedgerUser,
};

use super::order_service::HANDLER_NAMESPACE;

/// Reads and updates the ledger-link document in the persistent tier.
pub struct LedgerLinkService {
    store: Arc<dyn DocumentStore>,
    ledger: Arc<dyn Ledger>,
    default_url: String,
}

impl LedgerLinkService {
    /// `default_url` is used while the document does not name a ledger yet.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        ledger: Arc<dyn Ledger>,
        default_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            ledger,
            default_url: default_url.into(),
        }
    }

    fn key() -> DocumentKey {
        DocumentKey::persistent(HANDLER_NAMESPACE, LEDGER_LINK_FILENAME)
    }

    pub async fn load(&self) -> Result<LedgerLink, DomainError> {
        let mut link = match load_document::<LedgerLink>(&*self.store, &Self::key(), DocumentFormat::Toml)
            .await
        {
            Ok(link) => link,
            Err(e) if e.is_not_found() => LedgerLink::default(),
            Err(e) => {
                return Err(DomainError::new(
                    ErrorCode::StorageError,
                    format!("Fehler beim Laden der Strichlisten Infos: {}", e),
                ))
            }
        };
        if link.ledger_url.trim().is_empty() {
            link.ledger_url = self.default_url.clone();
        }
        Ok(link)
    }

    async fn save(&self, link: &LedgerLink) -> Result<(), DomainError> {
        save_document(&*self.store, &Self::key(), DocumentFormat::Toml, link)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::StorageError,
                    format!("Fehler beim Speichern der Strichlisten Infos: {}", e),
                )
            })
    }

    /// Searches the ledger for `query` and links the resulting account to `user`.
    pub async fn link(&self, user: &UserId, query: &str) -> Result<LedgerUser, DomainError> {
        let mut link = self.load().await?;
        let account = find_account(&*self.ledger, &link.ledger_url, query).await?;

        link.link(user, account.id);
        self.save(&link).await?;
        info!(user = %user, account = %account.id, "ledger account linked");
        Ok(account)
    }

    /// Removes the link of `user`. Returns whether a link existed.
    pub async fn unlink(&self, user: &UserId) -> Result<bool, DomainError> {
        let mut link = self.load().await?;
        let removed = link.unlink(user);
        if removed {
            self.save(&link).await?;
            info!(user = %user, "ledger account unlinked");
        }
        Ok(removed)
    }
}
