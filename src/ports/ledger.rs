//! Ledger Port - Interface for the external tally ledger ("Strichliste").
//!
//! The ledger base URL is part of every call because it is stored in the
//! ledger-link document and may change at runtime.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, LedgerAccountId};

/// An account as reported by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerUser {
    pub id: LedgerAccountId,
    pub name: String,
    pub is_disabled: bool,
}

/// Result of a name search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserSearchResult {
    pub count: usize,
    pub users: Vec<LedgerUser>,
}

/// Debits the account the request is posted to and credits `recipient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    /// Amount in minor currency units.
    pub amount: i64,
    pub recipient: LedgerAccountId,
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub id: i64,
}

/// Errors that can occur when talking to the ledger
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("keinen Strichlisten Benutzer gefunden")]
    NoMatch { query: String },

    #[error("keine exakte übereinstimmung gefunden. Bitte Name prüfen")]
    Ambiguous { query: String, count: usize },

    #[error("benutzer disabled")]
    Disabled { name: String },

    #[error("keine Strichlisten Adresse konfiguriert")]
    NotConfigured,

    #[error("Zeitüberschreitung nach {timeout_secs} Sekunden")]
    Timeout { timeout_secs: u64 },

    #[error("Fehler beim Request ausführen: {0}")]
    Request(String),

    #[error("Unerwarteter Status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("keine decodierung möglich: {0}")]
    Decode(String),
}

impl LedgerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::NoMatch { .. } => ErrorCode::LedgerAccountNotFound,
            LedgerError::Ambiguous { .. }
            | LedgerError::Disabled { .. }
            | LedgerError::NotConfigured => ErrorCode::InvalidArgument,
            LedgerError::Timeout { .. }
            | LedgerError::Request(_)
            | LedgerError::Status { .. }
            | LedgerError::Decode(_) => ErrorCode::LedgerError,
        }
    }
}

impl From<LedgerError> for DomainError {
    fn from(err: LedgerError) -> Self {
        DomainError::new(
            err.code(),
            format!("Fehler beim finden des Strichlisten Users: {}", err),
        )
    }
}

/// Port for the tally ledger HTTP API
#[async_trait]
pub trait Ledger: Send + Sync {
    /// `GET /api/user/search?query=<query>`
    async fn search_users(
        &self,
        base_url: &str,
        query: &str,
    ) -> Result<UserSearchResult, LedgerError>;

    /// `GET /api/user/{id}`
    async fn get_user(&self, base_url: &str, id: LedgerAccountId)
        -> Result<LedgerUser, LedgerError>;

    /// `POST /api/user/{account}/transaction`
    async fn create_transaction(
        &self,
        base_url: &str,
        account: LedgerAccountId,
        request: &TransactionRequest,
    ) -> Result<TransactionReceipt, LedgerError>;
}

/// Picks the account a search result refers to.
///
/// One hit is taken as is. Several hits need an exact, case-insensitive name
/// match. Disabled accounts are rejected.
pub fn select_account(query: &str, result: UserSearchResult) -> Result<LedgerUser, LedgerError> {
    let wanted = query.to_lowercase();
    let user = match result.count {
        0 => None,
        1 => result.users.into_iter().next(),
        count => {
            let found = result
                .users
                .into_iter()
                .find(|u| u.name.to_lowercase() == wanted);
            if found.is_none() {
                return Err(LedgerError::Ambiguous {
                    query: query.to_string(),
                    count,
                });
            }
            found
        }
    };

    let user = user.ok_or_else(|| LedgerError::NoMatch {
        query: query.to_string(),
    })?;
    if user.is_disabled {
        return Err(LedgerError::Disabled { name: user.name });
    }
    Ok(user)
}

/// Searches the ledger and resolves the result with [`select_account`].
pub async fn find_account(
    ledger: &dyn Ledger,
    base_url: &str,
    query: &str,
) -> Result<LedgerUser, LedgerError> {
    if base_url.trim().is_empty() {
        return Err(LedgerError::NotConfigured);
    }
    let result = ledger.search_users(base_url, query).await?;
    select_account(query, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: i64, name: &str, disabled: bool) -> LedgerUser {
        LedgerUser {
            id: LedgerAccountId::new(id),
            name: name.to_string(),
            is_disabled: disabled,
        }
    }

    fn result(users: Vec<LedgerUser>) -> UserSearchResult {
        UserSearchResult {
            count: users.len(),
            users,
        }
    }

    #[test]
    fn no_hits_is_no_match() {
        let err = select_account("anna", result(vec![])).unwrap_err();
        assert!(matches!(err, LedgerError::NoMatch { .. }));
        assert_eq!(err.code(), ErrorCode::LedgerAccountNotFound);
    }

    #[test]
    fn single_hit_is_taken_even_if_name_differs() {
        let user = select_account("ann", result(vec![account(1, "Anna", false)])).unwrap();
        assert_eq!(user.id, LedgerAccountId::new(1));
    }

    #[test]
    fn several_hits_need_exact_match() {
        let users = vec![account(1, "Anna", false), account(2, "Annabell", false)];
        let user = select_account("ANNA", result(users.clone())).unwrap();
        assert_eq!(user.id, LedgerAccountId::new(1));

        let err = select_account("ann", result(users)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::Ambiguous {
                query: "ann".to_string(),
                count: 2
            }
        );
    }

    #[test]
    fn disabled_account_is_rejected() {
        let err = select_account("bob", result(vec![account(3, "Bob", true)])).unwrap_err();
        assert_eq!(err, LedgerError::Disabled { name: "Bob".to_string() });
    }

    #[test]
    fn transport_errors_are_external_service_class() {
        let err: DomainError = LedgerError::Request("connection refused".to_string()).into();
        assert_eq!(err.category(), crate::domain::foundation::ErrorCategory::ExternalService);
        assert!(err.message.contains("connection refused"));
    }
}
