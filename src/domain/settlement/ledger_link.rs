//! Mapping of chat identities to tally-ledger accounts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{LedgerAccountId, UserId};

/// Document filename in the persistent tier.
pub const LEDGER_LINK_FILENAME: &str = "strichliste.toml";

/// Handler-wide ledger configuration and account links.
///
/// Keys are raw identity strings so the map serializes as a plain TOML table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLink {
    #[serde(default)]
    pub ledger_url: String,
    #[serde(default)]
    pub accounts: BTreeMap<String, LedgerAccountId>,
}

impl LedgerLink {
    pub fn new(ledger_url: impl Into<String>) -> Self {
        Self {
            ledger_url: ledger_url.into(),
            accounts: BTreeMap::new(),
        }
    }

    /// Links (or relinks) `user` to `account`.
    pub fn link(&mut self, user: &UserId, account: LedgerAccountId) {
        self.accounts.insert(user.as_str().to_string(), account);
    }

    /// Removes the link; returns whether one existed.
    pub fn unlink(&mut self, user: &UserId) -> bool {
        self.accounts.remove(user.as_str()).is_some()
    }

    pub fn account_for(&self, user: &UserId) -> Option<LedgerAccountId> {
        self.accounts.get(user.as_str()).copied()
    }
}
