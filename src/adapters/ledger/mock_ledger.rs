//! Mock ledger for testing.
//!
//! Provides a configurable in-process `Ledger` for unit and integration
//! tests. Supports:
//! - Pre-configured accounts
//! - Error injection per account
//! - Transaction and call tracking

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::foundation::LedgerAccountId;
use crate::ports::{
    Ledger, LedgerError, LedgerUser, TransactionReceipt, TransactionRequest, UserSearchResult,
};

/// Mock ledger for testing.
///
/// # Example
///
/// ```ignore
/// let ledger = MockLedger::new();
/// ledger.add_account(3, "Anna", false);
/// ledger.fail_transactions_for(4, LedgerError::Request("boom".into()));
/// ```
#[derive(Clone, Default)]
pub struct MockLedger {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    accounts: BTreeMap<i64, LedgerUser>,
    next_transaction_id: i64,
    transactions: Vec<RecordedTransaction>,
    lookup_errors: HashMap<i64, LedgerError>,
    transaction_errors: HashMap<i64, LedgerError>,
    call_log: Vec<MethodCall>,
}

/// Transaction accepted by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTransaction {
    pub id: i64,
    pub base_url: String,
    pub account: LedgerAccountId,
    pub request: TransactionRequest,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Add an account to the "database".
    pub fn add_account(&self, id: i64, name: &str, is_disabled: bool) {
        self.state().accounts.insert(
            id,
            LedgerUser {
                id: LedgerAccountId::new(id),
                name: name.to_string(),
                is_disabled,
            },
        );
    }

    /// Make `get_user` fail for one account.
    pub fn fail_lookup_for(&self, id: i64, error: LedgerError) {
        self.state().lookup_errors.insert(id, error);
    }

    /// Make `create_transaction` fail for one account.
    pub fn fail_transactions_for(&self, id: i64, error: LedgerError) {
        self.state().transaction_errors.insert(id, error);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Inspection Methods
    // ════════════════════════════════════════════════════════════════════════════

    pub fn transactions(&self) -> Vec<RecordedTransaction> {
        self.state().transactions.clone()
    }

    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    fn record(&self, method: &str, args: Vec<String>) {
        self.state().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn search_users(
        &self,
        base_url: &str,
        query: &str,
    ) -> Result<UserSearchResult, LedgerError> {
        self.record("search_users", vec![base_url.to_string(), query.to_string()]);
        let wanted = query.to_lowercase();
        let users: Vec<LedgerUser> = self
            .state()
            .accounts
            .values()
            .filter(|u| u.name.to_lowercase().contains(&wanted))
            .cloned()
            .collect();
        Ok(UserSearchResult {
            count: users.len(),
            users,
        })
    }

    async fn get_user(
        &self,
        base_url: &str,
        id: LedgerAccountId,
    ) -> Result<LedgerUser, LedgerError> {
        self.record("get_user", vec![base_url.to_string(), id.to_string()]);
        let state = self.state();
        if let Some(error) = state.lookup_errors.get(&id.value()) {
            return Err(error.clone());
        }
        state.accounts.get(&id.value()).cloned().ok_or(LedgerError::Status {
            status: 404,
            body: "user not found".to_string(),
        })
    }

    async fn create_transaction(
        &self,
        base_url: &str,
        account: LedgerAccountId,
        request: &TransactionRequest,
    ) -> Result<TransactionReceipt, LedgerError> {
        self.record(
            "create_transaction",
            vec![
                base_url.to_string(),
                account.to_string(),
                request.amount.to_string(),
            ],
        );
        let mut state = self.state();
        if let Some(error) = state.transaction_errors.get(&account.value()) {
            return Err(error.clone());
        }
        state.next_transaction_id += 1;
        let id = state.next_transaction_id;
        state.transactions.push(RecordedTransaction {
            id,
            base_url: base_url.to_string(),
            account,
            request: request.clone(),
        });
        Ok(TransactionReceipt { id })
    }
}
