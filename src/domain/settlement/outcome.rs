//! Per-payee results of a ledger settlement.

use std::fmt;

use crate::domain::foundation::User;

/// What happened to one payee's debt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// The payee never linked a ledger account.
    NoLinkedAccount,
    /// The payee's account is the payer's own account.
    PaidDirectly,
    /// The ledger reports the account as disabled.
    AccountDisabled,
    /// Fetching the payee's account failed.
    LookupFailed(String),
    /// The transaction request failed.
    TransactionFailed(String),
    Booked { transaction_id: i64 },
}

impl SettlementOutcome {
    pub fn is_booked(&self) -> bool {
        matches!(self, SettlementOutcome::Booked { .. })
    }
}

impl fmt::Display for SettlementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementOutcome::NoLinkedAccount => write!(f, "Keinen Strichlisten Benutzer gefunden"),
            SettlementOutcome::PaidDirectly => write!(f, "Benutzer hat bei Lieferdienst bezahlt"),
            SettlementOutcome::AccountDisabled => write!(f, "Benutzer disabled"),
            SettlementOutcome::LookupFailed(msg) => {
                write!(f, "Strichlisten Benutzer konnte nicht geladen werden: {}", msg)
            }
            SettlementOutcome::TransactionFailed(msg) => {
                write!(f, "Transaktion fehlgeschlagen: {}", msg)
            }
            SettlementOutcome::Booked { transaction_id } => {
                write!(f, "Transaction mit der ID {} angelegt", transaction_id)
            }
        }
    }
}

/// Consolidated outcome of one settlement run, sorted by payee identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementReport {
    entries: Vec<(User, SettlementOutcome)>,
}

impl SettlementReport {
    pub fn new(mut entries: Vec<(User, SettlementOutcome)>) -> Self {
        entries.sort_by(|a, b| a.0.id.cmp(&b.0.id));
        Self { entries }
    }

    pub fn entries(&self) -> &[(User, SettlementOutcome)] {
        &self.entries
    }

    pub fn outcome_for(&self, payee: &User) -> Option<&SettlementOutcome> {
        self.entries
            .iter()
            .find(|(user, _)| user == payee)
            .map(|(_, outcome)| outcome)
    }

    pub fn booked_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_booked()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
