//! Settlement module - splitting a paid order and recording per-payee results.

mod allocation;
mod ledger_link;
mod outcome;

pub use allocation::{allocate, Allocation, PaymentAllocation};
pub use ledger_link::{LedgerLink, LEDGER_LINK_FILENAME};
pub use outcome::{SettlementOutcome, SettlementReport};
