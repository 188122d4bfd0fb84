//! Ledger Adapters
//!
//! - **HttpLedger** - Talks to a Strichliste server over HTTP/JSON
//! - **MockLedger** - Configurable in-process ledger (testing)

mod http_ledger;
mod mock_ledger;
mod wire_types;

pub use http_ledger::HttpLedger;
pub use mock_ledger::{MethodCall, MockLedger, RecordedTransaction};
