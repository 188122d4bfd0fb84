//! SettlementEngine - books each payee's share on the tally ledger.
//!
//! One task per payee runs the lookup-and-book steps independently. The
//! engine waits for every task before building the report; a failing payee
//! never affects its siblings and nothing is retried.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::domain::foundation::{LedgerAccountId, User};
use crate::domain::order::Order;
use crate::domain::settlement::{Allocation, LedgerLink, SettlementOutcome, SettlementReport};
use crate::ports::{Ledger, TransactionRequest};

/// Settles allocations against a [`Ledger`].
pub struct SettlementEngine {
    ledger: Arc<dyn Ledger>,
    skip_self_payment: bool,
}

/// Everything one payee task needs, owned.
struct PayeeJob {
    ledger: Arc<dyn Ledger>,
    base_url: String,
    payer: LedgerAccountId,
    payee: User,
    account: Option<LedgerAccountId>,
    owed_cents: Option<i64>,
    comment: String,
    skip_self_payment: bool,
}

impl SettlementEngine {
    /// With `skip_self_payment` set, a payee whose account is the payer's own
    /// is reported as paid directly instead of booked.
    pub fn new(ledger: Arc<dyn Ledger>, skip_self_payment: bool) -> Self {
        Self {
            ledger,
            skip_self_payment,
        }
    }

    /// Books every allocation, crediting `payer`.
    pub async fn settle(
        &self,
        order: &Order,
        payer: LedgerAccountId,
        allocation: &Allocation,
        link: &LedgerLink,
    ) -> SettlementReport {
        let comment = format!(
            "Bestellung bei {} am {}",
            order.delivery_service,
            order.created_at.to_rfc3339()
        );

        let mut tasks = JoinSet::new();
        for payment in &allocation.payments {
            let job = PayeeJob {
                ledger: Arc::clone(&self.ledger),
                base_url: link.ledger_url.clone(),
                payer,
                payee: payment.payee.clone(),
                account: link.account_for(&payment.payee.id),
                owed_cents: payment.owed_cents(),
                comment: comment.clone(),
                skip_self_payment: self.skip_self_payment,
            };
            tasks.spawn(async move {
                let payee = job.payee.clone();
                let outcome = job.run().await;
                (payee, outcome)
            });
        }

        let mut entries: Vec<(User, SettlementOutcome)> = Vec::with_capacity(allocation.payments.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(entry) => entries.push(entry),
                Err(e) => error!(error = %e, "settlement task did not finish"),
            }
        }

        // A task that panicked leaves its payee without an entry.
        for payment in &allocation.payments {
            if !entries.iter().any(|(user, _)| user == &payment.payee) {
                entries.push((
                    payment.payee.clone(),
                    SettlementOutcome::TransactionFailed("Abrechnung abgebrochen".to_string()),
                ));
            }
        }

        let report = SettlementReport::new(entries);
        info!(
            payees = report.len(),
            booked = report.booked_count(),
            "settlement finished"
        );
        report
    }
}

impl PayeeJob {
    async fn run(self) -> SettlementOutcome {
        let Some(account) = self.account else {
            debug!(payee = %self.payee.id, "no linked ledger account");
            return SettlementOutcome::NoLinkedAccount;
        };

        if self.skip_self_payment && account == self.payer {
            return SettlementOutcome::PaidDirectly;
        }

        match self.ledger.get_user(&self.base_url, account).await {
            Ok(user) if user.is_disabled => return SettlementOutcome::AccountDisabled,
            Ok(_) => {}
            Err(e) => {
                warn!(payee = %self.payee.id, error = %e, "ledger lookup failed");
                return SettlementOutcome::LookupFailed(e.to_string());
            }
        }

        let Some(amount) = self.owed_cents else {
            return SettlementOutcome::TransactionFailed("Betrag nicht darstellbar".to_string());
        };
        let request = TransactionRequest {
            amount,
            recipient: self.payer,
            comment: self.comment,
        };

        match self
            .ledger
            .create_transaction(&self.base_url, account, &request)
            .await
        {
            Ok(receipt) => SettlementOutcome::Booked {
                transaction_id: receipt.id,
            },
            Err(e) => {
                warn!(payee = %self.payee.id, error = %e, "ledger transaction failed");
                SettlementOutcome::TransactionFailed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockLedger;
    use crate::domain::catalog::{Article, DeliveryService, PriceOption};
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::order::LineItem;
    use crate::domain::settlement::allocate;
    use crate::ports::LedgerError;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    const URL: &str = "http://strichliste.test";

    fn user(id: &str) -> User {
        User::from_identity(UserId::new(id).unwrap())
    }

    fn order(lines: &[(&str, i64)]) -> Order {
        let service = DeliveryService {
            name: "Pizzeria Roma".to_string(),
            phone_number: String::new(),
            articles: vec![],
        };
        let created = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 5, 17, 18, 30, 0).unwrap());
        let mut order = Order::open(user("@creator:x"), &service, created);
        for (who, cents) in lines {
            let article = Article {
                number: String::new(),
                name: "Pizza".to_string(),
                variants: vec![PriceOption::new("Normal", Decimal::new(*cents, 2))],
                extras: vec![],
            };
            order.add_line(
                LineItem::new(&article, &article.variants[0], &[], "", 1, "", user(who)).unwrap(),
            );
        }
        order.record_payment(None);
        order
    }

    fn link(pairs: &[(&str, i64)]) -> LedgerLink {
        let mut link = LedgerLink::new(URL);
        for (who, account) in pairs {
            link.link(&UserId::new(*who).unwrap(), LedgerAccountId::new(*account));
        }
        link
    }

    fn engine(ledger: &MockLedger, skip_self_payment: bool) -> SettlementEngine {
        SettlementEngine::new(Arc::new(ledger.clone()), skip_self_payment)
    }

    #[tokio::test]
    async fn linked_and_unlinked_payees_are_reported_separately() {
        let ledger = MockLedger::new();
        ledger.add_account(1, "Creator", false);
        ledger.add_account(2, "Anna", false);
        let order = order(&[("@anna:x", 950), ("@bob:x", 800)]);
        let allocation = allocate(&order).unwrap();

        let report = engine(&ledger, true)
            .settle(&order, LedgerAccountId::new(1), &allocation, &link(&[("@anna:x", 2)]))
            .await;

        assert_eq!(report.len(), 2);
        assert_eq!(
            report.outcome_for(&user("@anna:x")),
            Some(&SettlementOutcome::Booked { transaction_id: 1 })
        );
        assert_eq!(
            report.outcome_for(&user("@bob:x")),
            Some(&SettlementOutcome::NoLinkedAccount)
        );

        let booked = &ledger.transactions()[0];
        assert_eq!(booked.account, LedgerAccountId::new(2));
        assert_eq!(booked.request.amount, 950);
        assert_eq!(booked.request.recipient, LedgerAccountId::new(1));
        assert_eq!(
            booked.request.comment,
            "Bestellung bei Pizzeria Roma am 2024-05-17T18:30:00Z"
        );
    }

    #[tokio::test]
    async fn payer_own_share_is_skipped_when_enabled() {
        let ledger = MockLedger::new();
        ledger.add_account(1, "Creator", false);
        let order = order(&[("@creator:x", 500)]);
        let allocation = allocate(&order).unwrap();
        let link = link(&[("@creator:x", 1)]);

        let report = engine(&ledger, true)
            .settle(&order, LedgerAccountId::new(1), &allocation, &link)
            .await;

        assert_eq!(report.entries()[0].1, SettlementOutcome::PaidDirectly);
        assert!(ledger.transactions().is_empty());

        let report = engine(&ledger, false)
            .settle(&order, LedgerAccountId::new(1), &allocation, &link)
            .await;
        assert!(report.entries()[0].1.is_booked());
    }

    #[tokio::test]
    async fn disabled_account_is_not_booked() {
        let ledger = MockLedger::new();
        ledger.add_account(2, "Anna", true);
        let order = order(&[("@anna:x", 500)]);
        let allocation = allocate(&order).unwrap();

        let report = engine(&ledger, true)
            .settle(&order, LedgerAccountId::new(1), &allocation, &link(&[("@anna:x", 2)]))
            .await;

        assert_eq!(report.entries()[0].1, SettlementOutcome::AccountDisabled);
        assert_eq!(ledger.call_count("create_transaction"), 0);
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_others() {
        let ledger = MockLedger::new();
        ledger.add_account(2, "Anna", false);
        ledger.add_account(3, "Bob", false);
        ledger.add_account(4, "Carl", false);
        ledger.fail_lookup_for(3, LedgerError::Timeout { timeout_secs: 5 });
        ledger.fail_transactions_for(4, LedgerError::Request("kaputt".to_string()));
        let order = order(&[("@anna:x", 500), ("@bob:x", 500), ("@carl:x", 500)]);
        let allocation = allocate(&order).unwrap();
        let link = link(&[("@anna:x", 2), ("@bob:x", 3), ("@carl:x", 4)]);

        let report = engine(&ledger, true)
            .settle(&order, LedgerAccountId::new(1), &allocation, &link)
            .await;

        assert_eq!(report.len(), 3);
        assert_eq!(report.booked_count(), 1);
        assert!(matches!(
            report.outcome_for(&user("@bob:x")),
            Some(SettlementOutcome::LookupFailed(_))
        ));
        assert!(matches!(
            report.outcome_for(&user("@carl:x")),
            Some(SettlementOutcome::TransactionFailed(_))
        ));
    }

    #[tokio::test]
    async fn discounted_share_is_rounded_up_to_cents() {
        let ledger = MockLedger::new();
        ledger.add_account(2, "Anna", false);
        let mut order = order(&[("@anna:x", 1000), ("@bob:x", 2000)]);
        order.record_payment(Some(Decimal::new(2000, 2)));
        let allocation = allocate(&order).unwrap();

        engine(&ledger, true)
            .settle(&order, LedgerAccountId::new(1), &allocation, &link(&[("@anna:x", 2)]))
            .await;

        // 10.00 * 20/30 = 6.666..
        assert_eq!(ledger.transactions()[0].request.amount, 667);
    }
}
