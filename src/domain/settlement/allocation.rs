//! Proportional split of the paid amount across the line orderers.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::foundation::User;
use crate::domain::order::{Order, OrderError};

/// What one member owes the payer.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentAllocation {
    pub payee: User,
    pub owed: Decimal,
}

impl PaymentAllocation {
    /// Owed amount in minor units, always rounded up.
    ///
    /// Returns `None` if the amount does not fit the ledger's integer field.
    pub fn owed_cents(&self) -> Option<i64> {
        (self.owed * Decimal::ONE_HUNDRED).ceil().to_i64()
    }
}

/// Result of [`allocate`]: the paid/total ratio and one entry per payee.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub factor: Decimal,
    pub payments: Vec<PaymentAllocation>,
}

impl Allocation {
    pub fn total_owed(&self) -> Decimal {
        self.payments.iter().map(|p| p.owed).sum()
    }
}

/// Splits `order.amount_paid` across the orderers of record.
///
/// Each line's total is scaled by `amount_paid / total` and credited to the
/// line's `ordered_by`. Payees appear in order of their first line.
pub fn allocate(order: &Order) -> Result<Allocation, OrderError> {
    if !order.is_paid() {
        return Err(OrderError::NotPaid);
    }
    let total = order.computed_total();
    if total.is_zero() {
        return Err(OrderError::NothingToAllocate);
    }

    if order.amount_paid.is_sign_negative() {
        return Err(OrderError::invalid_amount("Betrag darf nicht negativ sein"));
    }

    let out_of_range = || OrderError::invalid_amount("Betrag ist zu groß zum Aufteilen");
    let factor = order.amount_paid.checked_div(total).ok_or_else(out_of_range)?;
    let mut payments: Vec<PaymentAllocation> = Vec::new();
    for item in &order.line_items {
        let owed = item.line_total().checked_mul(factor).ok_or_else(out_of_range)?;
        match payments.iter_mut().find(|p| p.payee == item.ordered_by) {
            Some(existing) => {
                existing.owed = existing.owed.checked_add(owed).ok_or_else(out_of_range)?
            }
            None => payments.push(PaymentAllocation {
                payee: item.ordered_by.clone(),
                owed,
            }),
        }
    }

    Ok(Allocation { factor, payments })
}
