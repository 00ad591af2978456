//! Payment ledger.
//!
//! Every accepted payment is appended in call order. Declined accounts and
//! negative amounts are refused and leave no entry.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use box_office_core::purchase::TicketPaymentService;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub account_id: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("payment declined for account {account_id}")]
    Declined { account_id: i64 },
    #[error("refusing negative payment of {amount} for account {account_id}")]
    NegativeAmount { account_id: i64, amount: i64 },
}

#[derive(Debug, Default)]
pub struct PaymentLedger {
    entries: Mutex<Vec<PaymentEntry>>,
    declined: Mutex<HashSet<i64>>,
}

impl PaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every future payment from `account_id`.
    pub fn decline_account(&self, account_id: i64) {
        lock(&self.declined).insert(account_id);
    }

    pub fn entries(&self) -> Vec<PaymentEntry> {
        lock(&self.entries).clone()
    }

    /// Sum of accepted payments for `account_id`.
    pub fn total_collected(&self, account_id: i64) -> i64 {
        lock(&self.entries)
            .iter()
            .filter(|entry| entry.account_id == account_id)
            .map(|entry| entry.amount)
            .sum()
    }

    /// Entries as JSON lines, oldest first.
    pub fn entries_json(&self) -> Result<String, serde_json::Error> {
        to_json_lines(&self.entries())
    }
}

impl TicketPaymentService for PaymentLedger {
    type Error = PaymentError;

    fn make_payment(&self, account_id: i64, total_amount: i64) -> Result<(), PaymentError> {
        if total_amount < 0 {
            return Err(PaymentError::NegativeAmount {
                account_id,
                amount: total_amount,
            });
        }
        if lock(&self.declined).contains(&account_id) {
            return Err(PaymentError::Declined { account_id });
        }
        lock(&self.entries).push(PaymentEntry {
            account_id,
            amount: total_amount,
        });
        Ok(())
    }
}

// A panic while holding the lock cannot leave a half-written entry, so a
// poisoned lock is still usable.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn to_json_lines<T: Serialize>(entries: &[T]) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&serde_json::to_string(entry)?);
        out.push('\n');
    }
    Ok(out)
}
