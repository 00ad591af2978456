//! Seat ledger with an optional capacity limit.

use std::sync::Mutex;

use box_office_core::purchase::SeatReservationService;
use serde::{Deserialize, Serialize};

use super::payments::{lock, to_json_lines};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatEntry {
    pub account_id: i64,
    pub seats: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatError {
    #[error("{requested} seats requested but only {remaining} remain")]
    SeatsUnavailable { requested: i64, remaining: i64 },
    #[error("refusing negative seat count {seats} for account {account_id}")]
    NegativeSeatCount { account_id: i64, seats: i64 },
}

#[derive(Debug, Default)]
pub struct SeatLedger {
    capacity: Option<i64>,
    entries: Mutex<Vec<SeatEntry>>,
}

impl SeatLedger {
    /// Ledger with unlimited seats.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: i64) -> Self {
        Self {
            capacity: Some(capacity),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<SeatEntry> {
        lock(&self.entries).clone()
    }

    pub fn reserved_total(&self) -> i64 {
        lock(&self.entries).iter().map(|entry| entry.seats).sum()
    }

    /// Seats still available, or `None` when unlimited.
    pub fn remaining(&self) -> Option<i64> {
        self.capacity
            .map(|capacity| capacity - self.reserved_total())
    }

    pub fn entries_json(&self) -> Result<String, serde_json::Error> {
        to_json_lines(&self.entries())
    }
}

impl SeatReservationService for SeatLedger {
    type Error = SeatError;

    fn reserve_seat(&self, account_id: i64, total_seats: i64) -> Result<(), SeatError> {
        if total_seats < 0 {
            return Err(SeatError::NegativeSeatCount {
                account_id,
                seats: total_seats,
            });
        }
        let mut entries = lock(&self.entries);
        if let Some(capacity) = self.capacity {
            let reserved: i64 = entries.iter().map(|entry| entry.seats).sum();
            let remaining = capacity - reserved;
            if total_seats > remaining {
                return Err(SeatError::SeatsUnavailable {
                    requested: total_seats,
                    remaining,
                });
            }
        }
        entries.push(SeatEntry {
            account_id,
            seats: total_seats,
        });
        Ok(())
    }
}
