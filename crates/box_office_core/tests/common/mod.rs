#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use box_office_core::purchase::{SeatReservationService, TicketPaymentService, TicketService};
use box_office_core::rules::{DiscountFraction, DiscountService, InvalidDiscountCode};
use box_office_core::ticket::{PurchaseRequest, TicketCategory, TicketLine};

pub const ACCOUNT_ID: i64 = 1234;

/// One collaborator call, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Payment { account_id: i64, total_amount: i64 },
    Reservation { account_id: i64, total_seats: i64 },
    Discount { account_id: i64, code: String },
}

/// Shared, ordered record of every collaborator call.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    /// Calls made to the payment and reservation services only.
    pub fn side_effects(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::Discount { .. }))
            .collect()
    }

    pub fn discount_lookups(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Discount { .. }))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("spy failure: {0}")]
pub struct SpyError(pub &'static str);

pub struct SpyPayments {
    log: CallLog,
    fail_with: Option<&'static str>,
}

impl TicketPaymentService for SpyPayments {
    type Error = SpyError;

    fn make_payment(&self, account_id: i64, total_amount: i64) -> Result<(), SpyError> {
        self.log.push(Call::Payment {
            account_id,
            total_amount,
        });
        match self.fail_with {
            Some(msg) => Err(SpyError(msg)),
            None => Ok(()),
        }
    }
}

pub struct SpyReservations {
    log: CallLog,
    fail_with: Option<&'static str>,
}

impl SeatReservationService for SpyReservations {
    type Error = SpyError;

    fn reserve_seat(&self, account_id: i64, total_seats: i64) -> Result<(), SpyError> {
        self.log.push(Call::Reservation {
            account_id,
            total_seats,
        });
        match self.fail_with {
            Some(msg) => Err(SpyError(msg)),
            None => Ok(()),
        }
    }
}

/// Discount service with a fixed code table; any other code is invalid.
pub struct StubDiscounts {
    log: CallLog,
    codes: Vec<(&'static str, DiscountFraction)>,
}

impl StubDiscounts {
    pub fn new(log: &CallLog, codes: &[(&'static str, u32)]) -> Self {
        Self {
            log: log.clone(),
            codes: codes
                .iter()
                .map(|&(code, percent)| {
                    (code, DiscountFraction::from_percent(percent).unwrap())
                })
                .collect(),
        }
    }
}

impl DiscountService for StubDiscounts {
    fn discount_fraction(
        &self,
        account_id: i64,
        code: &str,
    ) -> Result<DiscountFraction, InvalidDiscountCode> {
        self.log.push(Call::Discount {
            account_id,
            code: code.to_string(),
        });
        self.codes
            .iter()
            .find(|(known, _)| *known == code)
            .map(|&(_, fraction)| fraction)
            .ok_or_else(|| InvalidDiscountCode::new(account_id, code))
    }
}

pub type SpyService = TicketService<SpyPayments, SpyReservations>;

pub fn spy_service(log: &CallLog) -> SpyService {
    failing_service(log, None, None)
}

pub fn failing_service(
    log: &CallLog,
    payment_failure: Option<&'static str>,
    reservation_failure: Option<&'static str>,
) -> SpyService {
    TicketService::new(
        SpyPayments {
            log: log.clone(),
            fail_with: payment_failure,
        },
        SpyReservations {
            log: log.clone(),
            fail_with: reservation_failure,
        },
    )
}

// ─── Ticket fixtures ────────────────────────────────────────────────────

pub fn request(account_id: i64, lines: Vec<TicketLine>) -> PurchaseRequest {
    PurchaseRequest::new(account_id, lines)
}

pub fn adults(count: i32) -> TicketLine {
    TicketLine::new(TicketCategory::Adult, count)
}

pub fn children(count: i32) -> TicketLine {
    TicketLine::new(TicketCategory::Child, count)
}

pub fn infants(count: i32) -> TicketLine {
    TicketLine::new(TicketCategory::Infant, count)
}

pub fn one_adult() -> TicketLine {
    adults(1)
}

pub fn one_child() -> TicketLine {
    children(1)
}

pub fn one_infant() -> TicketLine {
    infants(1)
}

pub fn one_adult_with_code(code: &str) -> TicketLine {
    TicketLine::with_discount_code(TicketCategory::Adult, 1, code)
}

/// `size` copies of `line`.
pub fn repeated(size: usize, line: TicketLine) -> Vec<TicketLine> {
    vec![line; size]
}

pub fn paid_and_reserved(amount: i64, seats: i64) -> Vec<Call> {
    vec![
        Call::Payment {
            account_id: ACCOUNT_ID,
            total_amount: amount,
        },
        Call::Reservation {
            account_id: ACCOUNT_ID,
            total_seats: seats,
        },
    ]
}
