//! Purchase orchestration.
//!
//! **Order of operations (strictly sequential):**
//! 1. Validate (no external calls on failure)
//! 2. Price every line, applying discount codes
//! 3. Take payment
//! 4. Count seats
//! 5. Reserve seats
//!
//! Payment precedes reservation, so a failed payment never leaves seats held.
//! A failed reservation after a successful payment is reported as-is; the
//! payment is not reversed here.

use std::sync::atomic::{AtomicU64, Ordering};

use super::collaborators::{SeatReservationService, TicketPaymentService};
use super::validator::{PurchaseRejection, validate_purchase};
use crate::rules::{
    DiscountFraction, DiscountService, NoDiscounts, discounted_unit_price, unit_price,
    usable_discount_code,
};
use crate::ticket::{PurchaseRequest, TicketLine, format_request_hash};

// ─── Results ────────────────────────────────────────────────────────────

/// Summary of a completed purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub account_id: i64,
    /// Amount passed to the payment service.
    pub total_amount: i64,
    /// Seat count passed to the reservation service.
    pub total_seats: i64,
    /// Request fingerprint, 16 hex chars.
    pub request_hash: String,
}

/// Failure of `purchase_tickets`.
///
/// `Rejected` means nothing was charged or reserved. `Payment` and
/// `Reservation` carry the collaborator's own error unchanged.
#[derive(Debug, thiserror::Error)]
pub enum PurchaseError<P, R>
where
    P: std::error::Error + 'static,
    R: std::error::Error + 'static,
{
    #[error(transparent)]
    Rejected(#[from] PurchaseRejection),
    #[error("payment collection failed")]
    Payment(#[source] P),
    #[error("seat reservation failed after payment was taken")]
    Reservation(#[source] R),
}

impl<P, R> PurchaseError<P, R>
where
    P: std::error::Error + 'static,
    R: std::error::Error + 'static,
{
    /// The validation rejection, if the purchase never reached payment.
    pub fn rejection(&self) -> Option<&PurchaseRejection> {
        match self {
            PurchaseError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// True when money may have moved (payment was attempted).
    pub fn reached_payment(&self) -> bool {
        !matches!(self, PurchaseError::Rejected(_))
    }
}

// ─── Metrics ────────────────────────────────────────────────────────────

/// Terminal outcome of one `purchase_tickets` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurchaseOutcome {
    Completed,
    Rejected,
    PaymentFailed,
    ReservationFailed,
}

impl PurchaseOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            PurchaseOutcome::Completed => "completed",
            PurchaseOutcome::Rejected => "rejected",
            PurchaseOutcome::PaymentFailed => "payment_failed",
            PurchaseOutcome::ReservationFailed => "reservation_failed",
        }
    }
}

static OUTCOME_COMPLETED_TOTAL: AtomicU64 = AtomicU64::new(0);
static OUTCOME_REJECTED_TOTAL: AtomicU64 = AtomicU64::new(0);
static OUTCOME_PAYMENT_FAILED_TOTAL: AtomicU64 = AtomicU64::new(0);
static OUTCOME_RESERVATION_FAILED_TOTAL: AtomicU64 = AtomicU64::new(0);
static DISCOUNT_CODE_REJECTED_TOTAL: AtomicU64 = AtomicU64::new(0);

fn outcome_counter(outcome: PurchaseOutcome) -> &'static AtomicU64 {
    match outcome {
        PurchaseOutcome::Completed => &OUTCOME_COMPLETED_TOTAL,
        PurchaseOutcome::Rejected => &OUTCOME_REJECTED_TOTAL,
        PurchaseOutcome::PaymentFailed => &OUTCOME_PAYMENT_FAILED_TOTAL,
        PurchaseOutcome::ReservationFailed => &OUTCOME_RESERVATION_FAILED_TOTAL,
    }
}

/// Process-wide count of purchases that ended with `outcome`.
pub fn purchase_outcome_total(outcome: PurchaseOutcome) -> u64 {
    outcome_counter(outcome).load(Ordering::Relaxed)
}

/// Process-wide count of discount codes the discount service refused.
pub fn discount_code_rejected_total() -> u64 {
    DISCOUNT_CODE_REJECTED_TOTAL.load(Ordering::Relaxed)
}

fn bump_purchase_outcome(outcome: PurchaseOutcome) {
    outcome_counter(outcome).fetch_add(1, Ordering::Relaxed);
    let tail = format!("result={}", outcome.as_str());
    super::emit_purchase_metric_line("purchase_outcome_total", &tail);
}

// ─── Service ────────────────────────────────────────────────────────────

/// Validates, prices, pays for, and reserves a ticket purchase.
///
/// Holds no per-purchase state; every call is independent.
#[derive(Debug, Clone)]
pub struct TicketService<P, R, D = NoDiscounts> {
    payments: P,
    reservations: R,
    discounts: D,
}

impl<P, R> TicketService<P, R, NoDiscounts> {
    /// Service without discount support: every code is charged at full price.
    pub fn new(payments: P, reservations: R) -> Self {
        Self {
            payments,
            reservations,
            discounts: NoDiscounts,
        }
    }
}

impl<P, R, D> TicketService<P, R, D> {
    /// Replace the discount service.
    pub fn with_discounts<D2>(self, discounts: D2) -> TicketService<P, R, D2> {
        TicketService {
            payments: self.payments,
            reservations: self.reservations,
            discounts,
        }
    }
}

impl<P, R, D> TicketService<P, R, D>
where
    P: TicketPaymentService,
    R: SeatReservationService,
    D: DiscountService,
{
    /// Run the full purchase pipeline for `request`.
    ///
    /// `None` is accepted so that an absent request is rejected like any other
    /// malformed input.
    pub fn purchase_tickets(
        &self,
        request: Option<&PurchaseRequest>,
    ) -> Result<PurchaseReceipt, PurchaseError<P::Error, R::Error>> {
        let request = match validate_purchase(request) {
            Ok(request) => request,
            Err(rejection) => {
                bump_purchase_outcome(PurchaseOutcome::Rejected);
                return Err(rejection.into());
            }
        };

        let account_id = request.account_id();
        let request_hash = format_request_hash(request.fingerprint());

        let total_amount = self.quote_total_amount(request);
        if let Err(err) = self.payments.make_payment(account_id, total_amount) {
            bump_purchase_outcome(PurchaseOutcome::PaymentFailed);
            tracing::warn!(
                account_id,
                total_amount,
                request_hash = %request_hash,
                error = %err,
                "payment failed; no seats reserved"
            );
            return Err(PurchaseError::Payment(err));
        }

        let total_seats = crate::rules::total_seats(request.lines());
        if let Err(err) = self.reservations.reserve_seat(account_id, total_seats) {
            bump_purchase_outcome(PurchaseOutcome::ReservationFailed);
            tracing::warn!(
                account_id,
                total_amount,
                total_seats,
                request_hash = %request_hash,
                error = %err,
                "seat reservation failed after payment"
            );
            return Err(PurchaseError::Reservation(err));
        }

        bump_purchase_outcome(PurchaseOutcome::Completed);
        tracing::info!(
            account_id,
            total_amount,
            total_seats,
            request_hash = %request_hash,
            "purchase completed"
        );

        Ok(PurchaseReceipt {
            account_id,
            total_amount,
            total_seats,
            request_hash,
        })
    }

    /// Total payable for `request` after discounts. Does not validate and
    /// makes no payment or reservation; only the discount service is consulted.
    pub fn quote_total_amount(&self, request: &PurchaseRequest) -> i64 {
        let account_id = request.account_id();
        request
            .lines()
            .iter()
            .map(|line| self.line_amount(account_id, line))
            .sum()
    }

    fn line_amount(&self, account_id: i64, line: &TicketLine) -> i64 {
        let fraction = self.line_discount(account_id, line);
        let price = discounted_unit_price(unit_price(line.category()), fraction);
        i64::from(price) * i64::from(line.count())
    }

    fn line_discount(&self, account_id: i64, line: &TicketLine) -> DiscountFraction {
        let Some(code) = usable_discount_code(line.discount_code()) else {
            return DiscountFraction::ZERO;
        };
        match self.discounts.discount_fraction(account_id, code) {
            Ok(fraction) => fraction,
            Err(err) => {
                DISCOUNT_CODE_REJECTED_TOTAL.fetch_add(1, Ordering::Relaxed);
                super::emit_purchase_metric_line("discount_code_rejected_total", "");
                tracing::debug!(account_id, code, error = %err, "discount ignored; full price");
                DiscountFraction::ZERO
            }
        }
    }
}
