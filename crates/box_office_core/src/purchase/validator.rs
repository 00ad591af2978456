//! Purchase eligibility checks.
//!
//! **Check ordering (deterministic, first failure wins):**
//! 1. Request present
//! 2. Account id positive
//! 3. Line count within cap
//! 4. Net ticket count within cap
//! 5. Net ticket count not negative
//! 6. Child/infant tickets accompanied by an adult ticket
//!
//! The ticket cap (4) is checked before the negative total (5), so a request
//! whose lines sum above 20 is `ExcessiveTickets` even if some lines are
//! negative. Individual lines are never checked for sign: `-5` and `+5` net to
//! zero and pass.
//!
//! Validation has no side effects beyond observability counters.

use std::sync::atomic::{AtomicU64, Ordering};

use super::reject_reason::RejectReasonCode;
use crate::ticket::{PurchaseRequest, TicketCategory};

/// Maximum number of lines in one request.
pub const MAX_LINES_PER_PURCHASE: usize = 20;
/// Maximum net ticket count in one request.
pub const MAX_TICKETS_PER_PURCHASE: i64 = 20;

// ─── Steps ──────────────────────────────────────────────────────────────

/// Named validation steps, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationStep {
    RequestPresent,
    AccountId,
    LineCount,
    TicketTotal,
    NonNegativeTotal,
    AdultPresent,
}

impl ValidationStep {
    pub const ORDER: [ValidationStep; 6] = [
        ValidationStep::RequestPresent,
        ValidationStep::AccountId,
        ValidationStep::LineCount,
        ValidationStep::TicketTotal,
        ValidationStep::NonNegativeTotal,
        ValidationStep::AdultPresent,
    ];
}

// ─── Rejections ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    #[error("no purchase request supplied")]
    MissingRequest,
    #[error("account id {account_id} is not positive")]
    NonPositiveAccountId { account_id: i64 },
    #[error("net ticket count {net_count} is negative")]
    NegativeTicketTotal { net_count: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExcessReason {
    #[error("{lines} ticket lines exceed the limit of {max}", max = MAX_LINES_PER_PURCHASE)]
    TooManyLines { lines: usize },
    #[error("{net_count} tickets exceed the limit of {max}", max = MAX_TICKETS_PER_PURCHASE)]
    TooManyTickets { net_count: i64 },
}

/// Why a purchase was refused before any payment or reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PurchaseRejection {
    #[error("malformed purchase request: {0}")]
    MalformedRequest(MalformedReason),
    #[error("excessive tickets: {0}")]
    ExcessiveTickets(ExcessReason),
    #[error("child or infant tickets require at least one adult ticket")]
    NoAdultPresent,
}

impl PurchaseRejection {
    pub fn code(&self) -> RejectReasonCode {
        match self {
            PurchaseRejection::MalformedRequest(_) => RejectReasonCode::MalformedRequest,
            PurchaseRejection::ExcessiveTickets(_) => RejectReasonCode::ExcessiveTickets,
            PurchaseRejection::NoAdultPresent => RejectReasonCode::NoAdultPresent,
        }
    }

    /// The validation step that produced this rejection.
    pub fn step(&self) -> ValidationStep {
        match self {
            PurchaseRejection::MalformedRequest(MalformedReason::MissingRequest) => {
                ValidationStep::RequestPresent
            }
            PurchaseRejection::MalformedRequest(MalformedReason::NonPositiveAccountId {
                ..
            }) => ValidationStep::AccountId,
            PurchaseRejection::ExcessiveTickets(ExcessReason::TooManyLines { .. }) => {
                ValidationStep::LineCount
            }
            PurchaseRejection::ExcessiveTickets(ExcessReason::TooManyTickets { .. }) => {
                ValidationStep::TicketTotal
            }
            PurchaseRejection::MalformedRequest(MalformedReason::NegativeTicketTotal {
                ..
            }) => ValidationStep::NonNegativeTotal,
            PurchaseRejection::NoAdultPresent => ValidationStep::AdultPresent,
        }
    }
}

// ─── Metrics ────────────────────────────────────────────────────────────

static REJECT_MALFORMED_TOTAL: AtomicU64 = AtomicU64::new(0);
static REJECT_EXCESSIVE_TOTAL: AtomicU64 = AtomicU64::new(0);
static REJECT_NO_ADULT_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Process-wide count of rejections for `code`.
pub fn purchase_reject_total(code: RejectReasonCode) -> u64 {
    match code {
        RejectReasonCode::MalformedRequest => REJECT_MALFORMED_TOTAL.load(Ordering::Relaxed),
        RejectReasonCode::ExcessiveTickets => REJECT_EXCESSIVE_TOTAL.load(Ordering::Relaxed),
        RejectReasonCode::NoAdultPresent => REJECT_NO_ADULT_TOTAL.load(Ordering::Relaxed),
    }
}

fn bump_purchase_reject(rejection: &PurchaseRejection) {
    let code = rejection.code();
    match code {
        RejectReasonCode::MalformedRequest => {
            REJECT_MALFORMED_TOTAL.fetch_add(1, Ordering::Relaxed);
        }
        RejectReasonCode::ExcessiveTickets => {
            REJECT_EXCESSIVE_TOTAL.fetch_add(1, Ordering::Relaxed);
        }
        RejectReasonCode::NoAdultPresent => {
            REJECT_NO_ADULT_TOTAL.fetch_add(1, Ordering::Relaxed);
        }
    }
    let tail = format!("reason={}", code.as_str());
    super::emit_purchase_metric_line("purchase_reject_total", &tail);
    tracing::debug!(
        reason = code.as_str(),
        step = ?rejection.step(),
        "purchase rejected: {rejection}"
    );
}

// ─── Validator ──────────────────────────────────────────────────────────

/// Run every eligibility check in order and return the request on success.
///
/// `None` stands for "no request supplied" and is rejected as malformed.
pub fn validate_purchase(
    request: Option<&PurchaseRequest>,
) -> Result<&PurchaseRequest, PurchaseRejection> {
    let result = check_purchase(request);
    if let Err(rejection) = &result {
        bump_purchase_reject(rejection);
    }
    result
}

fn check_purchase(request: Option<&PurchaseRequest>) -> Result<&PurchaseRequest, PurchaseRejection> {
    // Step 1: request present
    let Some(request) = request else {
        return Err(PurchaseRejection::MalformedRequest(
            MalformedReason::MissingRequest,
        ));
    };

    // Step 2: account id
    let account_id = request.account_id();
    if account_id <= 0 {
        return Err(PurchaseRejection::MalformedRequest(
            MalformedReason::NonPositiveAccountId { account_id },
        ));
    }

    // Step 3: line count
    let lines = request.lines().len();
    if lines > MAX_LINES_PER_PURCHASE {
        return Err(PurchaseRejection::ExcessiveTickets(
            ExcessReason::TooManyLines { lines },
        ));
    }

    // Steps 4 and 5 share the sum; step 3 bounds it to 20 i32 terms.
    let net_count = request.net_ticket_count();
    if net_count > MAX_TICKETS_PER_PURCHASE {
        return Err(PurchaseRejection::ExcessiveTickets(
            ExcessReason::TooManyTickets { net_count },
        ));
    }
    if net_count < 0 {
        return Err(PurchaseRejection::MalformedRequest(
            MalformedReason::NegativeTicketTotal { net_count },
        ));
    }

    // Step 6: accompaniment
    let has_minor = request
        .lines()
        .iter()
        .any(|line| line.category().requires_adult());
    if has_minor && !request.has_category(TicketCategory::Adult) {
        return Err(PurchaseRejection::NoAdultPresent);
    }

    Ok(request)
}
