//! Purchase validation and fulfilment.

pub mod collaborators;
pub mod reject_reason;
pub mod service;
pub mod validator;

pub use collaborators::{SeatReservationService, TicketPaymentService};
pub use reject_reason::RejectReasonCode;
pub use service::{
    PurchaseError, PurchaseOutcome, PurchaseReceipt, TicketService, discount_code_rejected_total,
    purchase_outcome_total,
};
pub use validator::{
    ExcessReason, MAX_LINES_PER_PURCHASE, MAX_TICKETS_PER_PURCHASE, MalformedReason,
    PurchaseRejection, ValidationStep, purchase_reject_total, validate_purchase,
};

/// Metric lines go out as debug events on a dedicated target so a subscriber
/// can route or silence them independently of the business log.
pub(crate) fn emit_purchase_metric_line(metric: &str, tail: &str) {
    tracing::debug!(target: "box_office::metrics", "{metric} {tail}");
}
