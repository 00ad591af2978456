//! End-to-end tests for `TicketService::purchase_tickets`.
//!
//! Covers amounts and seats handed to the collaborators, payment-before-
//! reservation ordering, and propagation of collaborator failures.

use std::error::Error as _;

use box_office_core::purchase::{PurchaseError, PurchaseOutcome, purchase_outcome_total};
use box_office_core::ticket::format_request_hash;

mod common;
use common::*;

fn purchase_ok(lines: Vec<box_office_core::ticket::TicketLine>) -> Vec<Call> {
    let log = CallLog::new();
    let service = spy_service(&log);
    service
        .purchase_tickets(Some(&request(ACCOUNT_ID, lines)))
        .expect("purchase should succeed");
    log.calls()
}

// ─── Pricing ────────────────────────────────────────────────────────────

#[test]
fn test_single_adult_pays_twenty() {
    assert_eq!(purchase_ok(vec![one_adult()]), paid_and_reserved(20, 1));
}

#[test]
fn test_adult_line_of_three_pays_sixty() {
    assert_eq!(purchase_ok(vec![adults(3)]), paid_and_reserved(60, 3));
}

#[test]
fn test_two_separate_adult_lines_pay_forty() {
    assert_eq!(
        purchase_ok(vec![one_adult(), one_adult()]),
        paid_and_reserved(40, 2)
    );
}

#[test]
fn test_adult_and_child_pay_thirty() {
    assert_eq!(
        purchase_ok(vec![one_child(), one_adult()]),
        paid_and_reserved(30, 2)
    );
}

#[test]
fn test_adult_and_infant_pay_twenty_for_one_seat() {
    assert_eq!(
        purchase_ok(vec![one_infant(), one_adult()]),
        paid_and_reserved(20, 1)
    );
}

#[test]
fn test_one_of_each_category() {
    assert_eq!(
        purchase_ok(vec![one_adult(), one_child(), one_infant()]),
        paid_and_reserved(30, 2)
    );
}

#[test]
fn test_two_of_each_category_pay_sixty_for_four_seats() {
    assert_eq!(
        purchase_ok(vec![adults(2), children(2), infants(2)]),
        paid_and_reserved(60, 4)
    );
}

#[test]
fn test_empty_request_still_calls_both_services_with_zero() {
    assert_eq!(purchase_ok(Vec::new()), paid_and_reserved(0, 0));
}

#[test]
fn test_lines_netting_to_zero_forward_computed_totals() {
    // -5 adults and +5 children pass validation; the computed figures are
    // forwarded as they are.
    assert_eq!(
        purchase_ok(vec![adults(-5), children(5)]),
        paid_and_reserved(-50, 0)
    );
}

// ─── Receipt ────────────────────────────────────────────────────────────

#[test]
fn test_receipt_reports_what_was_sent() {
    let log = CallLog::new();
    let service = spy_service(&log);
    let req = request(ACCOUNT_ID, vec![adults(2), one_child()]);

    let receipt = service.purchase_tickets(Some(&req)).unwrap();

    assert_eq!(receipt.account_id, ACCOUNT_ID);
    assert_eq!(receipt.total_amount, 50);
    assert_eq!(receipt.total_seats, 3);
    assert_eq!(receipt.request_hash, format_request_hash(req.fingerprint()));
    assert_eq!(receipt.request_hash.len(), 16);
}

#[test]
fn test_quote_matches_payment_without_side_effects() {
    let log = CallLog::new();
    let service = spy_service(&log);
    let req = request(ACCOUNT_ID, vec![adults(2), children(3), infants(1)]);

    assert_eq!(service.quote_total_amount(&req), 70);
    assert!(log.calls().is_empty());
}

// ─── Ordering ───────────────────────────────────────────────────────────

#[test]
fn test_payment_strictly_precedes_reservation() {
    let calls = purchase_ok(vec![adults(4), children(2)]);
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], Call::Payment { .. }));
    assert!(matches!(calls[1], Call::Reservation { .. }));
}

#[test]
fn test_repeated_purchases_are_independent() {
    let log = CallLog::new();
    let service = spy_service(&log);
    let req = request(ACCOUNT_ID, vec![one_adult()]);

    service.purchase_tickets(Some(&req)).unwrap();
    service.purchase_tickets(Some(&req)).unwrap();

    let mut expected = paid_and_reserved(20, 1);
    expected.extend(paid_and_reserved(20, 1));
    assert_eq!(log.calls(), expected);
}

// ─── Collaborator failures ──────────────────────────────────────────────

#[test]
fn test_payment_failure_propagates_and_skips_reservation() {
    let log = CallLog::new();
    let service = failing_service(&log, Some("card declined"), None);
    let before = purchase_outcome_total(PurchaseOutcome::PaymentFailed);

    let err = service
        .purchase_tickets(Some(&request(ACCOUNT_ID, vec![one_adult()])))
        .unwrap_err();

    match &err {
        PurchaseError::Payment(inner) => assert_eq!(inner, &SpyError("card declined")),
        other => panic!("expected payment error, got {other:?}"),
    }
    assert!(err.reached_payment());
    assert!(err.rejection().is_none());
    assert_eq!(
        err.source().map(ToString::to_string),
        Some("spy failure: card declined".to_string())
    );
    assert_eq!(
        log.calls(),
        vec![Call::Payment {
            account_id: ACCOUNT_ID,
            total_amount: 20
        }]
    );
    assert!(purchase_outcome_total(PurchaseOutcome::PaymentFailed) > before);
}

#[test]
fn test_reservation_failure_propagates_after_payment() {
    let log = CallLog::new();
    let service = failing_service(&log, None, Some("screen full"));

    let err = service
        .purchase_tickets(Some(&request(ACCOUNT_ID, vec![adults(2)])))
        .unwrap_err();

    match &err {
        PurchaseError::Reservation(inner) => assert_eq!(inner, &SpyError("screen full")),
        other => panic!("expected reservation error, got {other:?}"),
    }
    // Payment was taken and is not reversed.
    assert_eq!(log.calls(), paid_and_reserved(40, 2));
}

#[test]
fn test_rejection_is_distinguishable_from_collaborator_failure() {
    let log = CallLog::new();
    let service = failing_service(&log, Some("unused"), Some("unused"));

    let err = service
        .purchase_tickets(Some(&request(ACCOUNT_ID, vec![one_child()])))
        .unwrap_err();

    assert!(matches!(err, PurchaseError::Rejected(_)));
    assert!(!err.reached_payment());
    assert!(log.calls().is_empty());
}

#[test]
fn test_completed_purchase_increments_outcome_counter() {
    let before = purchase_outcome_total(PurchaseOutcome::Completed);
    purchase_ok(vec![one_adult()]);
    assert!(purchase_outcome_total(PurchaseOutcome::Completed) > before);
}
