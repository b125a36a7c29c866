mod common;

use std::collections::HashSet;

use common::sample_form;
use peron::application::{AppError, ReservationRegistry};
use peron::domain::{ReservationForm, ReservationStatus, ValidationError};

#[test]
fn test_register_returns_pending_record_with_token_id() {
    let registry = ReservationRegistry::new();
    let reservation = registry.register(sample_form()).unwrap();

    assert_eq!(reservation.status, ReservationStatus::Pending);
    assert_eq!(reservation.id.len(), 8);
    assert!(
        reservation
            .id
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    );
}

#[test]
fn test_register_rejects_group_below_minimum() {
    let registry = ReservationRegistry::new();
    let form = ReservationForm {
        total_passengers: 10,
        ..sample_form()
    };

    assert!(matches!(
        registry.register(form),
        Err(AppError::Validation(ValidationError::GroupTooSmall {
            given: 10
        }))
    ));

    let at_minimum = ReservationForm {
        total_passengers: 11,
        ..sample_form()
    };
    assert!(registry.register(at_minimum).is_ok());
}

#[test]
fn test_register_rejects_identical_stations() {
    let registry = ReservationRegistry::new();
    let form = ReservationForm {
        from_station: "Sofia".into(),
        to_station: "Sofia".into(),
        ..sample_form()
    };

    assert!(matches!(
        registry.register(form),
        Err(AppError::Validation(ValidationError::IdenticalStations))
    ));
}

#[test]
fn test_register_round_trip_without_return_schedule() {
    let registry = ReservationRegistry::new();
    let form = ReservationForm {
        round_trip: true,
        return_date: None,
        return_time: None,
        ..sample_form()
    };

    assert!(matches!(
        registry.register(form),
        Err(AppError::Validation(ValidationError::MissingReturnInfo))
    ));
}

#[test]
fn test_tokens_are_unique_across_registrations() {
    let registry = ReservationRegistry::new();
    let mut seen = HashSet::new();

    for _ in 0..200 {
        let reservation = registry.register(sample_form()).unwrap();
        assert!(seen.insert(reservation.id), "duplicate reservation token");
    }
}

#[test]
fn test_full_lifecycle_to_ticket_issued() {
    let registry = ReservationRegistry::new();
    let id = registry.register(sample_form()).unwrap().id;

    let confirmed = registry.confirm(&id).unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);

    let paid = registry.settle_payment(&id, 26250).unwrap();
    assert_eq!(paid.status, ReservationStatus::Paid);
    assert_eq!(paid.final_price, Some(26250));

    let issued = registry.issue_ticket(&id).unwrap();
    assert_eq!(issued.status, ReservationStatus::TicketIssued);
}

#[test]
fn test_issue_requires_paid_status() {
    let registry = ReservationRegistry::new();
    let id = registry.register(sample_form()).unwrap().id;
    registry.confirm(&id).unwrap();

    // Confirmed but unpaid: the offending status is reported.
    match registry.issue_ticket(&id) {
        Err(AppError::NotPayable { status, .. }) => {
            assert_eq!(status, ReservationStatus::Confirmed);
        }
        other => panic!("expected NotPayable, got {other:?}"),
    }

    registry.settle_payment(&id, 10000).unwrap();
    registry.issue_ticket(&id).unwrap();

    assert!(matches!(
        registry.issue_ticket(&id),
        Err(AppError::AlreadyIssued(_))
    ));
}

#[test]
fn test_issue_unknown_id() {
    let registry = ReservationRegistry::new();
    assert!(matches!(
        registry.issue_ticket("ZZZZ9999"),
        Err(AppError::ReservationNotFound(_))
    ));
}

#[test]
fn test_promotions_enforce_order() {
    let registry = ReservationRegistry::new();
    let id = registry.register(sample_form()).unwrap().id;

    // Payment cannot be settled before confirmation.
    assert!(matches!(
        registry.settle_payment(&id, 10000),
        Err(AppError::NotAwaitingPayment { .. })
    ));

    registry.confirm(&id).unwrap();

    // Confirming twice is a state conflict.
    assert!(matches!(
        registry.confirm(&id),
        Err(AppError::NotConfirmable { .. })
    ));
}

#[test]
fn test_cancel_issued_reservation_reports_both_signals() {
    let registry = ReservationRegistry::new();
    let id = registry.register(sample_form()).unwrap().id;
    registry.confirm(&id).unwrap();
    registry.settle_payment(&id, 20000).unwrap();
    registry.issue_ticket(&id).unwrap();

    let cancellation = registry.cancel(&id, "group disbanded").unwrap();
    assert_eq!(
        cancellation.reservation.status,
        ReservationStatus::Cancelled
    );
    assert!(cancellation.seats_released);
    assert!(cancellation.refund_due);
    assert_eq!(
        cancellation.reservation.cancel_reason.as_deref(),
        Some("group disbanded")
    );
}

#[test]
fn test_cancel_confirmed_reservation_releases_without_refund() {
    let registry = ReservationRegistry::new();
    let id = registry.register(sample_form()).unwrap().id;
    registry.confirm(&id).unwrap();

    let cancellation = registry.cancel(&id, "departure date moved").unwrap();
    assert!(cancellation.seats_released);
    assert!(!cancellation.refund_due);
}

#[test]
fn test_cancel_preconditions_in_order() {
    let registry = ReservationRegistry::new();
    let id = registry.register(sample_form()).unwrap().id;

    // Blank reason wins even against an unknown id.
    assert!(matches!(
        registry.cancel("NOSUCHID", "   "),
        Err(AppError::EmptyCancelReason)
    ));
    assert!(matches!(
        registry.cancel("NOSUCHID", "why not"),
        Err(AppError::ReservationNotFound(_))
    ));

    // Pending reservations have no modeled cancellation.
    match registry.cancel(&id, "changed plans") {
        Err(AppError::NotCancellable { status, .. }) => {
            assert_eq!(status, ReservationStatus::Pending);
        }
        other => panic!("expected NotCancellable, got {other:?}"),
    }

    registry.confirm(&id).unwrap();
    registry.cancel(&id, "changed plans").unwrap();

    // Cancellation is terminal.
    assert!(matches!(
        registry.cancel(&id, "again"),
        Err(AppError::AlreadyCancelled(_))
    ));
    assert!(matches!(
        registry.confirm(&id),
        Err(AppError::NotConfirmable { .. })
    ));
    assert!(matches!(
        registry.issue_ticket(&id),
        Err(AppError::NotPayable { .. })
    ));
}

#[test]
fn test_rejected_register_leaves_registry_untouched() {
    let registry = ReservationRegistry::new();
    let bad = ReservationForm {
        total_passengers: 5,
        ..sample_form()
    };
    let _ = registry.register(bad);

    assert!(registry.list().is_empty());
}

#[test]
fn test_list_is_most_recent_first() {
    let registry = ReservationRegistry::new();
    let first = registry.register(sample_form()).unwrap().id;
    let second = registry.register(sample_form()).unwrap().id;

    let listed: Vec<_> = registry.list().into_iter().map(|r| r.id).collect();
    assert_eq!(listed, vec![second, first]);
}
