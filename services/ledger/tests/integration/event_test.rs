use holeout_domain::id::{EventId, RegistrationId};
use holeout_domain::money::Pence;
use holeout_ledger::domain::types::{CheckoutKind, Event, Player, RegistrationOutcome};
use holeout_ledger::error::LedgerError;
use holeout_ledger::usecase::event::{
    ListEventRegistrationsUseCase, MarkAttendanceUseCase, UpdateEventEntryFeeUseCase,
    VerifyEventPaymentInput,
};

use crate::helpers::{Harness, event, morning, paid_session, player, verified_player};

fn verify(player: &Player, event_id: EventId, session_id: Option<&str>) -> VerifyEventPaymentInput {
    VerifyEventPaymentInput {
        player: player.clone(),
        event_id,
        session_id: session_id.map(str::to_owned),
    }
}

fn disabled(entry_fee: Pence) -> Event {
    Event {
        enabled: false,
        ..event(entry_fee)
    }
}

// ── RegisterForEvent ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_for_free_event_without_checkout() {
    let h = Harness::new();
    let e = h.ledger.add_event(event(Pence::ZERO));
    let p = player();

    let outcome = h.register_for_event().execute(p.clone(), e.id).await.unwrap();

    match outcome {
        RegistrationOutcome::Registered(registration) => {
            assert_eq!(registration.user_id, p.id);
            assert_eq!(registration.event_id, e.id);
            assert_eq!(registration.payment_reference, None);
            assert_eq!(registration.registered_at, morning());
            assert!(!registration.attended);
        }
        other => panic!("expected Registered, got {other:?}"),
    }
    assert!(h.payments.requests().is_empty());
    assert_eq!(h.ledger.registrations().len(), 1);
}

#[tokio::test]
async fn should_report_existing_registration() {
    let h = Harness::new();
    let e = h.ledger.add_event(event(Pence::ZERO));
    let p = player();
    let uc = h.register_for_event();

    uc.execute(p.clone(), e.id).await.unwrap();
    let again = uc.execute(p, e.id).await.unwrap();

    assert!(matches!(again, RegistrationOutcome::AlreadyRegistered), "got {again:?}");
    assert_eq!(h.ledger.registrations().len(), 1);
}

#[tokio::test]
async fn should_reject_disabled_or_unknown_event() {
    let h = Harness::new();
    let closed = h.ledger.add_event(disabled(Pence::ZERO));
    let uc = h.register_for_event();

    let result = uc.execute(player(), closed.id).await;
    assert!(
        matches!(result, Err(LedgerError::EventClosed)),
        "expected EventClosed, got {result:?}"
    );

    let result = uc.execute(player(), EventId::generate()).await;
    assert!(
        matches!(result, Err(LedgerError::EventNotFound)),
        "expected EventNotFound, got {result:?}"
    );
    assert!(h.ledger.registrations().is_empty());
}

#[tokio::test]
async fn should_require_verified_email_for_paid_event() {
    let h = Harness::new();
    let e = h.ledger.add_event(event(Pence(2_500)));
    let mut p = verified_player("golfer@example.com");
    p.email_verified = false;

    let result = h.register_for_event().execute(p, e.id).await;

    assert!(
        matches!(result, Err(LedgerError::EmailRequired)),
        "expected EmailRequired, got {result:?}"
    );
    assert!(h.payments.requests().is_empty());
}

#[tokio::test]
async fn should_hand_back_checkout_for_paid_event() {
    let h = Harness::new();
    let e = h.ledger.add_event(event(Pence(2_500)));
    let p = verified_player("golfer@example.com");

    let outcome = h.register_for_event().execute(p.clone(), e.id).await.unwrap();

    let RegistrationOutcome::CheckoutRequired { session_id, url } = outcome else {
        panic!("expected CheckoutRequired, got {outcome:?}");
    };
    assert!(url.contains(&session_id));

    let requests = h.payments.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].kind, CheckoutKind::Event(e.id));
    assert_eq!(requests[0].amount, Pence(2_500));
    assert_eq!(requests[0].user_id, p.id);
    assert_eq!(requests[0].customer_email.as_deref(), Some("golfer@example.com"));
    assert!(requests[0].success_url.contains(&e.id.to_string()));
    assert!(h.ledger.registrations().is_empty());
}

// ── VerifyEventPayment ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_not_register_for_unpaid_session() {
    let h = Harness::new();
    let e = h.ledger.add_event(event(Pence(2_500)));
    let p = verified_player("golfer@example.com");
    let mut session = paid_session("cs_evt", CheckoutKind::Event(e.id), p.id);
    session.payment_status = "unpaid".to_owned();
    h.payments.add_session(session);

    let result = h
        .verify_event_payment()
        .execute(verify(&p, e.id, Some("cs_evt")))
        .await;

    assert!(
        matches!(result, Err(LedgerError::PaymentNotFound)),
        "expected PaymentNotFound, got {result:?}"
    );
    assert!(h.ledger.registrations().is_empty());
}

#[tokio::test]
async fn should_register_once_for_paid_session() {
    let h = Harness::new();
    let e = h.ledger.add_event(event(Pence(2_500)));
    let p = verified_player("golfer@example.com");
    h.payments
        .add_session(paid_session("cs_evt", CheckoutKind::Event(e.id), p.id));
    let uc = h.verify_event_payment();

    let first = uc.execute(verify(&p, e.id, Some("cs_evt"))).await.unwrap();
    let second = uc.execute(verify(&p, e.id, Some("cs_evt"))).await.unwrap();

    match first {
        RegistrationOutcome::Registered(registration) => {
            assert_eq!(registration.payment_reference.as_deref(), Some("cs_evt"));
        }
        other => panic!("expected Registered, got {other:?}"),
    }
    assert!(
        matches!(second, RegistrationOutcome::AlreadyRegistered),
        "got {second:?}"
    );
    assert_eq!(h.ledger.registrations().len(), 1);
}

#[tokio::test]
async fn should_register_once_under_concurrent_verification() {
    let h = Harness::new();
    let e = h.ledger.add_event(event(Pence(2_500)));
    let p = verified_player("golfer@example.com");
    h.payments
        .add_session(paid_session("cs_evt", CheckoutKind::Event(e.id), p.id));
    let uc = h.verify_event_payment();

    let (a, b) = tokio::join!(
        uc.execute(verify(&p, e.id, Some("cs_evt"))),
        uc.execute(verify(&p, e.id, Some("cs_evt")))
    );

    let outcomes = [a.unwrap(), b.unwrap()];
    let registered = outcomes
        .iter()
        .filter(|o| matches!(o, RegistrationOutcome::Registered(_)))
        .count();
    assert_eq!(registered, 1);
    assert_eq!(h.ledger.registrations().len(), 1);
}

#[tokio::test]
async fn should_scan_recent_sessions_when_id_is_missing() {
    let h = Harness::new();
    let e = h.ledger.add_event(event(Pence(2_500)));
    let other_event = h.ledger.add_event(event(Pence(1_000)));
    let p = verified_player("golfer@example.com");
    h.payments
        .add_session(paid_session("cs_mine", CheckoutKind::Event(e.id), p.id));
    h.payments.add_session(paid_session(
        "cs_elsewhere",
        CheckoutKind::Event(other_event.id),
        p.id,
    ));
    h.payments
        .add_session(paid_session("cs_play", CheckoutKind::SinglePlay, p.id));

    let outcome = h
        .verify_event_payment()
        .execute(verify(&p, e.id, None))
        .await
        .unwrap();

    match outcome {
        RegistrationOutcome::Registered(registration) => {
            assert_eq!(registration.event_id, e.id);
            assert_eq!(registration.payment_reference.as_deref(), Some("cs_mine"));
        }
        other => panic!("expected Registered, got {other:?}"),
    }
}

#[tokio::test]
async fn should_not_accept_another_players_session() {
    let h = Harness::new();
    let e = h.ledger.add_event(event(Pence(2_500)));
    let owner = verified_player("owner@example.com");
    let p = verified_player("golfer@example.com");
    h.payments
        .add_session(paid_session("cs_evt", CheckoutKind::Event(e.id), owner.id));
    let uc = h.verify_event_payment();

    let by_id = uc.execute(verify(&p, e.id, Some("cs_evt"))).await;
    let by_scan = uc.execute(verify(&p, e.id, None)).await;

    assert!(matches!(by_id, Err(LedgerError::PaymentNotFound)), "got {by_id:?}");
    assert!(matches!(by_scan, Err(LedgerError::PaymentNotFound)), "got {by_scan:?}");
    assert!(h.ledger.registrations().is_empty());
}

// ── Admin ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_update_entry_fee_and_reject_negative() {
    let h = Harness::new();
    let e = h.ledger.add_event(event(Pence(2_500)));
    let uc = UpdateEventEntryFeeUseCase {
        events: h.ledger.clone(),
    };

    let updated = uc.execute(e.id, Pence::ZERO).await.unwrap();
    assert_eq!(updated.entry_fee, Pence::ZERO);

    let negative = uc.execute(e.id, Pence(-100)).await;
    assert!(matches!(negative, Err(LedgerError::InvalidInput(_))), "got {negative:?}");

    let missing = uc.execute(EventId::generate(), Pence(100)).await;
    assert!(matches!(missing, Err(LedgerError::EventNotFound)), "got {missing:?}");
}

#[tokio::test]
async fn should_list_registrations_and_mark_attendance() {
    let h = Harness::new();
    let e = h.ledger.add_event(event(Pence::ZERO));
    let register = h.register_for_event();
    register.execute(player(), e.id).await.unwrap();
    register.execute(player(), e.id).await.unwrap();

    let registrations = ListEventRegistrationsUseCase {
        events: h.ledger.clone(),
        registrations: h.ledger.clone(),
    }
    .execute(e.id)
    .await
    .unwrap();
    assert_eq!(registrations.len(), 2);

    let attendance = MarkAttendanceUseCase {
        registrations: h.ledger.clone(),
    };
    attendance.execute(registrations[0].id, true).await.unwrap();
    let attended = h.ledger.registrations().iter().filter(|r| r.attended).count();
    assert_eq!(attended, 1);

    let missing = attendance.execute(RegistrationId::generate(), true).await;
    assert!(
        matches!(missing, Err(LedgerError::RegistrationNotFound)),
        "expected RegistrationNotFound, got {missing:?}"
    );
}
