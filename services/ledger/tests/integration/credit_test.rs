use chrono::Duration;

use holeout_domain::id::{CourseId, EventId};
use holeout_domain::money::Pence;
use holeout_domain::pagination::PageRequest;
use holeout_ledger::domain::types::{CheckoutKind, CreditOutcome, Player};
use holeout_ledger::error::LedgerError;
use holeout_ledger::usecase::credit::{
    CreateSinglePlayCheckoutUseCase, ListPlayerCreditsUseCase, RecordSinglePlayPaymentInput,
    RedeemCreditInput,
};

use crate::helpers::{
    Harness, credit, day, morning, open_course, paid_session, player, verified_player,
};

fn record(player: &Player, session_id: &str) -> RecordSinglePlayPaymentInput {
    RecordSinglePlayPaymentInput {
        player: player.clone(),
        session_id: session_id.to_owned(),
    }
}

fn redeem(player: &Player, course_id: CourseId) -> RedeemCreditInput {
    RedeemCreditInput {
        player: player.clone(),
        course_id,
    }
}

// ── Checkout ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_single_play_checkout_at_configured_price() {
    let h = Harness::new();
    let p = verified_player("golfer@example.com");

    let session = CreateSinglePlayCheckoutUseCase {
        payments: h.payments.clone(),
        settings: Harness::checkout_settings(),
    }
    .execute(p.clone())
    .await
    .unwrap();

    assert!(session.url.is_some());
    let requests = h.payments.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].kind, CheckoutKind::SinglePlay);
    assert_eq!(requests[0].amount, Pence(500));
    assert_eq!(requests[0].user_id, p.id);
    assert_eq!(requests[0].customer_email.as_deref(), Some("golfer@example.com"));
    assert!(requests[0].success_url.contains("session_id={CHECKOUT_SESSION_ID}"));
}

// ── RecordSinglePlayPayment ──────────────────────────────────────────────────

#[tokio::test]
async fn should_record_paid_session_once() {
    let h = Harness::new();
    let p = player();
    h.payments
        .add_session(paid_session("cs_paid", CheckoutKind::SinglePlay, p.id));
    let uc = h.record_payment();

    let first = uc.execute(record(&p, "cs_paid")).await.unwrap();
    let second = uc.execute(record(&p, " cs_paid ")).await.unwrap();

    match first {
        CreditOutcome::Recorded(credit) => {
            assert_eq!(credit.user_id, p.id);
            assert_eq!(credit.payment_reference, "cs_paid");
            assert_eq!(credit.purchased_at, morning());
            assert!(!credit.is_redeemed());
        }
        other => panic!("expected Recorded, got {other:?}"),
    }
    assert!(matches!(second, CreditOutcome::AlreadyRecorded), "got {second:?}");
    assert_eq!(h.ledger.credits().len(), 1);
}

#[tokio::test]
async fn should_record_one_credit_under_concurrent_verification() {
    let h = Harness::new();
    let p = player();
    h.payments
        .add_session(paid_session("cs_paid", CheckoutKind::SinglePlay, p.id));
    let uc = h.record_payment();

    let (a, b) = tokio::join!(
        uc.execute(record(&p, "cs_paid")),
        uc.execute(record(&p, "cs_paid"))
    );

    let outcomes = [a.unwrap(), b.unwrap()];
    let recorded = outcomes
        .iter()
        .filter(|o| matches!(o, CreditOutcome::Recorded(_)))
        .count();
    assert_eq!(recorded, 1);
    assert_eq!(h.ledger.credits().len(), 1);
}

#[tokio::test]
async fn should_not_record_unpaid_session() {
    let h = Harness::new();
    let p = player();
    let mut session = paid_session("cs_open", CheckoutKind::SinglePlay, p.id);
    session.payment_status = "unpaid".to_owned();
    h.payments.add_session(session);

    let result = h.record_payment().execute(record(&p, "cs_open")).await;

    assert!(
        matches!(result, Err(LedgerError::PaymentNotFound)),
        "expected PaymentNotFound, got {result:?}"
    );
    assert!(h.ledger.credits().is_empty());
}

#[tokio::test]
async fn should_not_turn_event_payment_into_credit() {
    let h = Harness::new();
    let p = player();
    h.payments.add_session(paid_session(
        "cs_event",
        CheckoutKind::Event(EventId::generate()),
        p.id,
    ));

    let result = h.record_payment().execute(record(&p, "cs_event")).await;

    assert!(
        matches!(result, Err(LedgerError::PaymentNotFound)),
        "expected PaymentNotFound, got {result:?}"
    );
    assert!(h.ledger.credits().is_empty());
}

#[tokio::test]
async fn should_not_record_another_players_session() {
    let h = Harness::new();
    let owner = player();
    let p = player();
    h.payments
        .add_session(paid_session("cs_paid", CheckoutKind::SinglePlay, owner.id));

    let result = h.record_payment().execute(record(&p, "cs_paid")).await;

    assert!(
        matches!(result, Err(LedgerError::PaymentNotFound)),
        "expected PaymentNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_or_blank_session_id() {
    let h = Harness::new();
    let p = player();
    let uc = h.record_payment();

    let unknown = uc.execute(record(&p, "cs_missing")).await;
    let blank = uc.execute(record(&p, "  ")).await;

    assert!(matches!(unknown, Err(LedgerError::PaymentNotFound)), "got {unknown:?}");
    assert!(matches!(blank, Err(LedgerError::InvalidInput(_))), "got {blank:?}");
}

// ── RedeemCredit ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_redeem_oldest_credit_first() {
    let h = Harness::new();
    let course = h.ledger.add_course(open_course("Prestwick"));
    let p = player();
    h.ledger.add_credit(credit(p.id, "cs_new", morning() - Duration::days(1)));
    let oldest = h
        .ledger
        .add_credit(credit(p.id, "cs_old", morning() - Duration::days(5)));

    let redeemed = h.redeem_credit().execute(redeem(&p, course.id)).await.unwrap();

    assert_eq!(redeemed, oldest.id);
    let credits = h.ledger.credits();
    let used = credits.iter().find(|c| c.id == oldest.id).unwrap();
    assert_eq!(used.redeemed_on, Some(day(2025, 6, 14)));
    assert_eq!(used.course_id, Some(course.id));
}

#[tokio::test]
async fn should_fail_without_unredeemed_credit() {
    let h = Harness::new();
    let course = h.ledger.add_course(open_course("Prestwick"));

    let result = h.redeem_credit().execute(redeem(&player(), course.id)).await;

    assert!(
        matches!(result, Err(LedgerError::NoCreditAvailable)),
        "expected NoCreditAvailable, got {result:?}"
    );
}

#[tokio::test]
async fn should_fail_for_unknown_course() {
    let h = Harness::new();
    let p = player();
    h.ledger.add_credit(credit(p.id, "cs_1", morning()));

    let result = h
        .redeem_credit()
        .execute(redeem(&p, CourseId::generate()))
        .await;

    assert!(
        matches!(result, Err(LedgerError::CourseNotFound)),
        "expected CourseNotFound, got {result:?}"
    );
    assert!(!h.ledger.credits()[0].is_redeemed());
}

#[tokio::test]
async fn should_allow_one_redemption_per_day() {
    let h = Harness::new();
    let course = h.ledger.add_course(open_course("Prestwick"));
    let p = player();
    h.ledger.add_credit(credit(p.id, "cs_1", morning() - Duration::days(2)));
    h.ledger.add_credit(credit(p.id, "cs_2", morning() - Duration::days(1)));
    let uc = h.redeem_credit();

    uc.execute(redeem(&p, course.id)).await.unwrap();
    let again = uc.execute(redeem(&p, course.id)).await;

    assert!(
        matches!(again, Err(LedgerError::CreditAlreadyUsedToday)),
        "expected CreditAlreadyUsedToday, got {again:?}"
    );

    h.clock.advance(Duration::days(1));
    uc.execute(redeem(&p, course.id)).await.unwrap();
    assert!(h.ledger.credits().iter().all(|c| c.is_redeemed()));
}

#[tokio::test]
async fn should_redeem_a_single_credit_once_under_concurrency() {
    let h = Harness::new();
    let course = h.ledger.add_course(open_course("Prestwick"));
    let p = player();
    let only = h.ledger.add_credit(credit(p.id, "cs_1", morning()));
    let uc = h.redeem_credit();

    let (a, b) = tokio::join!(
        uc.execute(redeem(&p, course.id)),
        uc.execute(redeem(&p, course.id))
    );

    let results = [a, b];
    let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners, vec![&only.id]);
    let loser = results.iter().find(|r| r.is_err()).unwrap();
    assert!(
        matches!(loser, Err(LedgerError::NoCreditAvailable)),
        "expected NoCreditAvailable, got {loser:?}"
    );
}

#[tokio::test]
async fn should_spend_one_of_two_credits_under_concurrency() {
    let h = Harness::new();
    let course = h.ledger.add_course(open_course("Prestwick"));
    let p = player();
    h.ledger.add_credit(credit(p.id, "cs_1", morning() - Duration::days(2)));
    h.ledger.add_credit(credit(p.id, "cs_2", morning() - Duration::days(1)));
    let uc = h.redeem_credit();

    let (a, b) = tokio::join!(
        uc.execute(redeem(&p, course.id)),
        uc.execute(redeem(&p, course.id))
    );

    let results = [a, b];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let loser = results.iter().find(|r| r.is_err()).unwrap();
    assert!(
        matches!(loser, Err(LedgerError::CreditAlreadyUsedToday)),
        "expected CreditAlreadyUsedToday, got {loser:?}"
    );
    let redeemed = h.ledger.credits().iter().filter(|c| c.is_redeemed()).count();
    assert_eq!(redeemed, 1);
}

#[tokio::test]
async fn should_list_own_credits_newest_first() {
    let h = Harness::new();
    let p = player();
    h.ledger.add_credit(credit(p.id, "cs_old", morning() - Duration::days(3)));
    let newest = h.ledger.add_credit(credit(p.id, "cs_new", morning()));
    h.ledger.add_credit(credit(player().id, "cs_other", morning()));

    let credits = ListPlayerCreditsUseCase {
        credits: h.ledger.clone(),
    }
    .execute(p.id, PageRequest::default())
    .await
    .unwrap();

    assert_eq!(credits.len(), 2);
    assert_eq!(credits[0].id, newest.id);
}
