use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use holeout_domain::day::BusinessCalendar;
use holeout_domain::id::{
    ClaimId, CourseId, CreditId, EventId, RegistrationId, ShotId, UserId,
};
use holeout_domain::money::Pence;
use holeout_domain::pagination::PageRequest;
use holeout_domain::role::UserRole;
use holeout_ledger::domain::repository::{
    ClaimRepository, CourseRepository, CreditRepository, EventRepository, NotificationPort,
    PaymentPort, RegistrationRepository, ShotObserver, ShotRepository, SubscriptionPort,
};
use holeout_ledger::domain::types::{
    CheckoutKind, CheckoutRequest, CheckoutSession, CheckoutSettings, ClaimNotification,
    ClaimStatus, Course, CreditRedemption, Event, EventRegistration, Player, PrizeClaim,
    RedeemWrite, Shot, ShotWrite, SinglePlayCredit, SubscriptionSnapshot,
};
use holeout_ledger::error::LedgerError;
use holeout_ledger::usecase::claim::SubmitClaimUseCase;
use holeout_ledger::usecase::credit::{RecordSinglePlayPaymentUseCase, RedeemCreditUseCase};
use holeout_ledger::usecase::eligibility::EvaluateEligibilityUseCase;
use holeout_ledger::usecase::event::{RegisterForEventUseCase, VerifyEventPaymentUseCase};
use holeout_ledger::usecase::shot::LogShotUseCase;
use holeout_testing::clock::FixedClock;

/// 2025-06-14 10:00 UTC (11:00 in London).
pub fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 14, 10, 0, 0).unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn player() -> Player {
    Player {
        id: UserId::generate(),
        email: None,
        email_verified: false,
        role: UserRole::Player,
    }
}

pub fn verified_player(email: &str) -> Player {
    Player {
        email: Some(email.to_owned()),
        email_verified: true,
        ..player()
    }
}

pub fn open_course(name: &str) -> Course {
    Course {
        id: CourseId::generate(),
        name: name.to_owned(),
        location: None,
        image_url: None,
        par_3_count: Some(4),
        priority: None,
        coming_soon: false,
        prize_amount: Some(Pence(100_000)),
    }
}

pub fn coming_soon_course(name: &str) -> Course {
    Course {
        coming_soon: true,
        ..open_course(name)
    }
}

pub fn event(entry_fee: Pence) -> Event {
    Event {
        id: EventId::generate(),
        round: "Round 1".to_owned(),
        region: "North".to_owned(),
        venue: "Royal Birkdale".to_owned(),
        date: day(2025, 7, 1),
        entry_fee,
        nearest_pin_prize: Some(Pence(5_000)),
        enabled: true,
    }
}

pub fn credit(user_id: UserId, payment_reference: &str, purchased_at: DateTime<Utc>) -> SinglePlayCredit {
    SinglePlayCredit {
        id: CreditId::generate(),
        user_id,
        payment_reference: payment_reference.to_owned(),
        purchased_at,
        used_at: None,
        redeemed_on: None,
        course_id: None,
    }
}

pub fn paid_session(id: &str, kind: CheckoutKind, user_id: UserId) -> CheckoutSession {
    CheckoutSession {
        id: id.to_owned(),
        url: None,
        payment_status: "paid".to_owned(),
        metadata_kind: Some(kind.as_str().to_owned()),
        metadata_user_id: Some(user_id.to_string()),
        metadata_event_id: match kind {
            CheckoutKind::Event(event_id) => Some(event_id.to_string()),
            CheckoutKind::SinglePlay => None,
        },
    }
}

// ── MemoryLedger ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Tables {
    pub courses: Vec<Course>,
    pub events: Vec<Event>,
    pub shots: Vec<Shot>,
    pub credits: Vec<SinglePlayCredit>,
    pub claims: Vec<PrizeClaim>,
    pub registrations: Vec<EventRegistration>,
}

/// In-memory store that enforces every uniqueness rule under one lock.
///
/// Advisory reads yield after taking their snapshot, so use cases joined
/// concurrently all read before any of them writes and only the guarded
/// writes decide the outcome.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    pub tables: Arc<Mutex<Tables>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_course(&self, course: Course) -> Course {
        self.tables.lock().unwrap().courses.push(course.clone());
        course
    }

    pub fn add_event(&self, event: Event) -> Event {
        self.tables.lock().unwrap().events.push(event.clone());
        event
    }

    pub fn add_credit(&self, credit: SinglePlayCredit) -> SinglePlayCredit {
        self.tables.lock().unwrap().credits.push(credit.clone());
        credit
    }

    pub fn add_shot(&self, shot: Shot) -> Shot {
        self.tables.lock().unwrap().shots.push(shot.clone());
        shot
    }

    pub fn shots(&self) -> Vec<Shot> {
        self.tables.lock().unwrap().shots.clone()
    }

    pub fn credits(&self) -> Vec<SinglePlayCredit> {
        self.tables.lock().unwrap().credits.clone()
    }

    pub fn claims(&self) -> Vec<PrizeClaim> {
        self.tables.lock().unwrap().claims.clone()
    }

    pub fn registrations(&self) -> Vec<EventRegistration> {
        self.tables.lock().unwrap().registrations.clone()
    }

    fn apply_redemption(tables: &mut Tables, redemption: &CreditRedemption) -> RedeemWrite {
        let cap_reached = tables
            .credits
            .iter()
            .any(|c| c.user_id == redemption.user_id && c.redeemed_on == Some(redemption.redeemed_on));
        let Some(credit) = tables.credits.iter_mut().find(|c| {
            c.id == redemption.credit_id && c.user_id == redemption.user_id && c.used_at.is_none()
        }) else {
            return RedeemWrite::AlreadyUsed;
        };
        if cap_reached {
            return RedeemWrite::DailyCapReached;
        }
        credit.used_at = Some(redemption.used_at);
        credit.redeemed_on = Some(redemption.redeemed_on);
        credit.course_id = Some(redemption.course_id);
        RedeemWrite::Redeemed
    }

    fn is_duplicate_shot(tables: &Tables, shot: &Shot) -> bool {
        tables.shots.iter().any(|s| {
            s.user_id == shot.user_id && s.course_id == shot.course_id && s.play_day == shot.play_day
        })
    }
}

/// Hand a snapshot back after letting other joined futures run.
async fn stale<T>(value: T) -> T {
    tokio::task::yield_now().await;
    value
}

fn page_of<T: Clone>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

impl CourseRepository for MemoryLedger {
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, LedgerError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Course>, LedgerError> {
        Ok(self.tables.lock().unwrap().courses.clone())
    }

    async fn update_prize_amount(
        &self,
        id: CourseId,
        prize_amount: Option<Pence>,
    ) -> Result<bool, LedgerError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.courses.iter_mut().find(|c| c.id == id) {
            Some(course) => {
                course.prize_amount = prize_amount;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl EventRepository for MemoryLedger {
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, LedgerError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.events.iter().find(|e| e.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Event>, LedgerError> {
        Ok(self.tables.lock().unwrap().events.clone())
    }

    async fn update_entry_fee(&self, id: EventId, entry_fee: Pence) -> Result<bool, LedgerError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.entry_fee = entry_fee;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl ShotRepository for MemoryLedger {
    async fn exists_on_day(
        &self,
        user_id: UserId,
        course_id: CourseId,
        day: NaiveDate,
    ) -> Result<bool, LedgerError> {
        let found = {
            let tables = self.tables.lock().unwrap();
            tables
                .shots
                .iter()
                .any(|s| s.user_id == user_id && s.course_id == course_id && s.play_day == day)
        };
        Ok(stale(found).await)
    }

    async fn find_by_id(&self, id: ShotId) -> Result<Option<Shot>, LedgerError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.shots.iter().find(|s| s.id == id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Shot>, LedgerError> {
        let mut shots: Vec<Shot> = {
            let tables = self.tables.lock().unwrap();
            tables.shots.iter().filter(|s| s.user_id == user_id).cloned().collect()
        };
        shots.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page_of(shots, page))
    }

    async fn create(&self, shot: &Shot) -> Result<ShotWrite, LedgerError> {
        let mut tables = self.tables.lock().unwrap();
        if Self::is_duplicate_shot(&tables, shot) {
            return Ok(ShotWrite::DuplicateShot);
        }
        tables.shots.push(shot.clone());
        Ok(ShotWrite::Recorded)
    }

    async fn create_with_credit(
        &self,
        shot: &Shot,
        redemption: &CreditRedemption,
    ) -> Result<ShotWrite, LedgerError> {
        // Same order as the database transaction: shot uniqueness, then credit.
        let mut tables = self.tables.lock().unwrap();
        if Self::is_duplicate_shot(&tables, shot) {
            return Ok(ShotWrite::DuplicateShot);
        }
        match Self::apply_redemption(&mut tables, redemption) {
            RedeemWrite::Redeemed => {}
            RedeemWrite::AlreadyUsed => return Ok(ShotWrite::CreditUnavailable),
            RedeemWrite::DailyCapReached => return Ok(ShotWrite::CreditCapReached),
        }
        tables.shots.push(shot.clone());
        Ok(ShotWrite::Recorded)
    }
}

impl CreditRepository for MemoryLedger {
    async fn list_unredeemed(
        &self,
        user_id: UserId,
    ) -> Result<Vec<SinglePlayCredit>, LedgerError> {
        let mut credits: Vec<SinglePlayCredit> = {
            let tables = self.tables.lock().unwrap();
            tables
                .credits
                .iter()
                .filter(|c| c.user_id == user_id && c.used_at.is_none())
                .cloned()
                .collect()
        };
        credits.sort_by(|a, b| (a.purchased_at, a.id).cmp(&(b.purchased_at, b.id)));
        Ok(stale(credits).await)
    }

    async fn has_redemption_on(
        &self,
        user_id: UserId,
        day: NaiveDate,
    ) -> Result<bool, LedgerError> {
        let found = {
            let tables = self.tables.lock().unwrap();
            tables
                .credits
                .iter()
                .any(|c| c.user_id == user_id && c.redeemed_on == Some(day))
        };
        Ok(stale(found).await)
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<SinglePlayCredit>, LedgerError> {
        let mut credits: Vec<SinglePlayCredit> = {
            let tables = self.tables.lock().unwrap();
            tables.credits.iter().filter(|c| c.user_id == user_id).cloned().collect()
        };
        credits.sort_by(|a, b| b.purchased_at.cmp(&a.purchased_at));
        Ok(page_of(credits, page))
    }

    async fn find_by_payment_reference(
        &self,
        payment_reference: &str,
    ) -> Result<Option<SinglePlayCredit>, LedgerError> {
        let found = {
            let tables = self.tables.lock().unwrap();
            tables
                .credits
                .iter()
                .find(|c| c.payment_reference == payment_reference)
                .cloned()
        };
        Ok(stale(found).await)
    }

    async fn create(&self, credit: &SinglePlayCredit) -> Result<bool, LedgerError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .credits
            .iter()
            .any(|c| c.payment_reference == credit.payment_reference)
        {
            return Ok(false);
        }
        tables.credits.push(credit.clone());
        Ok(true)
    }

    async fn redeem(&self, redemption: &CreditRedemption) -> Result<RedeemWrite, LedgerError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(Self::apply_redemption(&mut tables, redemption))
    }
}

impl ClaimRepository for MemoryLedger {
    async fn exists_on_day(&self, user_id: UserId, day: NaiveDate) -> Result<bool, LedgerError> {
        let found = {
            let tables = self.tables.lock().unwrap();
            tables
                .claims
                .iter()
                .any(|c| c.user_id == user_id && c.claim_day == day)
        };
        Ok(stale(found).await)
    }

    async fn create(&self, claim: &PrizeClaim) -> Result<bool, LedgerError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .claims
            .iter()
            .any(|c| c.user_id == claim.user_id && c.claim_day == claim.claim_day)
        {
            return Ok(false);
        }
        tables.claims.push(claim.clone());
        Ok(true)
    }

    async fn find_by_id(&self, id: ClaimId) -> Result<Option<PrizeClaim>, LedgerError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.claims.iter().find(|c| c.id == id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<PrizeClaim>, LedgerError> {
        let mut claims: Vec<PrizeClaim> = {
            let tables = self.tables.lock().unwrap();
            tables.claims.iter().filter(|c| c.user_id == user_id).cloned().collect()
        };
        claims.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page_of(claims, page))
    }

    async fn list(
        &self,
        status: Option<ClaimStatus>,
        page: PageRequest,
    ) -> Result<Vec<PrizeClaim>, LedgerError> {
        let mut claims: Vec<PrizeClaim> = {
            let tables = self.tables.lock().unwrap();
            tables
                .claims
                .iter()
                .filter(|c| status.is_none_or(|s| c.status == s))
                .cloned()
                .collect()
        };
        claims.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page_of(claims, page))
    }

    async fn update_review(
        &self,
        id: ClaimId,
        status: Option<ClaimStatus>,
        notes: Option<String>,
    ) -> Result<bool, LedgerError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(claim) = tables.claims.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        if let Some(status) = status {
            claim.status = status;
        }
        if let Some(notes) = notes {
            claim.notes = Some(notes);
        }
        Ok(true)
    }
}

impl RegistrationRepository for MemoryLedger {
    async fn find(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Option<EventRegistration>, LedgerError> {
        let found = {
            let tables = self.tables.lock().unwrap();
            tables
                .registrations
                .iter()
                .find(|r| r.user_id == user_id && r.event_id == event_id)
                .cloned()
        };
        Ok(stale(found).await)
    }

    async fn create(&self, registration: &EventRegistration) -> Result<bool, LedgerError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .registrations
            .iter()
            .any(|r| r.user_id == registration.user_id && r.event_id == registration.event_id)
        {
            return Ok(false);
        }
        tables.registrations.push(registration.clone());
        Ok(true)
    }

    async fn list_by_event(
        &self,
        event_id: EventId,
    ) -> Result<Vec<EventRegistration>, LedgerError> {
        let mut registrations: Vec<EventRegistration> = {
            let tables = self.tables.lock().unwrap();
            tables
                .registrations
                .iter()
                .filter(|r| r.event_id == event_id)
                .cloned()
                .collect()
        };
        registrations.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
        Ok(registrations)
    }

    async fn set_attended(
        &self,
        id: RegistrationId,
        attended: bool,
    ) -> Result<bool, LedgerError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.registrations.iter_mut().find(|r| r.id == id) {
            Some(registration) => {
                registration.attended = attended;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockSubscriptions ────────────────────────────────────────────────────────

/// Subscription status by user. Unknown users are not subscribed.
#[derive(Clone, Default)]
pub struct MockSubscriptions {
    pub active: Arc<Mutex<Vec<UserId>>>,
}

impl MockSubscriptions {
    pub fn subscribe(&self, user_id: UserId) {
        self.active.lock().unwrap().push(user_id);
    }
}

impl SubscriptionPort for MockSubscriptions {
    async fn status(&self, player: &Player) -> Result<SubscriptionSnapshot, LedgerError> {
        let active = self.active.lock().unwrap().contains(&player.id);
        Ok(SubscriptionSnapshot {
            active,
            renewal_date: None,
            cancelled: false,
            checked_at: morning(),
        })
    }
}

// ── MockPayments ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockPayments {
    pub sessions: Arc<Mutex<Vec<CheckoutSession>>>,
    pub requests: Arc<Mutex<Vec<CheckoutRequest>>>,
}

impl MockPayments {
    pub fn add_session(&self, session: CheckoutSession) {
        self.sessions.lock().unwrap().push(session);
    }

    pub fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PaymentPort for MockPayments {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, LedgerError> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request.clone());
        let id = format!("cs_test_{}", requests.len());
        Ok(CheckoutSession {
            url: Some(format!("https://checkout.test/{id}")),
            id,
            payment_status: "unpaid".to_owned(),
            metadata_kind: Some(request.kind.as_str().to_owned()),
            metadata_user_id: Some(request.user_id.to_string()),
            metadata_event_id: match request.kind {
                CheckoutKind::Event(event_id) => Some(event_id.to_string()),
                CheckoutKind::SinglePlay => None,
            },
        })
    }

    async fn get_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<Option<CheckoutSession>, LedgerError> {
        let found = {
            let sessions = self.sessions.lock().unwrap();
            sessions.iter().find(|s| s.id == session_id).cloned()
        };
        Ok(stale(found).await)
    }

    async fn list_recent_checkout_sessions(
        &self,
        limit: u32,
    ) -> Result<Vec<CheckoutSession>, LedgerError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions.iter().rev().take(limit as usize).cloned().collect())
    }
}

// ── MockNotifier ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<ClaimNotification>>>,
    pub fail: bool,
}

impl MockNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<ClaimNotification> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationPort for MockNotifier {
    async fn send_claim_notification(
        &self,
        notification: ClaimNotification,
    ) -> Result<(), LedgerError> {
        if self.fail {
            return Err(LedgerError::external(anyhow::anyhow!("smtp down")));
        }
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}

// ── RecordingObserver ────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingObserver {
    pub shots: Arc<Mutex<Vec<Shot>>>,
}

impl ShotObserver for RecordingObserver {
    fn shot_recorded(&self, shot: &Shot) {
        self.shots.lock().unwrap().push(shot.clone());
    }
}

// ── Harness ──────────────────────────────────────────────────────────────────

/// Wires use cases to one shared in-memory ledger and set of mock ports.
pub struct Harness {
    pub ledger: MemoryLedger,
    pub subscriptions: MockSubscriptions,
    pub payments: MockPayments,
    pub notifier: MockNotifier,
    pub observer: RecordingObserver,
    pub clock: Arc<FixedClock>,
    pub calendar: BusinessCalendar,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            ledger: MemoryLedger::new(),
            subscriptions: MockSubscriptions::default(),
            payments: MockPayments::default(),
            notifier: MockNotifier::default(),
            observer: RecordingObserver::default(),
            clock: Arc::new(FixedClock::at(morning())),
            calendar: BusinessCalendar::default(),
        }
    }

    pub fn checkout_settings() -> CheckoutSettings {
        CheckoutSettings {
            app_origin: "https://app.test".to_owned(),
            single_play_price: Pence(500),
        }
    }

    pub fn eligibility(
        &self,
    ) -> EvaluateEligibilityUseCase<
        MemoryLedger,
        MemoryLedger,
        MemoryLedger,
        MockSubscriptions,
        Arc<FixedClock>,
    > {
        EvaluateEligibilityUseCase {
            courses: self.ledger.clone(),
            shots: self.ledger.clone(),
            credits: self.ledger.clone(),
            subscriptions: self.subscriptions.clone(),
            clock: Arc::clone(&self.clock),
            calendar: self.calendar,
        }
    }

    pub fn log_shot(
        &self,
    ) -> LogShotUseCase<
        MemoryLedger,
        MemoryLedger,
        MemoryLedger,
        MockSubscriptions,
        Arc<FixedClock>,
        RecordingObserver,
    > {
        LogShotUseCase {
            eligibility: self.eligibility(),
            shots: self.ledger.clone(),
            observer: self.observer.clone(),
        }
    }

    pub fn redeem_credit(&self) -> RedeemCreditUseCase<MemoryLedger, MemoryLedger, Arc<FixedClock>> {
        RedeemCreditUseCase {
            courses: self.ledger.clone(),
            credits: self.ledger.clone(),
            clock: Arc::clone(&self.clock),
            calendar: self.calendar,
        }
    }

    pub fn record_payment(
        &self,
    ) -> RecordSinglePlayPaymentUseCase<MemoryLedger, MockPayments, Arc<FixedClock>> {
        RecordSinglePlayPaymentUseCase {
            credits: self.ledger.clone(),
            payments: self.payments.clone(),
            clock: Arc::clone(&self.clock),
        }
    }

    pub fn submit_claim(
        &self,
    ) -> SubmitClaimUseCase<
        MemoryLedger,
        MemoryLedger,
        MemoryLedger,
        MemoryLedger,
        MockSubscriptions,
        MockNotifier,
        Arc<FixedClock>,
    > {
        SubmitClaimUseCase {
            shots: self.ledger.clone(),
            courses: self.ledger.clone(),
            events: self.ledger.clone(),
            claims: self.ledger.clone(),
            subscriptions: self.subscriptions.clone(),
            notifier: self.notifier.clone(),
            clock: Arc::clone(&self.clock),
            calendar: self.calendar,
        }
    }

    pub fn register_for_event(
        &self,
    ) -> RegisterForEventUseCase<MemoryLedger, MemoryLedger, MockPayments, Arc<FixedClock>> {
        RegisterForEventUseCase {
            events: self.ledger.clone(),
            registrations: self.ledger.clone(),
            payments: self.payments.clone(),
            clock: Arc::clone(&self.clock),
            settings: Self::checkout_settings(),
        }
    }

    pub fn verify_event_payment(
        &self,
    ) -> VerifyEventPaymentUseCase<MemoryLedger, MemoryLedger, MockPayments, Arc<FixedClock>> {
        VerifyEventPaymentUseCase {
            events: self.ledger.clone(),
            registrations: self.ledger.clone(),
            payments: self.payments.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}
