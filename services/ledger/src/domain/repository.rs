#![allow(async_fn_in_trait)]

use std::future::Future;

use chrono::NaiveDate;

use holeout_domain::id::{ClaimId, CourseId, EventId, RegistrationId, ShotId, UserId};
use holeout_domain::money::Pence;
use holeout_domain::pagination::PageRequest;

use crate::domain::types::{
    CheckoutRequest, CheckoutSession, ClaimNotification, ClaimStatus, Course, CreditRedemption,
    Event, EventRegistration, Player, PrizeClaim, RedeemWrite, Shot, ShotWrite, SinglePlayCredit,
    SubscriptionSnapshot,
};
use crate::error::LedgerError;

/// Read access to the course catalogue plus prize-pot management.
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, LedgerError>;

    /// All courses, highest priority first, then by name.
    async fn list(&self) -> Result<Vec<Course>, LedgerError>;

    /// Returns `false` if the course does not exist.
    async fn update_prize_amount(
        &self,
        id: CourseId,
        prize_amount: Option<Pence>,
    ) -> Result<bool, LedgerError>;
}

pub trait EventRepository: Send + Sync {
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, LedgerError>;

    /// All events, soonest first.
    async fn list(&self) -> Result<Vec<Event>, LedgerError>;

    /// Returns `false` if the event does not exist.
    async fn update_entry_fee(&self, id: EventId, entry_fee: Pence) -> Result<bool, LedgerError>;
}

/// Shots are append-only. Writes report uniqueness outcomes as values so callers
/// can map a lost race to a typed conflict.
pub trait ShotRepository: Send + Sync {
    async fn exists_on_day(
        &self,
        user_id: UserId,
        course_id: CourseId,
        day: NaiveDate,
    ) -> Result<bool, LedgerError>;

    async fn find_by_id(&self, id: ShotId) -> Result<Option<Shot>, LedgerError>;

    /// Newest first.
    async fn list_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Shot>, LedgerError>;

    /// Insert a subscription-funded shot. Yields `Recorded` or `DuplicateShot`.
    async fn create(&self, shot: &Shot) -> Result<ShotWrite, LedgerError>;

    /// Redeem a credit and insert the shot it funds in one transaction.
    /// Either both rows change or neither does.
    async fn create_with_credit(
        &self,
        shot: &Shot,
        redemption: &CreditRedemption,
    ) -> Result<ShotWrite, LedgerError>;
}

pub trait CreditRepository: Send + Sync {
    /// Unredeemed credits owned by the user, oldest purchase first.
    async fn list_unredeemed(&self, user_id: UserId)
    -> Result<Vec<SinglePlayCredit>, LedgerError>;

    /// Whether the user redeemed any credit on `day`.
    async fn has_redemption_on(&self, user_id: UserId, day: NaiveDate)
    -> Result<bool, LedgerError>;

    /// Newest purchase first.
    async fn list_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<SinglePlayCredit>, LedgerError>;

    async fn find_by_payment_reference(
        &self,
        payment_reference: &str,
    ) -> Result<Option<SinglePlayCredit>, LedgerError>;

    /// Insert a credit. Returns `false` when the payment reference is already recorded.
    async fn create(&self, credit: &SinglePlayCredit) -> Result<bool, LedgerError>;

    /// Conditional `used_at: NULL -> now` on one credit.
    async fn redeem(&self, redemption: &CreditRedemption) -> Result<RedeemWrite, LedgerError>;
}

pub trait ClaimRepository: Send + Sync {
    async fn exists_on_day(&self, user_id: UserId, day: NaiveDate) -> Result<bool, LedgerError>;

    /// Insert a claim. Returns `false` when the user already has a claim that day.
    async fn create(&self, claim: &PrizeClaim) -> Result<bool, LedgerError>;

    async fn find_by_id(&self, id: ClaimId) -> Result<Option<PrizeClaim>, LedgerError>;

    /// Newest first.
    async fn list_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<PrizeClaim>, LedgerError>;

    /// Every claim, optionally filtered by status, newest first.
    async fn list(
        &self,
        status: Option<ClaimStatus>,
        page: PageRequest,
    ) -> Result<Vec<PrizeClaim>, LedgerError>;

    /// Apply an admin review. `None` fields are left unchanged.
    /// Returns `false` if the claim does not exist.
    async fn update_review(
        &self,
        id: ClaimId,
        status: Option<ClaimStatus>,
        notes: Option<String>,
    ) -> Result<bool, LedgerError>;
}

pub trait RegistrationRepository: Send + Sync {
    async fn find(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Option<EventRegistration>, LedgerError>;

    /// Insert a registration. Returns `false` when (user, event) is already registered.
    async fn create(&self, registration: &EventRegistration) -> Result<bool, LedgerError>;

    /// Newest first.
    async fn list_by_event(&self, event_id: EventId)
    -> Result<Vec<EventRegistration>, LedgerError>;

    /// Returns `false` if the registration does not exist.
    async fn set_attended(&self, id: RegistrationId, attended: bool)
    -> Result<bool, LedgerError>;
}

/// Current subscription state of a player.
pub trait SubscriptionPort: Send + Sync {
    async fn status(&self, player: &Player) -> Result<SubscriptionSnapshot, LedgerError>;
}

/// One-off checkout sessions at the payment processor.
pub trait PaymentPort: Send + Sync {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, LedgerError>;

    /// `None` when the processor does not know the session id.
    async fn get_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<Option<CheckoutSession>, LedgerError>;

    /// Most recent sessions first.
    async fn list_recent_checkout_sessions(
        &self,
        limit: u32,
    ) -> Result<Vec<CheckoutSession>, LedgerError>;
}

/// Best-effort delivery of claim notifications. Runs detached from the request,
/// so the future must be `Send + 'static`-spawnable.
pub trait NotificationPort: Clone + Send + Sync + 'static {
    fn send_claim_notification(
        &self,
        notification: ClaimNotification,
    ) -> impl Future<Output = Result<(), LedgerError>> + Send;
}

/// Receives every shot after it is durably recorded.
pub trait ShotObserver: Send + Sync {
    fn shot_recorded(&self, shot: &Shot);
}
