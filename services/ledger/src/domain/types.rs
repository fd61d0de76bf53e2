use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use holeout_domain::id::{ClaimId, CourseId, CreditId, EventId, RegistrationId, ShotId, UserId};
use holeout_domain::money::Pence;
use holeout_domain::role::UserRole;

/// How many recent checkout sessions are scanned when verifying an event payment
/// without a session id.
pub const RECENT_SESSION_SCAN_LIMIT: u32 = 10;

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: UserId,
    pub email: Option<String>,
    pub email_verified: bool,
    pub role: UserRole,
}

impl Player {
    /// Email usable for payment and subscription lookups.
    pub fn verified_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|_| self.email_verified)
    }
}

/// Point-in-time subscription state for a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionSnapshot {
    pub active: bool,
    pub renewal_date: Option<DateTime<Utc>>,
    pub cancelled: bool,
    pub checked_at: DateTime<Utc>,
}

impl SubscriptionSnapshot {
    pub fn inactive(checked_at: DateTime<Utc>) -> Self {
        Self {
            active: false,
            renewal_date: None,
            cancelled: false,
            checked_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub par_3_count: Option<i32>,
    pub priority: Option<i32>,
    pub coming_soon: bool,
    pub prize_amount: Option<Pence>,
}

#[derive(Debug, Clone)]
pub struct Event {
    pub id: EventId,
    pub round: String,
    pub region: String,
    pub venue: String,
    pub date: NaiveDate,
    pub entry_fee: Pence,
    pub nearest_pin_prize: Option<Pence>,
    pub enabled: bool,
}

impl Event {
    /// Product line shown on the checkout page.
    pub fn checkout_title(&self) -> String {
        format!("{} - {}", self.round, self.region)
    }

    pub fn checkout_description(&self) -> String {
        format!("Event at {} on {}", self.venue, self.date)
    }
}

#[derive(Debug, Clone)]
pub struct Shot {
    pub id: ShotId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub created_at: DateTime<Utc>,
    /// Business day of `created_at`; the uniqueness key.
    pub play_day: NaiveDate,
    /// Client-asserted, display only.
    pub played_at: Option<DateTime<Utc>>,
    pub is_hole_in_one: bool,
}

#[derive(Debug, Clone)]
pub struct SinglePlayCredit {
    pub id: CreditId,
    pub user_id: UserId,
    pub payment_reference: String,
    pub purchased_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub redeemed_on: Option<NaiveDate>,
    pub course_id: Option<CourseId>,
}

impl SinglePlayCredit {
    pub fn is_redeemed(&self) -> bool {
        self.used_at.is_some()
    }
}

/// The write that consumes a credit: `used_at` null -> `used_at`.
#[derive(Debug, Clone)]
pub struct CreditRedemption {
    pub credit_id: CreditId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub used_at: DateTime<Utc>,
    pub redeemed_on: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown claim status: {other}")),
        }
    }
}

/// What a prize claim is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimTarget {
    Course(CourseId),
    Event(EventId),
}

impl ClaimTarget {
    pub fn course_id(self) -> Option<CourseId> {
        match self {
            Self::Course(id) => Some(id),
            Self::Event(_) => None,
        }
    }

    pub fn event_id(self) -> Option<EventId> {
        match self {
            Self::Event(id) => Some(id),
            Self::Course(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrizeClaim {
    pub id: ClaimId,
    pub user_id: UserId,
    pub target: ClaimTarget,
    pub shot_id: Option<ShotId>,
    /// Date of the hole-in-one as asserted by the player (or taken from the shot).
    pub claim_date: NaiveDate,
    /// Business day of submission; the uniqueness key.
    pub claim_day: NaiveDate,
    pub tee_time: Option<String>,
    pub time_of_hole_in_one: Option<String>,
    pub notes: Option<String>,
    pub prize_amount: Option<Pence>,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct EventRegistration {
    pub id: RegistrationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub payment_reference: Option<String>,
    pub attended: bool,
    pub registered_at: DateTime<Utc>,
}

// ── Eligibility ──────────────────────────────────────────────────────────────

/// Why a shot may not be logged right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    CourseNotOpen,
    AlreadyPlayedToday,
    NoEntitlement,
    CreditAlreadyUsedToday,
}

impl BlockReason {
    pub fn kind(self) -> &'static str {
        match self {
            Self::CourseNotOpen => "COURSE_NOT_OPEN",
            Self::AlreadyPlayedToday => "ALREADY_PLAYED_TODAY",
            Self::NoEntitlement => "NO_ENTITLEMENT",
            Self::CreditAlreadyUsedToday => "CREDIT_ALREADY_USED_TODAY",
        }
    }

    /// Player-facing text.
    pub fn message(self) -> &'static str {
        match self {
            Self::CourseNotOpen => "this course is not open for play yet",
            Self::AlreadyPlayedToday => "already played this course today",
            Self::NoEntitlement => "subscribe or buy a single-play credit to play",
            Self::CreditAlreadyUsedToday => "a single-play credit was already used today",
        }
    }
}

/// What funds an allowed shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitlementSource {
    Subscription,
    SinglePlayCredit(CreditId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed(EntitlementSource),
    Blocked(BlockReason),
}

// ── Payments ─────────────────────────────────────────────────────────────────

/// What a checkout session pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutKind {
    SinglePlay,
    Event(EventId),
}

impl CheckoutKind {
    pub const SINGLE_PLAY: &'static str = "single_play";
    pub const EVENT: &'static str = "event";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SinglePlay => Self::SINGLE_PLAY,
            Self::Event(_) => Self::EVENT,
        }
    }
}

/// Where checkout pages send the player back to, and what a single play costs.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub app_origin: String,
    pub single_play_price: Pence,
}

impl CheckoutSettings {
    /// `{CHECKOUT_SESSION_ID}` is substituted by the payment processor.
    pub fn single_play_success_url(&self) -> String {
        format!(
            "{}/?single_play_success=true&session_id={{CHECKOUT_SESSION_ID}}",
            self.app_origin
        )
    }

    pub fn single_play_cancel_url(&self) -> String {
        format!("{}/?single_play_canceled=true", self.app_origin)
    }

    pub fn event_success_url(&self, event_id: EventId) -> String {
        format!(
            "{}/?event_success={event_id}&session_id={{CHECKOUT_SESSION_ID}}",
            self.app_origin
        )
    }

    pub fn event_cancel_url(&self) -> String {
        format!("{}/?event_canceled=true", self.app_origin)
    }
}

/// Request to the payment processor for a one-off checkout.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub kind: CheckoutKind,
    pub user_id: UserId,
    pub customer_email: Option<String>,
    pub product_name: String,
    pub product_description: Option<String>,
    pub amount: Pence,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
    pub payment_status: String,
    pub metadata_kind: Option<String>,
    pub metadata_user_id: Option<String>,
    pub metadata_event_id: Option<String>,
}

impl CheckoutSession {
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }

    pub fn belongs_to(&self, user_id: UserId) -> bool {
        self.metadata_user_id.as_deref() == Some(user_id.to_string().as_str())
    }

    pub fn is_for_event(&self, event_id: EventId) -> bool {
        self.metadata_event_id.as_deref() == Some(event_id.to_string().as_str())
    }

    /// Sessions created before `kind` metadata existed carry no event id either.
    pub fn is_single_play(&self) -> bool {
        match self.metadata_kind.as_deref() {
            Some(kind) => kind == CheckoutKind::SINGLE_PLAY,
            None => self.metadata_event_id.is_none(),
        }
    }
}

// ── Outcomes ─────────────────────────────────────────────────────────────────

/// Result of recording a single-play payment.
#[derive(Debug, Clone)]
pub enum CreditOutcome {
    Recorded(SinglePlayCredit),
    AlreadyRecorded,
}

/// Result of a registration request or a payment verification.
#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    Registered(EventRegistration),
    AlreadyRegistered,
    CheckoutRequired { session_id: String, url: String },
}

/// Result of an atomic shot write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotWrite {
    Recorded,
    DuplicateShot,
    CreditUnavailable,
    CreditCapReached,
}

/// Result of a conditional credit redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemWrite {
    Redeemed,
    AlreadyUsed,
    DailyCapReached,
}

/// Details handed to the notification sender after a claim is stored.
#[derive(Debug, Clone)]
pub struct ClaimNotification {
    pub claim_id: ClaimId,
    pub player_email: Option<String>,
    pub target_name: String,
    pub claim_date: NaiveDate,
    pub tee_time: Option<String>,
    pub time_of_hole_in_one: Option<String>,
    pub notes: Option<String>,
    pub prize_amount: Option<Pence>,
}
