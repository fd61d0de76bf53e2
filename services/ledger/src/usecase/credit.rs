use tracing::{info, warn};

use holeout_domain::clock::Clock;
use holeout_domain::day::BusinessCalendar;
use holeout_domain::id::{CourseId, CreditId, UserId};
use holeout_domain::pagination::PageRequest;

use crate::domain::repository::{CourseRepository, CreditRepository, PaymentPort};
use crate::domain::types::{
    CheckoutKind, CheckoutRequest, CheckoutSession, CheckoutSettings, CreditOutcome,
    CreditRedemption, Player, RedeemWrite, SinglePlayCredit,
};
use crate::error::LedgerError;

// ── RedeemCredit ─────────────────────────────────────────────────────────────

pub struct RedeemCreditInput {
    pub player: Player,
    pub course_id: CourseId,
}

/// Consume exactly one unredeemed credit for a course.
///
/// Candidates are tried oldest first. A candidate taken by a concurrent request
/// is skipped; the conditional write is the only guard.
pub struct RedeemCreditUseCase<C, K, T>
where
    C: CourseRepository,
    K: CreditRepository,
    T: Clock,
{
    pub courses: C,
    pub credits: K,
    pub clock: T,
    pub calendar: BusinessCalendar,
}

impl<C, K, T> RedeemCreditUseCase<C, K, T>
where
    C: CourseRepository,
    K: CreditRepository,
    T: Clock,
{
    pub async fn execute(&self, input: RedeemCreditInput) -> Result<CreditId, LedgerError> {
        let course = self
            .courses
            .find_by_id(input.course_id)
            .await?
            .ok_or(LedgerError::CourseNotFound)?;

        let user_id = input.player.id;
        let now = self.clock.now();
        let today = self.calendar.day_of(now);

        if self.credits.has_redemption_on(user_id, today).await? {
            return Err(LedgerError::CreditAlreadyUsedToday);
        }

        // Repository returns oldest purchase first.
        let candidates = self.credits.list_unredeemed(user_id).await?;
        for credit in candidates {
            let redemption = CreditRedemption {
                credit_id: credit.id,
                user_id,
                course_id: course.id,
                used_at: now,
                redeemed_on: today,
            };
            match self.credits.redeem(&redemption).await? {
                RedeemWrite::Redeemed => {
                    info!(%user_id, credit_id = %credit.id, course_id = %course.id, "credit redeemed");
                    return Ok(credit.id);
                }
                RedeemWrite::AlreadyUsed => continue,
                RedeemWrite::DailyCapReached => return Err(LedgerError::CreditAlreadyUsedToday),
            }
        }
        Err(LedgerError::NoCreditAvailable)
    }
}

// ── CreateSinglePlayCheckout ─────────────────────────────────────────────────

pub struct CreateSinglePlayCheckoutUseCase<Pay: PaymentPort> {
    pub payments: Pay,
    pub settings: CheckoutSettings,
}

impl<Pay: PaymentPort> CreateSinglePlayCheckoutUseCase<Pay> {
    pub async fn execute(&self, player: Player) -> Result<CheckoutSession, LedgerError> {
        let request = CheckoutRequest {
            kind: CheckoutKind::SinglePlay,
            user_id: player.id,
            customer_email: player.verified_email().map(str::to_owned),
            product_name: "Single Play".to_owned(),
            product_description: Some("One round at any open Hole Out course".to_owned()),
            amount: self.settings.single_play_price,
            success_url: self.settings.single_play_success_url(),
            cancel_url: self.settings.single_play_cancel_url(),
        };
        let session = self.payments.create_checkout_session(&request).await?;
        if session.url.is_none() {
            return Err(LedgerError::external(anyhow::anyhow!(
                "checkout session {} has no url",
                session.id
            )));
        }
        info!(user_id = %player.id, session_id = %session.id, "single-play checkout created");
        Ok(session)
    }
}

// ── RecordSinglePlayPayment ──────────────────────────────────────────────────

pub struct RecordSinglePlayPaymentInput {
    pub player: Player,
    pub session_id: String,
}

/// Turn a paid single-play checkout into a credit, at most once per session.
pub struct RecordSinglePlayPaymentUseCase<K, Pay, T>
where
    K: CreditRepository,
    Pay: PaymentPort,
    T: Clock,
{
    pub credits: K,
    pub payments: Pay,
    pub clock: T,
}

impl<K, Pay, T> RecordSinglePlayPaymentUseCase<K, Pay, T>
where
    K: CreditRepository,
    Pay: PaymentPort,
    T: Clock,
{
    pub async fn execute(
        &self,
        input: RecordSinglePlayPaymentInput,
    ) -> Result<CreditOutcome, LedgerError> {
        let session_id = input.session_id.trim();
        if session_id.is_empty() {
            return Err(LedgerError::InvalidInput("session_id is required".to_owned()));
        }

        if self
            .credits
            .find_by_payment_reference(session_id)
            .await?
            .is_some()
        {
            return Ok(CreditOutcome::AlreadyRecorded);
        }

        let session = self
            .payments
            .get_checkout_session(session_id)
            .await?
            .ok_or(LedgerError::PaymentNotFound)?;

        if !session.is_paid() || !session.is_single_play() {
            return Err(LedgerError::PaymentNotFound);
        }
        if session.metadata_user_id.is_some() && !session.belongs_to(input.player.id) {
            warn!(
                user_id = %input.player.id,
                session_id,
                "checkout session belongs to another user"
            );
            return Err(LedgerError::PaymentNotFound);
        }

        let credit = SinglePlayCredit {
            id: CreditId::generate(),
            user_id: input.player.id,
            payment_reference: session_id.to_owned(),
            purchased_at: self.clock.now(),
            used_at: None,
            redeemed_on: None,
            course_id: None,
        };

        if !self.credits.create(&credit).await? {
            return Ok(CreditOutcome::AlreadyRecorded);
        }
        info!(user_id = %credit.user_id, credit_id = %credit.id, session_id, "single-play credit recorded");
        Ok(CreditOutcome::Recorded(credit))
    }
}

// ── ListPlayerCredits ────────────────────────────────────────────────────────

pub struct ListPlayerCreditsUseCase<K: CreditRepository> {
    pub credits: K,
}

impl<K: CreditRepository> ListPlayerCreditsUseCase<K> {
    pub async fn execute(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<SinglePlayCredit>, LedgerError> {
        self.credits.list_by_user(user_id, page.clamped()).await
    }
}
