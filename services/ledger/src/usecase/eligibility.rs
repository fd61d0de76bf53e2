use chrono::{DateTime, NaiveDate, Utc};

use holeout_domain::clock::Clock;
use holeout_domain::day::BusinessCalendar;
use holeout_domain::id::CourseId;

use crate::domain::eligibility::{EligibilitySnapshot, evaluate};
use crate::domain::repository::{
    CourseRepository, CreditRepository, ShotRepository, SubscriptionPort,
};
use crate::domain::types::{Course, Decision, Player, SubscriptionSnapshot};
use crate::error::LedgerError;

pub struct EvaluateEligibilityInput {
    pub player: Player,
    pub course_id: CourseId,
}

/// A decision together with the facts it was made on.
#[derive(Debug, Clone)]
pub struct EligibilityReport {
    pub course: Course,
    pub decision: Decision,
    pub subscription: SubscriptionSnapshot,
    /// The instant the decision was evaluated at.
    pub now: DateTime<Utc>,
    pub play_day: NaiveDate,
}

pub struct EvaluateEligibilityUseCase<C, S, K, P, T>
where
    C: CourseRepository,
    S: ShotRepository,
    K: CreditRepository,
    P: SubscriptionPort,
    T: Clock,
{
    pub courses: C,
    pub shots: S,
    pub credits: K,
    pub subscriptions: P,
    pub clock: T,
    pub calendar: BusinessCalendar,
}

impl<C, S, K, P, T> EvaluateEligibilityUseCase<C, S, K, P, T>
where
    C: CourseRepository,
    S: ShotRepository,
    K: CreditRepository,
    P: SubscriptionPort,
    T: Clock,
{
    pub async fn execute(
        &self,
        input: EvaluateEligibilityInput,
    ) -> Result<EligibilityReport, LedgerError> {
        let course = self
            .courses
            .find_by_id(input.course_id)
            .await?
            .ok_or(LedgerError::CourseNotFound)?;

        let now = self.clock.now();
        let play_day = self.calendar.day_of(now);
        let user_id = input.player.id;

        let subscription = self.subscriptions.status(&input.player).await?;
        let played_course_today = self
            .shots
            .exists_on_day(user_id, course.id, play_day)
            .await?;
        let redeemed_credit_today = self.credits.has_redemption_on(user_id, play_day).await?;
        let unredeemed_credits = self.credits.list_unredeemed(user_id).await?;

        let decision = evaluate(&EligibilitySnapshot {
            course: &course,
            subscription: &subscription,
            played_course_today,
            redeemed_credit_today,
            unredeemed_credits: &unredeemed_credits,
        });

        Ok(EligibilityReport {
            course,
            decision,
            subscription,
            now,
            play_day,
        })
    }
}

// ── GetSubscriptionStatus ────────────────────────────────────────────────────

pub struct GetSubscriptionStatusUseCase<P: SubscriptionPort> {
    pub subscriptions: P,
}

impl<P: SubscriptionPort> GetSubscriptionStatusUseCase<P> {
    pub async fn execute(&self, player: &Player) -> Result<SubscriptionSnapshot, LedgerError> {
        self.subscriptions.status(player).await
    }
}
