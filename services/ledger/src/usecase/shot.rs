use chrono::{DateTime, Utc};
use tracing::info;

use holeout_domain::clock::Clock;
use holeout_domain::id::{CourseId, ShotId, UserId};
use holeout_domain::pagination::PageRequest;

use crate::domain::repository::{
    CourseRepository, CreditRepository, ShotObserver, ShotRepository, SubscriptionPort,
};
use crate::domain::types::{
    CreditRedemption, Decision, EntitlementSource, Player, Shot, ShotWrite,
};
use crate::error::LedgerError;
use crate::usecase::eligibility::{EvaluateEligibilityInput, EvaluateEligibilityUseCase};

// ── LogShot ──────────────────────────────────────────────────────────────────

pub struct LogShotInput {
    pub player: Player,
    pub course_id: CourseId,
    /// Client-reported time of play. Stored for display, never used for rules.
    pub played_at: Option<DateTime<Utc>>,
    pub is_hole_in_one: bool,
}

/// Evaluate eligibility, then record the shot and consume what funds it.
///
/// The evaluation is advisory. The write re-checks every daily limit at the
/// persistence layer and a lost race surfaces as a conflict.
pub struct LogShotUseCase<C, S, K, P, T, O>
where
    C: CourseRepository,
    S: ShotRepository,
    K: CreditRepository,
    P: SubscriptionPort,
    T: Clock,
    O: ShotObserver,
{
    pub eligibility: EvaluateEligibilityUseCase<C, S, K, P, T>,
    pub shots: S,
    pub observer: O,
}

impl<C, S, K, P, T, O> LogShotUseCase<C, S, K, P, T, O>
where
    C: CourseRepository,
    S: ShotRepository,
    K: CreditRepository,
    P: SubscriptionPort,
    T: Clock,
    O: ShotObserver,
{
    pub async fn execute(&self, input: LogShotInput) -> Result<Shot, LedgerError> {
        let user_id = input.player.id;
        let report = self
            .eligibility
            .execute(EvaluateEligibilityInput {
                player: input.player,
                course_id: input.course_id,
            })
            .await?;

        let source = match report.decision {
            Decision::Allowed(source) => source,
            Decision::Blocked(reason) => return Err(LedgerError::PlayBlocked(reason)),
        };

        let shot = Shot {
            id: ShotId::generate(),
            user_id,
            course_id: report.course.id,
            created_at: report.now,
            play_day: report.play_day,
            played_at: input.played_at,
            is_hole_in_one: input.is_hole_in_one,
        };

        let outcome = match source {
            EntitlementSource::Subscription => self.shots.create(&shot).await?,
            EntitlementSource::SinglePlayCredit(credit_id) => {
                let redemption = CreditRedemption {
                    credit_id,
                    user_id,
                    course_id: shot.course_id,
                    used_at: shot.created_at,
                    redeemed_on: shot.play_day,
                };
                self.shots.create_with_credit(&shot, &redemption).await?
            }
        };

        match outcome {
            ShotWrite::Recorded => {}
            ShotWrite::DuplicateShot => return Err(LedgerError::AlreadyPlayedToday),
            ShotWrite::CreditUnavailable => return Err(LedgerError::CreditAlreadyUsed),
            ShotWrite::CreditCapReached => return Err(LedgerError::CreditAlreadyUsedToday),
        }

        info!(
            user_id = %shot.user_id,
            course_id = %shot.course_id,
            shot_id = %shot.id,
            funded_by = match source {
                EntitlementSource::Subscription => "subscription",
                EntitlementSource::SinglePlayCredit(_) => "single_play_credit",
            },
            "shot recorded"
        );
        self.observer.shot_recorded(&shot);
        Ok(shot)
    }
}

// ── ListPlayerShots ──────────────────────────────────────────────────────────

pub struct ListPlayerShotsUseCase<S: ShotRepository> {
    pub shots: S,
}

impl<S: ShotRepository> ListPlayerShotsUseCase<S> {
    pub async fn execute(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Shot>, LedgerError> {
        self.shots.list_by_user(user_id, page.clamped()).await
    }
}
