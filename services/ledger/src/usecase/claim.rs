use chrono::NaiveDate;
use tracing::{info, warn};

use holeout_domain::clock::Clock;
use holeout_domain::day::BusinessCalendar;
use holeout_domain::id::{ClaimId, CourseId, EventId, ShotId, UserId};
use holeout_domain::money::Pence;
use holeout_domain::pagination::PageRequest;

use crate::domain::repository::{
    ClaimRepository, CourseRepository, EventRepository, NotificationPort, ShotRepository,
    SubscriptionPort,
};
use crate::domain::types::{
    ClaimNotification, ClaimStatus, ClaimTarget, Player, PrizeClaim,
};
use crate::error::LedgerError;

// ── SubmitClaim ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct SubmitClaimInput {
    pub course_id: Option<CourseId>,
    pub event_id: Option<EventId>,
    /// Only honoured for subscribers; overrides course and date.
    pub shot_id: Option<ShotId>,
    pub claim_date: Option<NaiveDate>,
    pub tee_time: Option<String>,
    pub time_of_hole_in_one: Option<String>,
    pub notes: Option<String>,
}

pub struct SubmitClaimUseCase<S, C, E, L, P, N, T>
where
    S: ShotRepository,
    C: CourseRepository,
    E: EventRepository,
    L: ClaimRepository,
    P: SubscriptionPort,
    N: NotificationPort,
    T: Clock,
{
    pub shots: S,
    pub courses: C,
    pub events: E,
    pub claims: L,
    pub subscriptions: P,
    pub notifier: N,
    pub clock: T,
    pub calendar: BusinessCalendar,
}

impl<S, C, E, L, P, N, T> SubmitClaimUseCase<S, C, E, L, P, N, T>
where
    S: ShotRepository,
    C: CourseRepository,
    E: EventRepository,
    L: ClaimRepository,
    P: SubscriptionPort,
    N: NotificationPort,
    T: Clock,
{
    pub async fn execute(
        &self,
        player: Player,
        input: SubmitClaimInput,
    ) -> Result<PrizeClaim, LedgerError> {
        let now = self.clock.now();
        let today = self.calendar.day_of(now);

        let from_shot = match input.shot_id {
            Some(shot_id) => self.resolve_from_shot(&player, shot_id).await?,
            None => None,
        };
        let (target, claim_date, shot_id) = match from_shot {
            Some((target, claim_date)) => (target, claim_date, input.shot_id),
            None => {
                let (target, claim_date) = resolve_from_input(&input)?;
                (target, claim_date, None)
            }
        };
        if claim_date > today {
            return Err(LedgerError::InvalidInput(
                "claim_date cannot be in the future".to_owned(),
            ));
        }

        let (target_name, prize_amount) = self.snapshot_prize(target).await?;

        // Fast feedback only; the unique index on (user_id, claim_day) decides.
        if self.claims.exists_on_day(player.id, today).await? {
            return Err(LedgerError::AlreadyClaimedToday);
        }

        let claim = PrizeClaim {
            id: ClaimId::generate(),
            user_id: player.id,
            target,
            shot_id,
            claim_date,
            claim_day: today,
            tee_time: non_empty(input.tee_time),
            time_of_hole_in_one: non_empty(input.time_of_hole_in_one),
            notes: non_empty(input.notes),
            prize_amount,
            status: ClaimStatus::Pending,
            created_at: now,
        };
        if !self.claims.create(&claim).await? {
            return Err(LedgerError::AlreadyClaimedToday);
        }
        info!(user_id = %claim.user_id, claim_id = %claim.id, "prize claim submitted");

        self.notify(ClaimNotification {
            claim_id: claim.id,
            player_email: player.email,
            target_name,
            claim_date: claim.claim_date,
            tee_time: claim.tee_time.clone(),
            time_of_hole_in_one: claim.time_of_hole_in_one.clone(),
            notes: claim.notes.clone(),
            prize_amount: claim.prize_amount,
        });
        Ok(claim)
    }

    /// For subscribers the shot is authoritative over whatever course and date
    /// the player typed. Non-subscribers get `None` and fall back to the input.
    async fn resolve_from_shot(
        &self,
        player: &Player,
        shot_id: ShotId,
    ) -> Result<Option<(ClaimTarget, NaiveDate)>, LedgerError> {
        if !self.subscriptions.status(player).await?.active {
            return Ok(None);
        }
        let shot = self
            .shots
            .find_by_id(shot_id)
            .await?
            .filter(|s| s.user_id == player.id)
            .ok_or(LedgerError::ShotNotFound)?;
        Ok(Some((
            ClaimTarget::Course(shot.course_id),
            self.calendar.day_of(shot.created_at),
        )))
    }

    async fn snapshot_prize(
        &self,
        target: ClaimTarget,
    ) -> Result<(String, Option<Pence>), LedgerError> {
        match target {
            ClaimTarget::Course(id) => {
                let course = self
                    .courses
                    .find_by_id(id)
                    .await?
                    .ok_or(LedgerError::CourseNotFound)?;
                Ok((course.name, course.prize_amount))
            }
            ClaimTarget::Event(id) => {
                let event = self
                    .events
                    .find_by_id(id)
                    .await?
                    .ok_or(LedgerError::EventNotFound)?;
                Ok((event.checkout_title(), event.nearest_pin_prize))
            }
        }
    }

    /// Fire and forget. A failed email is logged and never fails the claim.
    fn notify(&self, notification: ClaimNotification) {
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            let claim_id = notification.claim_id;
            if let Err(e) = notifier.send_claim_notification(notification).await {
                warn!(%claim_id, error = ?e, "claim notification failed");
            }
        });
    }
}

fn resolve_from_input(input: &SubmitClaimInput) -> Result<(ClaimTarget, NaiveDate), LedgerError> {
    let target = match (input.course_id, input.event_id) {
        (Some(course_id), None) => ClaimTarget::Course(course_id),
        (None, Some(event_id)) => ClaimTarget::Event(event_id),
        (Some(_), Some(_)) => {
            return Err(LedgerError::InvalidInput(
                "a claim is for either a course or an event, not both".to_owned(),
            ));
        }
        (None, None) => {
            return Err(LedgerError::InvalidInput(
                "course_id or event_id is required".to_owned(),
            ));
        }
    };
    let claim_date = input
        .claim_date
        .ok_or_else(|| LedgerError::InvalidInput("claim_date is required".to_owned()))?;
    Ok((target, claim_date))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

// ── ListPlayerClaims ─────────────────────────────────────────────────────────

pub struct ListPlayerClaimsUseCase<L: ClaimRepository> {
    pub claims: L,
}

impl<L: ClaimRepository> ListPlayerClaimsUseCase<L> {
    pub async fn execute(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<PrizeClaim>, LedgerError> {
        self.claims.list_by_user(user_id, page.clamped()).await
    }
}

// ── ListClaims (admin) ───────────────────────────────────────────────────────

pub struct ListClaimsUseCase<L: ClaimRepository> {
    pub claims: L,
}

impl<L: ClaimRepository> ListClaimsUseCase<L> {
    pub async fn execute(
        &self,
        status: Option<ClaimStatus>,
        page: PageRequest,
    ) -> Result<Vec<PrizeClaim>, LedgerError> {
        self.claims.list(status, page.clamped()).await
    }
}

// ── ReviewClaim (admin) ──────────────────────────────────────────────────────

pub struct ReviewClaimInput {
    pub claim_id: ClaimId,
    pub status: Option<ClaimStatus>,
    pub notes: Option<String>,
}

pub struct ReviewClaimUseCase<L: ClaimRepository> {
    pub claims: L,
}

impl<L: ClaimRepository> ReviewClaimUseCase<L> {
    pub async fn execute(
        &self,
        reviewer: UserId,
        input: ReviewClaimInput,
    ) -> Result<PrizeClaim, LedgerError> {
        if input.status.is_none() && input.notes.is_none() {
            return Err(LedgerError::InvalidInput(
                "status or notes is required".to_owned(),
            ));
        }
        let updated = self
            .claims
            .update_review(input.claim_id, input.status, input.notes)
            .await?;
        if !updated {
            return Err(LedgerError::ClaimNotFound);
        }
        info!(
            %reviewer,
            claim_id = %input.claim_id,
            status = input.status.map(ClaimStatus::as_str),
            "prize claim reviewed"
        );
        self.claims
            .find_by_id(input.claim_id)
            .await?
            .ok_or(LedgerError::ClaimNotFound)
    }
}
