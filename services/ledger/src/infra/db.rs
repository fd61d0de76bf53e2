use anyhow::Context as _;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
    sea_query::{Expr, NullOrdering},
};

use holeout_domain::id::{ClaimId, CourseId, EventId, RegistrationId, ShotId, UserId};
use holeout_domain::money::Pence;
use holeout_domain::pagination::PageRequest;
use holeout_ledger_schema::{
    courses, event_registrations, events, prize_claims, shots, single_play_credits,
};

use crate::domain::repository::{
    ClaimRepository, CourseRepository, CreditRepository, EventRepository, RegistrationRepository,
    ShotRepository,
};
use crate::domain::types::{
    ClaimStatus, ClaimTarget, Course, CreditRedemption, Event, EventRegistration, PrizeClaim,
    RedeemWrite, Shot, ShotWrite, SinglePlayCredit,
};
use crate::error::LedgerError;

/// Unique-index violations are expected outcomes here, not failures.
fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
}

impl CourseRepository for DbCourseRepository {
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, LedgerError> {
        let model = courses::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find course by id")?;
        Ok(model.map(course_from_model))
    }

    async fn list(&self) -> Result<Vec<Course>, LedgerError> {
        let models = courses::Entity::find()
            .order_by_with_nulls(courses::Column::Priority, Order::Desc, NullOrdering::Last)
            .order_by_asc(courses::Column::Name)
            .all(&self.db)
            .await
            .context("list courses")?;
        Ok(models.into_iter().map(course_from_model).collect())
    }

    async fn update_prize_amount(
        &self,
        id: CourseId,
        prize_amount: Option<Pence>,
    ) -> Result<bool, LedgerError> {
        let result = courses::Entity::update_many()
            .col_expr(
                courses::Column::PrizeAmount,
                Expr::value(prize_amount.map(|p| p.0)),
            )
            .filter(courses::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("update course prize amount")?;
        Ok(result.rows_affected > 0)
    }
}

fn course_from_model(model: courses::Model) -> Course {
    Course {
        id: CourseId(model.id),
        name: model.name,
        location: model.location,
        image_url: model.image_url,
        par_3_count: model.par_3_count,
        priority: model.priority,
        coming_soon: model.coming_soon,
        prize_amount: model.prize_amount.map(Pence),
    }
}

// ── Event repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEventRepository {
    pub db: DatabaseConnection,
}

impl EventRepository for DbEventRepository {
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, LedgerError> {
        let model = events::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find event by id")?;
        Ok(model.map(event_from_model))
    }

    async fn list(&self) -> Result<Vec<Event>, LedgerError> {
        let models = events::Entity::find()
            .order_by_asc(events::Column::Date)
            .order_by_asc(events::Column::Round)
            .all(&self.db)
            .await
            .context("list events")?;
        Ok(models.into_iter().map(event_from_model).collect())
    }

    async fn update_entry_fee(&self, id: EventId, entry_fee: Pence) -> Result<bool, LedgerError> {
        let result = events::Entity::update_many()
            .col_expr(events::Column::EntryFee, Expr::value(entry_fee.0))
            .filter(events::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("update event entry fee")?;
        Ok(result.rows_affected > 0)
    }
}

fn event_from_model(model: events::Model) -> Event {
    Event {
        id: EventId(model.id),
        round: model.round,
        region: model.region,
        venue: model.venue,
        date: model.date,
        entry_fee: Pence(model.entry_fee),
        nearest_pin_prize: model.nearest_pin_prize.map(Pence),
        enabled: model.enabled,
    }
}

// ── Shot repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbShotRepository {
    pub db: DatabaseConnection,
}

impl ShotRepository for DbShotRepository {
    async fn exists_on_day(
        &self,
        user_id: UserId,
        course_id: CourseId,
        day: NaiveDate,
    ) -> Result<bool, LedgerError> {
        let count = shots::Entity::find()
            .filter(shots::Column::UserId.eq(user_id.0))
            .filter(shots::Column::CourseId.eq(course_id.0))
            .filter(shots::Column::PlayDay.eq(day))
            .count(&self.db)
            .await
            .context("count shots on day")?;
        Ok(count > 0)
    }

    async fn find_by_id(&self, id: ShotId) -> Result<Option<Shot>, LedgerError> {
        let model = shots::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find shot by id")?;
        Ok(model.map(shot_from_model))
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Shot>, LedgerError> {
        let models = shots::Entity::find()
            .filter(shots::Column::UserId.eq(user_id.0))
            .order_by_desc(shots::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list shots by user")?;
        Ok(models.into_iter().map(shot_from_model).collect())
    }

    async fn create(&self, shot: &Shot) -> Result<ShotWrite, LedgerError> {
        match shot_active_model(shot).insert(&self.db).await {
            Ok(_) => Ok(ShotWrite::Recorded),
            Err(e) if is_unique_violation(&e) => Ok(ShotWrite::DuplicateShot),
            Err(e) => Err(anyhow::Error::new(e).context("insert shot").into()),
        }
    }

    async fn create_with_credit(
        &self,
        shot: &Shot,
        redemption: &CreditRedemption,
    ) -> Result<ShotWrite, LedgerError> {
        // Dropping `txn` without commit rolls back.
        let txn = self.db.begin().await.context("begin shot transaction")?;

        // Shot first: a concurrent request for the same course waits on the
        // unique index and loses as a duplicate, not on the credit row.
        match shot_active_model(shot).insert(&txn).await {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Ok(ShotWrite::DuplicateShot),
            Err(e) => return Err(anyhow::Error::new(e).context("insert shot").into()),
        }

        match redeem_credit(&txn, redemption).await {
            Ok(RedeemWrite::Redeemed) => {}
            Ok(RedeemWrite::AlreadyUsed) => return Ok(ShotWrite::CreditUnavailable),
            Ok(RedeemWrite::DailyCapReached) => return Ok(ShotWrite::CreditCapReached),
            Err(e) => return Err(anyhow::Error::new(e).context("redeem credit").into()),
        }

        txn.commit().await.context("commit shot transaction")?;
        Ok(ShotWrite::Recorded)
    }
}

fn shot_active_model(shot: &Shot) -> shots::ActiveModel {
    shots::ActiveModel {
        id: Set(shot.id.0),
        user_id: Set(shot.user_id.0),
        course_id: Set(shot.course_id.0),
        play_day: Set(shot.play_day),
        played_at: Set(shot.played_at),
        is_hole_in_one: Set(shot.is_hole_in_one),
        created_at: Set(shot.created_at),
    }
}

fn shot_from_model(model: shots::Model) -> Shot {
    Shot {
        id: ShotId(model.id),
        user_id: UserId(model.user_id),
        course_id: CourseId(model.course_id),
        created_at: model.created_at,
        play_day: model.play_day,
        played_at: model.played_at,
        is_hole_in_one: model.is_hole_in_one,
    }
}

// ── Credit repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCreditRepository {
    pub db: DatabaseConnection,
}

impl CreditRepository for DbCreditRepository {
    async fn list_unredeemed(
        &self,
        user_id: UserId,
    ) -> Result<Vec<SinglePlayCredit>, LedgerError> {
        let models = single_play_credits::Entity::find()
            .filter(single_play_credits::Column::UserId.eq(user_id.0))
            .filter(single_play_credits::Column::UsedAt.is_null())
            .order_by_asc(single_play_credits::Column::PurchasedAt)
            .order_by_asc(single_play_credits::Column::Id)
            .all(&self.db)
            .await
            .context("list unredeemed credits")?;
        Ok(models.into_iter().map(credit_from_model).collect())
    }

    async fn has_redemption_on(
        &self,
        user_id: UserId,
        day: NaiveDate,
    ) -> Result<bool, LedgerError> {
        let count = single_play_credits::Entity::find()
            .filter(single_play_credits::Column::UserId.eq(user_id.0))
            .filter(single_play_credits::Column::RedeemedOn.eq(day))
            .count(&self.db)
            .await
            .context("count credit redemptions on day")?;
        Ok(count > 0)
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<SinglePlayCredit>, LedgerError> {
        let models = single_play_credits::Entity::find()
            .filter(single_play_credits::Column::UserId.eq(user_id.0))
            .order_by_desc(single_play_credits::Column::PurchasedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list credits by user")?;
        Ok(models.into_iter().map(credit_from_model).collect())
    }

    async fn find_by_payment_reference(
        &self,
        payment_reference: &str,
    ) -> Result<Option<SinglePlayCredit>, LedgerError> {
        let model = single_play_credits::Entity::find()
            .filter(single_play_credits::Column::PaymentReference.eq(payment_reference))
            .one(&self.db)
            .await
            .context("find credit by payment reference")?;
        Ok(model.map(credit_from_model))
    }

    async fn create(&self, credit: &SinglePlayCredit) -> Result<bool, LedgerError> {
        let model = single_play_credits::ActiveModel {
            id: Set(credit.id.0),
            user_id: Set(credit.user_id.0),
            payment_reference: Set(credit.payment_reference.clone()),
            purchased_at: Set(credit.purchased_at),
            used_at: Set(None),
            redeemed_on: Set(None),
            course_id: Set(None),
        };
        match model.insert(&self.db).await {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e).context("insert credit").into()),
        }
    }

    async fn redeem(&self, redemption: &CreditRedemption) -> Result<RedeemWrite, LedgerError> {
        let outcome = redeem_credit(&self.db, redemption)
            .await
            .context("redeem credit")?;
        Ok(outcome)
    }
}

/// `UPDATE ... SET used_at = $now WHERE id = $id AND used_at IS NULL`.
///
/// Zero rows means another request consumed the credit first. A unique violation
/// on (user_id, redeemed_on) means some credit was already redeemed that day.
async fn redeem_credit<C>(conn: &C, redemption: &CreditRedemption) -> Result<RedeemWrite, DbErr>
where
    C: sea_orm::ConnectionTrait,
{
    let result = single_play_credits::Entity::update_many()
        .col_expr(
            single_play_credits::Column::UsedAt,
            Expr::value(redemption.used_at),
        )
        .col_expr(
            single_play_credits::Column::RedeemedOn,
            Expr::value(redemption.redeemed_on),
        )
        .col_expr(
            single_play_credits::Column::CourseId,
            Expr::value(redemption.course_id.0),
        )
        .filter(single_play_credits::Column::Id.eq(redemption.credit_id.0))
        .filter(single_play_credits::Column::UserId.eq(redemption.user_id.0))
        .filter(single_play_credits::Column::UsedAt.is_null())
        .exec(conn)
        .await;

    match result {
        Ok(r) if r.rows_affected == 1 => Ok(RedeemWrite::Redeemed),
        Ok(_) => Ok(RedeemWrite::AlreadyUsed),
        Err(e) if is_unique_violation(&e) => Ok(RedeemWrite::DailyCapReached),
        Err(e) => Err(e),
    }
}

fn credit_from_model(model: single_play_credits::Model) -> SinglePlayCredit {
    SinglePlayCredit {
        id: holeout_domain::id::CreditId(model.id),
        user_id: UserId(model.user_id),
        payment_reference: model.payment_reference,
        purchased_at: model.purchased_at,
        used_at: model.used_at,
        redeemed_on: model.redeemed_on,
        course_id: model.course_id.map(CourseId),
    }
}

// ── Claim repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClaimRepository {
    pub db: DatabaseConnection,
}

impl ClaimRepository for DbClaimRepository {
    async fn exists_on_day(&self, user_id: UserId, day: NaiveDate) -> Result<bool, LedgerError> {
        let count = prize_claims::Entity::find()
            .filter(prize_claims::Column::UserId.eq(user_id.0))
            .filter(prize_claims::Column::ClaimDay.eq(day))
            .count(&self.db)
            .await
            .context("count claims on day")?;
        Ok(count > 0)
    }

    async fn create(&self, claim: &PrizeClaim) -> Result<bool, LedgerError> {
        let model = prize_claims::ActiveModel {
            id: Set(claim.id.0),
            user_id: Set(claim.user_id.0),
            course_id: Set(claim.target.course_id().map(|id| id.0)),
            event_id: Set(claim.target.event_id().map(|id| id.0)),
            shot_id: Set(claim.shot_id.map(|id| id.0)),
            claim_date: Set(claim.claim_date),
            claim_day: Set(claim.claim_day),
            tee_time: Set(claim.tee_time.clone()),
            time_of_hole_in_one: Set(claim.time_of_hole_in_one.clone()),
            notes: Set(claim.notes.clone()),
            prize_amount: Set(claim.prize_amount.map(|p| p.0)),
            status: Set(claim.status.as_str().to_owned()),
            created_at: Set(claim.created_at),
        };
        match model.insert(&self.db).await {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e).context("insert prize claim").into()),
        }
    }

    async fn find_by_id(&self, id: ClaimId) -> Result<Option<PrizeClaim>, LedgerError> {
        let model = prize_claims::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find claim by id")?;
        model.map(claim_from_model).transpose()
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<PrizeClaim>, LedgerError> {
        let models = prize_claims::Entity::find()
            .filter(prize_claims::Column::UserId.eq(user_id.0))
            .order_by_desc(prize_claims::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list claims by user")?;
        models.into_iter().map(claim_from_model).collect()
    }

    async fn list(
        &self,
        status: Option<ClaimStatus>,
        page: PageRequest,
    ) -> Result<Vec<PrizeClaim>, LedgerError> {
        let mut query = prize_claims::Entity::find();
        if let Some(status) = status {
            query = query.filter(prize_claims::Column::Status.eq(status.as_str()));
        }
        let models = query
            .order_by_desc(prize_claims::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list claims")?;
        models.into_iter().map(claim_from_model).collect()
    }

    async fn update_review(
        &self,
        id: ClaimId,
        status: Option<ClaimStatus>,
        notes: Option<String>,
    ) -> Result<bool, LedgerError> {
        let mut update = prize_claims::Entity::update_many();
        if let Some(status) = status {
            update = update.col_expr(
                prize_claims::Column::Status,
                Expr::value(status.as_str().to_owned()),
            );
        }
        if let Some(notes) = notes {
            update = update.col_expr(prize_claims::Column::Notes, Expr::value(notes));
        }
        let result = update
            .filter(prize_claims::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("update claim review")?;
        Ok(result.rows_affected > 0)
    }
}

fn claim_from_model(model: prize_claims::Model) -> Result<PrizeClaim, LedgerError> {
    let target = match (model.course_id, model.event_id) {
        (Some(course_id), None) => ClaimTarget::Course(CourseId(course_id)),
        (None, Some(event_id)) => ClaimTarget::Event(EventId(event_id)),
        _ => {
            return Err(anyhow::anyhow!("claim {} has no single course or event", model.id).into());
        }
    };
    let status = model
        .status
        .parse::<ClaimStatus>()
        .map_err(anyhow::Error::msg)?;
    Ok(PrizeClaim {
        id: ClaimId(model.id),
        user_id: UserId(model.user_id),
        target,
        shot_id: model.shot_id.map(ShotId),
        claim_date: model.claim_date,
        claim_day: model.claim_day,
        tee_time: model.tee_time,
        time_of_hole_in_one: model.time_of_hole_in_one,
        notes: model.notes,
        prize_amount: model.prize_amount.map(Pence),
        status,
        created_at: model.created_at,
    })
}

// ── Registration repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRegistrationRepository {
    pub db: DatabaseConnection,
}

impl RegistrationRepository for DbRegistrationRepository {
    async fn find(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Option<EventRegistration>, LedgerError> {
        let model = event_registrations::Entity::find()
            .filter(event_registrations::Column::UserId.eq(user_id.0))
            .filter(event_registrations::Column::EventId.eq(event_id.0))
            .one(&self.db)
            .await
            .context("find event registration")?;
        Ok(model.map(registration_from_model))
    }

    async fn create(&self, registration: &EventRegistration) -> Result<bool, LedgerError> {
        let model = event_registrations::ActiveModel {
            id: Set(registration.id.0),
            user_id: Set(registration.user_id.0),
            event_id: Set(registration.event_id.0),
            payment_reference: Set(registration.payment_reference.clone()),
            attended: Set(registration.attended),
            registered_at: Set(registration.registered_at),
        };
        match model.insert(&self.db).await {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e)
                .context("insert event registration")
                .into()),
        }
    }

    async fn list_by_event(
        &self,
        event_id: EventId,
    ) -> Result<Vec<EventRegistration>, LedgerError> {
        let models = event_registrations::Entity::find()
            .filter(event_registrations::Column::EventId.eq(event_id.0))
            .order_by_desc(event_registrations::Column::RegisteredAt)
            .all(&self.db)
            .await
            .context("list event registrations")?;
        Ok(models.into_iter().map(registration_from_model).collect())
    }

    async fn set_attended(
        &self,
        id: RegistrationId,
        attended: bool,
    ) -> Result<bool, LedgerError> {
        let result = event_registrations::Entity::update_many()
            .col_expr(event_registrations::Column::Attended, Expr::value(attended))
            .filter(event_registrations::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("set registration attendance")?;
        Ok(result.rows_affected > 0)
    }
}

fn registration_from_model(model: event_registrations::Model) -> EventRegistration {
    EventRegistration {
        id: RegistrationId(model.id),
        user_id: UserId(model.user_id),
        event_id: EventId(model.event_id),
        payment_reference: model.payment_reference,
        attended: model.attended,
        registered_at: model.registered_at,
    }
}
