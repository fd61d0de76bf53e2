use tracing::info;

use holeout_domain::clock::Clock;
use holeout_domain::id::{EventId, RegistrationId, UserId};
use holeout_domain::money::Pence;

use crate::domain::repository::{EventRepository, PaymentPort, RegistrationRepository};
use crate::domain::types::{
    CheckoutKind, CheckoutRequest, CheckoutSession, CheckoutSettings, Event, EventRegistration,
    Player, RECENT_SESSION_SCAN_LIMIT, RegistrationOutcome,
};
use crate::error::LedgerError;

// ── ListEvents ───────────────────────────────────────────────────────────────

pub struct ListEventsUseCase<E: EventRepository> {
    pub events: E,
}

impl<E: EventRepository> ListEventsUseCase<E> {
    pub async fn execute(&self) -> Result<Vec<Event>, LedgerError> {
        self.events.list().await
    }
}

// ── RegisterForEvent ─────────────────────────────────────────────────────────

/// Free events register on the spot. Paid events hand back a checkout URL and
/// register only once [`VerifyEventPaymentUseCase`] finds the paid session.
pub struct RegisterForEventUseCase<E, R, Pay, T>
where
    E: EventRepository,
    R: RegistrationRepository,
    Pay: PaymentPort,
    T: Clock,
{
    pub events: E,
    pub registrations: R,
    pub payments: Pay,
    pub clock: T,
    pub settings: CheckoutSettings,
}

impl<E, R, Pay, T> RegisterForEventUseCase<E, R, Pay, T>
where
    E: EventRepository,
    R: RegistrationRepository,
    Pay: PaymentPort,
    T: Clock,
{
    pub async fn execute(
        &self,
        player: Player,
        event_id: EventId,
    ) -> Result<RegistrationOutcome, LedgerError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(LedgerError::EventNotFound)?;
        if !event.enabled {
            return Err(LedgerError::EventClosed);
        }
        if self.registrations.find(player.id, event.id).await?.is_some() {
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        if event.entry_fee.is_free() {
            return register(&self.registrations, &self.clock, player.id, event.id, None).await;
        }

        let email = player
            .verified_email()
            .ok_or(LedgerError::EmailRequired)?
            .to_owned();
        let request = CheckoutRequest {
            kind: CheckoutKind::Event(event.id),
            user_id: player.id,
            customer_email: Some(email),
            product_name: event.checkout_title(),
            product_description: Some(event.checkout_description()),
            amount: event.entry_fee,
            success_url: self.settings.event_success_url(event.id),
            cancel_url: self.settings.event_cancel_url(),
        };
        let session = self.payments.create_checkout_session(&request).await?;
        let url = session.url.ok_or_else(|| {
            LedgerError::external(anyhow::anyhow!(
                "checkout session {} has no url",
                session.id
            ))
        })?;
        info!(
            user_id = %player.id,
            event_id = %event.id,
            session_id = %session.id,
            entry_fee = event.entry_fee.0,
            "event checkout created"
        );
        Ok(RegistrationOutcome::CheckoutRequired {
            session_id: session.id,
            url,
        })
    }
}

// ── VerifyEventPayment ───────────────────────────────────────────────────────

pub struct VerifyEventPaymentInput {
    pub player: Player,
    pub event_id: EventId,
    /// When absent the most recent checkout sessions are scanned.
    pub session_id: Option<String>,
}

/// Reconcile a completed checkout into a registration. Safe to call repeatedly.
pub struct VerifyEventPaymentUseCase<E, R, Pay, T>
where
    E: EventRepository,
    R: RegistrationRepository,
    Pay: PaymentPort,
    T: Clock,
{
    pub events: E,
    pub registrations: R,
    pub payments: Pay,
    pub clock: T,
}

impl<E, R, Pay, T> VerifyEventPaymentUseCase<E, R, Pay, T>
where
    E: EventRepository,
    R: RegistrationRepository,
    Pay: PaymentPort,
    T: Clock,
{
    pub async fn execute(
        &self,
        input: VerifyEventPaymentInput,
    ) -> Result<RegistrationOutcome, LedgerError> {
        let user_id = input.player.id;
        let event = self
            .events
            .find_by_id(input.event_id)
            .await?
            .ok_or(LedgerError::EventNotFound)?;

        if self.registrations.find(user_id, event.id).await?.is_some() {
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        let is_match = |s: &CheckoutSession| {
            s.is_for_event(event.id) && s.belongs_to(user_id) && s.is_paid()
        };
        let session = match input.session_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => self
                .payments
                .get_checkout_session(id)
                .await?
                .filter(|s| is_match(s)),
            _ => self
                .payments
                .list_recent_checkout_sessions(RECENT_SESSION_SCAN_LIMIT)
                .await?
                .into_iter()
                .find(|s| is_match(s)),
        };
        let session = session.ok_or(LedgerError::PaymentNotFound)?;

        register(
            &self.registrations,
            &self.clock,
            user_id,
            event.id,
            Some(session.id),
        )
        .await
    }
}

async fn register<R, T>(
    registrations: &R,
    clock: &T,
    user_id: UserId,
    event_id: EventId,
    payment_reference: Option<String>,
) -> Result<RegistrationOutcome, LedgerError>
where
    R: RegistrationRepository,
    T: Clock,
{
    let registration = EventRegistration {
        id: RegistrationId::generate(),
        user_id,
        event_id,
        payment_reference,
        attended: false,
        registered_at: clock.now(),
    };
    // A concurrent request may have won the unique (user_id, event_id) index.
    if !registrations.create(&registration).await? {
        return Ok(RegistrationOutcome::AlreadyRegistered);
    }
    info!(%user_id, %event_id, registration_id = %registration.id, "event registration created");
    Ok(RegistrationOutcome::Registered(registration))
}

// ── UpdateEventEntryFee (admin) ──────────────────────────────────────────────

pub struct UpdateEventEntryFeeUseCase<E: EventRepository> {
    pub events: E,
}

impl<E: EventRepository> UpdateEventEntryFeeUseCase<E> {
    pub async fn execute(&self, event_id: EventId, entry_fee: Pence) -> Result<Event, LedgerError> {
        if entry_fee.is_negative() {
            return Err(LedgerError::InvalidInput(
                "entry_fee cannot be negative".to_owned(),
            ));
        }
        if !self.events.update_entry_fee(event_id, entry_fee).await? {
            return Err(LedgerError::EventNotFound);
        }
        info!(%event_id, entry_fee = entry_fee.0, "event entry fee updated");
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(LedgerError::EventNotFound)
    }
}

// ── ListEventRegistrations (admin) ───────────────────────────────────────────

pub struct ListEventRegistrationsUseCase<E, R>
where
    E: EventRepository,
    R: RegistrationRepository,
{
    pub events: E,
    pub registrations: R,
}

impl<E, R> ListEventRegistrationsUseCase<E, R>
where
    E: EventRepository,
    R: RegistrationRepository,
{
    pub async fn execute(&self, event_id: EventId) -> Result<Vec<EventRegistration>, LedgerError> {
        if self.events.find_by_id(event_id).await?.is_none() {
            return Err(LedgerError::EventNotFound);
        }
        self.registrations.list_by_event(event_id).await
    }
}

// ── MarkAttendance (admin) ───────────────────────────────────────────────────

pub struct MarkAttendanceUseCase<R: RegistrationRepository> {
    pub registrations: R,
}

impl<R: RegistrationRepository> MarkAttendanceUseCase<R> {
    pub async fn execute(
        &self,
        registration_id: RegistrationId,
        attended: bool,
    ) -> Result<(), LedgerError> {
        if !self
            .registrations
            .set_attended(registration_id, attended)
            .await?
        {
            return Err(LedgerError::RegistrationNotFound);
        }
        Ok(())
    }
}
