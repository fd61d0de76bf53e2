use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::domain::repository::{PaymentPort, SubscriptionPort};
use crate::domain::types::{
    CheckoutKind, CheckoutRequest, CheckoutSession, Player, SubscriptionSnapshot,
};
use crate::error::LedgerError;

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Stripe REST client for one-off checkout sessions and subscription lookups.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
    api_base: String,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct List<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SessionObject {
    id: String,
    url: Option<String>,
    payment_status: String,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

impl From<SessionObject> for CheckoutSession {
    fn from(mut s: SessionObject) -> Self {
        CheckoutSession {
            id: s.id,
            url: s.url,
            payment_status: s.payment_status,
            metadata_kind: s.metadata.remove("kind"),
            metadata_user_id: s.metadata.remove("user_id"),
            metadata_event_id: s.metadata.remove("event_id"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CustomerObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SubscriptionObject {
    current_period_end: Option<i64>,
    #[serde(default)]
    cancel_at_period_end: bool,
}

impl StripeClient {
    pub fn new(secret_key: String, api_base: String, currency: String) -> Self {
        Self {
            client: Client::new(),
            secret_key,
            api_base: api_base.trim_end_matches('/').to_owned(),
            currency,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.api_base)
    }

    fn checkout_form(&self, request: &CheckoutRequest) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("mode", "payment".to_owned()),
            ("success_url", request.success_url.clone()),
            ("cancel_url", request.cancel_url.clone()),
            ("line_items[0][quantity]", "1".to_owned()),
            ("line_items[0][price_data][currency]", self.currency.clone()),
            (
                "line_items[0][price_data][unit_amount]",
                request.amount.0.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                request.product_name.clone(),
            ),
            ("metadata[kind]", request.kind.as_str().to_owned()),
            ("metadata[user_id]", request.user_id.to_string()),
        ];
        if let Some(description) = &request.product_description {
            form.push((
                "line_items[0][price_data][product_data][description]",
                description.clone(),
            ));
        }
        if let CheckoutKind::Event(event_id) = request.kind {
            form.push(("metadata[event_id]", event_id.to_string()));
        }
        if let Some(email) = &request.customer_email {
            form.push(("customer_email", email.clone()));
        }
        form
    }

    async fn find_customer(&self, email: &str) -> Result<Option<String>, LedgerError> {
        let response = self
            .client
            .get(self.url("customers"))
            .bearer_auth(&self.secret_key)
            .query(&[("email", email), ("limit", "1")])
            .send()
            .await
            .map_err(LedgerError::external)?;
        let customers: List<CustomerObject> = read_json(response, "list customers").await?;
        Ok(customers.data.into_iter().next().map(|c| c.id))
    }
}

/// Path for a checkout session id, which arrives from the caller.
///
/// Only `cs_` ids made of ASCII alphanumerics and underscores reach the URL,
/// so an id can never step outside the sessions resource.
fn checkout_session_path(session_id: &str) -> Result<String, LedgerError> {
    let well_formed = session_id
        .strip_prefix("cs_")
        .is_some_and(|rest| {
            !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
        });
    if !well_formed {
        return Err(LedgerError::InvalidInput(
            "session_id is not a checkout session id".to_owned(),
        ));
    }
    Ok(format!("checkout/sessions/{session_id}"))
}

async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, LedgerError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LedgerError::external(anyhow::anyhow!(
            "stripe {what} failed with {status}: {body}"
        )));
    }
    response.json::<T>().await.map_err(LedgerError::external)
}

impl PaymentPort for StripeClient {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, LedgerError> {
        let response = self
            .client
            .post(self.url("checkout/sessions"))
            .bearer_auth(&self.secret_key)
            .form(&self.checkout_form(request))
            .send()
            .await
            .map_err(LedgerError::external)?;
        let session: SessionObject = read_json(response, "create checkout session").await?;
        Ok(session.into())
    }

    async fn get_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<Option<CheckoutSession>, LedgerError> {
        let response = self
            .client
            .get(self.url(&checkout_session_path(session_id)?))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(LedgerError::external)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let session: SessionObject = read_json(response, "retrieve checkout session").await?;
        Ok(Some(session.into()))
    }

    async fn list_recent_checkout_sessions(
        &self,
        limit: u32,
    ) -> Result<Vec<CheckoutSession>, LedgerError> {
        let response = self
            .client
            .get(self.url("checkout/sessions"))
            .bearer_auth(&self.secret_key)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(LedgerError::external)?;
        let sessions: List<SessionObject> = read_json(response, "list checkout sessions").await?;
        Ok(sessions.data.into_iter().map(Into::into).collect())
    }
}

impl SubscriptionPort for StripeClient {
    /// Players without a verified email cannot hold a subscription.
    async fn status(&self, player: &Player) -> Result<SubscriptionSnapshot, LedgerError> {
        let checked_at = Utc::now();
        let Some(email) = player.verified_email() else {
            return Ok(SubscriptionSnapshot::inactive(checked_at));
        };
        let Some(customer_id) = self.find_customer(email).await? else {
            return Ok(SubscriptionSnapshot::inactive(checked_at));
        };

        let response = self
            .client
            .get(self.url("subscriptions"))
            .bearer_auth(&self.secret_key)
            .query(&[
                ("customer", customer_id.as_str()),
                ("status", "active"),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(LedgerError::external)?;
        let subscriptions: List<SubscriptionObject> =
            read_json(response, "list subscriptions").await?;

        Ok(match subscriptions.data.into_iter().next() {
            Some(sub) => SubscriptionSnapshot {
                active: true,
                renewal_date: sub
                    .current_period_end
                    .and_then(|ts| DateTime::from_timestamp(ts, 0)),
                cancelled: sub.cancel_at_period_end,
                checked_at,
            },
            None => SubscriptionSnapshot::inactive(checked_at),
        })
    }
}
