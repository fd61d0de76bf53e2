use reqwest::Client;
use serde::Serialize;

use crate::domain::repository::NotificationPort;
use crate::domain::types::ClaimNotification;
use crate::error::LedgerError;

const RESEND_EMAILS_URL: &str = "https://api.resend.com/emails";

/// Sends prize-claim notifications to the operator through Resend.
#[derive(Clone)]
pub struct ResendNotifier {
    client: Client,
    api_key: String,
    from: String,
    to: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    html: String,
}

impl ResendNotifier {
    pub fn new(api_key: String, from: String, to: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            from,
            to,
        }
    }
}

impl NotificationPort for ResendNotifier {
    async fn send_claim_notification(
        &self,
        notification: ClaimNotification,
    ) -> Result<(), LedgerError> {
        let body = SendEmailRequest {
            from: &self.from,
            to: [&self.to],
            subject: format!("New Prize Claim - {}", notification.target_name),
            html: render_claim_html(&notification),
        };
        let response = self
            .client
            .post(RESEND_EMAILS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(LedgerError::external)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LedgerError::external(anyhow::anyhow!(
                "resend returned {status}: {text}"
            )));
        }
        tracing::info!(claim_id = %notification.claim_id, "claim notification sent");
        Ok(())
    }
}

fn render_claim_html(n: &ClaimNotification) -> String {
    let mut html = String::from("<h1>New Hole-in-One Prize Claim</h1><h2>Claim Details</h2>");
    let mut row = |label: &str, value: &str| {
        html.push_str(&format!(
            "<p><strong>{label}:</strong> {}</p>",
            escape(value)
        ));
    };
    row("Course / Event", &n.target_name);
    row("Player", n.player_email.as_deref().unwrap_or("unknown"));
    row("Date", &n.claim_date.to_string());
    if let Some(tee_time) = &n.tee_time {
        row("Tee time", tee_time);
    }
    if let Some(time) = &n.time_of_hole_in_one {
        row("Time of hole-in-one", time);
    }
    if let Some(prize) = n.prize_amount {
        row("Prize", &prize.to_string());
    }
    if let Some(notes) = &n.notes {
        row("Notes", notes);
    }
    html.push_str("<hr/><p>This claim requires review and approval in the admin panel.</p>");
    html
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
