use holeout_domain::day::BusinessCalendar;
use holeout_domain::money::Pence;

use crate::infra::stripe::DEFAULT_API_BASE;

/// Ledger service configuration loaded from environment variables.
#[derive(Debug)]
pub struct LedgerConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL, used for the subscription status cache.
    pub redis_url: String,
    /// Stripe secret API key.
    pub stripe_secret_key: String,
    /// Stripe API base URL (default `https://api.stripe.com`). Env var: `STRIPE_API_BASE`.
    pub stripe_api_base: String,
    /// Resend API key for claim notification emails.
    pub resend_api_key: String,
    /// Operator inbox that receives claim notifications. Env var: `CLAIM_NOTIFICATION_TO`.
    pub claim_notification_to: String,
    /// Sender of claim notifications. Env var: `CLAIM_NOTIFICATION_FROM`.
    pub claim_notification_from: String,
    /// Business timezone for daily limits (default Europe/London). Env var: `LEDGER_TIMEZONE`.
    pub calendar: BusinessCalendar,
    /// TCP port to listen on (default 3120). Env var: `LEDGER_PORT`.
    pub ledger_port: u16,
    /// Frontend origin used to build checkout return URLs (e.g. "https://holeoutgolf.co.uk").
    pub app_origin: String,
    /// ISO currency code for checkout sessions (default "gbp").
    pub currency: String,
    /// Price of one single-play credit (default 500). Env var: `SINGLE_PLAY_PRICE_PENCE`.
    pub single_play_price: Pence,
    /// Subscription cache TTL (default 60). Env var: `SUBSCRIPTION_CACHE_TTL_SECS`.
    pub subscription_cache_ttl_secs: u64,
}

impl LedgerConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            redis_url: std::env::var("REDIS_URL").expect("REDIS_URL"),
            stripe_secret_key: std::env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY"),
            stripe_api_base: std::env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_owned()),
            resend_api_key: std::env::var("RESEND_API_KEY").expect("RESEND_API_KEY"),
            claim_notification_to: std::env::var("CLAIM_NOTIFICATION_TO")
                .unwrap_or_else(|_| "info@holeoutgolf.co.uk".to_owned()),
            claim_notification_from: std::env::var("CLAIM_NOTIFICATION_FROM")
                .unwrap_or_else(|_| "Hole Out Golf <onboarding@resend.dev>".to_owned()),
            calendar: std::env::var("LEDGER_TIMEZONE")
                .ok()
                .map(|tz| tz.parse().expect("LEDGER_TIMEZONE"))
                .unwrap_or_default(),
            ledger_port: std::env::var("LEDGER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3120),
            app_origin: std::env::var("APP_ORIGIN")
                .expect("APP_ORIGIN")
                .trim_end_matches('/')
                .to_owned(),
            currency: std::env::var("CURRENCY").unwrap_or_else(|_| "gbp".to_owned()),
            single_play_price: std::env::var("SINGLE_PLAY_PRICE_PENCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Pence)
                .unwrap_or(Pence(500)),
            subscription_cache_ttl_secs: std::env::var("SUBSCRIPTION_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}
