use sea_orm::Database;
use tracing::info;

use holeout_core::tracing::init_tracing;
use holeout_ledger::config::LedgerConfig;
use holeout_ledger::domain::types::CheckoutSettings;
use holeout_ledger::infra::email::ResendNotifier;
use holeout_ledger::infra::feed::ShotFeed;
use holeout_ledger::infra::stripe::StripeClient;
use holeout_ledger::router::build_router;
use holeout_ledger::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = LedgerConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let state = AppState {
        db,
        redis,
        stripe: StripeClient::new(
            config.stripe_secret_key,
            config.stripe_api_base,
            config.currency,
        ),
        notifier: ResendNotifier::new(
            config.resend_api_key,
            config.claim_notification_from,
            config.claim_notification_to,
        ),
        feed: ShotFeed::default(),
        calendar: config.calendar,
        checkout: CheckoutSettings {
            app_origin: config.app_origin,
            single_play_price: config.single_play_price,
        },
        subscription_cache_ttl_secs: config.subscription_cache_ttl_secs,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.ledger_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!(timezone = %config.calendar, "ledger service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
