use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use holeout_domain::clock::SystemClock;
use holeout_domain::day::BusinessCalendar;

use crate::domain::types::CheckoutSettings;
use crate::infra::cache::RedisSubscriptionCache;
use crate::infra::db::{
    DbClaimRepository, DbCourseRepository, DbCreditRepository, DbEventRepository,
    DbRegistrationRepository, DbShotRepository,
};
use crate::infra::email::ResendNotifier;
use crate::infra::feed::ShotFeed;
use crate::infra::stripe::StripeClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub stripe: StripeClient,
    pub notifier: ResendNotifier,
    pub feed: ShotFeed,
    pub calendar: BusinessCalendar,
    pub checkout: CheckoutSettings,
    pub subscription_cache_ttl_secs: u64,
}

impl AppState {
    pub fn course_repo(&self) -> DbCourseRepository {
        DbCourseRepository {
            db: self.db.clone(),
        }
    }

    pub fn event_repo(&self) -> DbEventRepository {
        DbEventRepository {
            db: self.db.clone(),
        }
    }

    pub fn shot_repo(&self) -> DbShotRepository {
        DbShotRepository {
            db: self.db.clone(),
        }
    }

    pub fn credit_repo(&self) -> DbCreditRepository {
        DbCreditRepository {
            db: self.db.clone(),
        }
    }

    pub fn claim_repo(&self) -> DbClaimRepository {
        DbClaimRepository {
            db: self.db.clone(),
        }
    }

    pub fn registration_repo(&self) -> DbRegistrationRepository {
        DbRegistrationRepository {
            db: self.db.clone(),
        }
    }

    pub fn subscriptions(&self) -> RedisSubscriptionCache<StripeClient> {
        RedisSubscriptionCache {
            pool: self.redis.clone(),
            inner: self.stripe.clone(),
            ttl_secs: self.subscription_cache_ttl_secs,
        }
    }

    pub fn clock(&self) -> SystemClock {
        SystemClock
    }
}
