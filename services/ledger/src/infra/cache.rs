use chrono::{DateTime, Utc};
use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::repository::SubscriptionPort;
use crate::domain::types::{Player, SubscriptionSnapshot};
use crate::error::LedgerError;

/// Caches subscription lookups in Redis for `ttl_secs`.
///
/// Redis is an accelerator only: when it is unreachable the inner port is
/// queried directly.
#[derive(Clone)]
pub struct RedisSubscriptionCache<P: SubscriptionPort> {
    pub pool: Pool,
    pub inner: P,
    pub ttl_secs: u64,
}

#[derive(Serialize, Deserialize)]
struct CachedSnapshot {
    active: bool,
    renewal_date: Option<DateTime<Utc>>,
    cancelled: bool,
    checked_at: DateTime<Utc>,
}

impl From<&SubscriptionSnapshot> for CachedSnapshot {
    fn from(s: &SubscriptionSnapshot) -> Self {
        Self {
            active: s.active,
            renewal_date: s.renewal_date,
            cancelled: s.cancelled,
            checked_at: s.checked_at,
        }
    }
}

impl From<CachedSnapshot> for SubscriptionSnapshot {
    fn from(c: CachedSnapshot) -> Self {
        Self {
            active: c.active,
            renewal_date: c.renewal_date,
            cancelled: c.cancelled,
            checked_at: c.checked_at,
        }
    }
}

fn subscription_key(player: &Player) -> String {
    format!("subscription:{}", player.id)
}

impl<P: SubscriptionPort> RedisSubscriptionCache<P> {
    async fn read(&self, key: &str) -> Result<Option<SubscriptionSnapshot>, LedgerError> {
        let mut conn = self.pool.get().await.map_err(LedgerError::external)?;
        let value: Option<Vec<u8>> = conn.get(key).await.map_err(LedgerError::external)?;
        Ok(value
            .and_then(|bytes| serde_json::from_slice::<CachedSnapshot>(&bytes).ok())
            .map(Into::into))
    }

    async fn write(&self, key: &str, snapshot: &SubscriptionSnapshot) -> Result<(), LedgerError> {
        let bytes = serde_json::to_vec(&CachedSnapshot::from(snapshot))
            .map_err(|e| LedgerError::Internal(e.into()))?;
        let mut conn = self.pool.get().await.map_err(LedgerError::external)?;
        let (): () = conn
            .set_ex(key, bytes, self.ttl_secs)
            .await
            .map_err(LedgerError::external)?;
        Ok(())
    }
}

impl<P: SubscriptionPort> SubscriptionPort for RedisSubscriptionCache<P> {
    async fn status(&self, player: &Player) -> Result<SubscriptionSnapshot, LedgerError> {
        let key = subscription_key(player);
        match self.read(&key).await {
            Ok(Some(snapshot)) => return Ok(snapshot),
            Ok(None) => {}
            Err(e) => warn!(user_id = %player.id, error = ?e, "subscription cache read failed"),
        }

        let snapshot = self.inner.status(player).await?;
        if let Err(e) = self.write(&key, &snapshot).await {
            warn!(user_id = %player.id, error = ?e, "subscription cache write failed");
        }
        Ok(snapshot)
    }
}
