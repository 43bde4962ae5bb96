//! Connection to the Redis set holding the shared record.

use redis::aio::ConnectionManager;
use tracing::info;

use broker_core::config::store::StoreConfig;
use broker_core::error::{AppError, ErrorKind};
use broker_core::result::AppResult;

/// Reconnecting Redis connection bound to the record's key.
#[derive(Debug, Clone)]
pub struct RecordConnection {
    manager: ConnectionManager,
    /// `key_prefix` followed by `record_key`.
    record_key: String,
}

impl RecordConnection {
    /// Open the connection described by the store configuration.
    pub async fn open(config: &StoreConfig) -> AppResult<Self> {
        let record_key = format!("{}{}", config.redis.key_prefix, config.record_key);
        info!(
            endpoint = %endpoint(&config.redis.url),
            record_key = %record_key,
            "Opening Redis record connection"
        );

        let client = redis::Client::open(config.redis.url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid Redis URL", e)
        })?;
        let manager = ConnectionManager::new(client).await.map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Redis is unreachable", e)
        })?;

        Ok(Self {
            manager,
            record_key,
        })
    }

    /// Handle for one command; clones share the underlying connection.
    pub fn handle(&self) -> ConnectionManager {
        self.manager.clone()
    }

    /// Key of the shared record set.
    pub fn record_key(&self) -> &str {
        &self.record_key
    }

    /// Round-trip a PING.
    pub async fn ping(&self) -> AppResult<bool> {
        let mut conn = self.handle();
        let reply: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::StoreUnavailable, "Redis PING failed", e))?;
        Ok(reply == "PONG")
    }
}

/// Host part of a Redis URL, without scheme or credentials.
fn endpoint(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.rsplit_once('@').map_or(rest, |(_, host)| host)
}
