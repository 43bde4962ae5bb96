//! Redis-based assignment store using a Lua script for atomic reservation.
//!
//! Suitable for multi-node deployments: every broker instance points at the
//! same Redis SET and contends on it.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, error, info};

use broker_core::error::{AppError, ErrorKind};
use broker_core::result::AppResult;
use broker_core::traits::assignment_store::{AssignmentStore, Reservation};
use broker_core::types::id::{ClientId, ResourceId};
use broker_core::types::record::{Assignment, AssignmentRecord, pairing_token};

use super::client::RecordConnection;

/// Lua script for atomic reservation.
///
/// KEYS[1] = record set
/// ARGV[1] = client id
/// ARGV[2] = resource id
/// ARGV[3] = pairing token
///
/// Returns:
///   1 = reserved
///   0 = client or resource already present
const RESERVE_SCRIPT: &str = r#"
    local record_key = KEYS[1]
    local client = ARGV[1]
    local resource = ARGV[2]
    local token = ARGV[3]

    if redis.call('SISMEMBER', record_key, client) == 1 then
        return 0
    end
    if redis.call('SISMEMBER', record_key, resource) == 1 then
        return 0
    end

    redis.call('SADD', record_key, client, resource, token)
    return 1
"#;

/// Redis-based assignment store for multi-node deployments.
#[derive(Debug, Clone)]
pub struct RedisAssignmentStore {
    connection: RecordConnection,
}

impl RedisAssignmentStore {
    /// Creates a store over an open record connection.
    pub fn new(connection: RecordConnection) -> Self {
        info!(record_key = %connection.record_key(), "Redis assignment store initialized");
        Self { connection }
    }

    async fn read_record(&self) -> AppResult<AssignmentRecord> {
        let mut conn = self.connection.handle();
        let key = self.connection.record_key();
        let members: Vec<String> = conn.smembers(key).await.map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Redis SMEMBERS failed", e)
        })?;
        AssignmentRecord::decode(&members)
    }
}

#[async_trait]
impl AssignmentStore for RedisAssignmentStore {
    fn store_type(&self) -> &str {
        "redis"
    }

    async fn try_reserve(
        &self,
        client: &ClientId,
        resource: &ResourceId,
    ) -> AppResult<Reservation> {
        let mut conn = self.connection.handle();

        let result: i64 = redis::Script::new(RESERVE_SCRIPT)
            .key(self.connection.record_key())
            .arg(client.as_str())
            .arg(resource.as_str())
            .arg(pairing_token(client, resource))
            .invoke_async(&mut conn)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::StoreUnavailable,
                    "Redis reservation script failed",
                    e,
                )
            })?;

        match result {
            1 => {
                info!(client = %client, resource = %resource, "Resource reserved via Redis");
                Ok(Reservation::Reserved)
            }
            0 => {
                debug!(client = %client, resource = %resource, "Reservation refused, already taken");
                Ok(Reservation::Taken)
            }
            other => {
                error!(result = other, "Unexpected Lua script result");
                Err(AppError::store_unavailable(format!(
                    "Unexpected reservation result: {other}"
                )))
            }
        }
    }

    async fn lookup(&self, client: &ClientId) -> AppResult<Option<ResourceId>> {
        let record = self.read_record().await?;
        Ok(record.resource_for(client).cloned())
    }

    async fn assignments(&self) -> AppResult<Vec<Assignment>> {
        Ok(self.read_record().await?.assignments())
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.connection.ping().await
    }
}
