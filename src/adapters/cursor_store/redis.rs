//! Redis-backed cursor store for multi-instance deployments.
//!
//! The cycle record lives in a hash with two fields, `version` and `record`
//! (JSON). Conditional writes run as Lua scripts so the version check and the
//! write are atomic on the server. The consumption record is a plain JSON
//! string key.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Script};

use crate::domain::cycle::{ConsumptionRecord, CycleRecord};
use crate::ports::{CursorStore, StoreError, Versioned};

const INSERT_SCRIPT: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 1 then
    return -1
end
redis.call('HSET', KEYS[1], 'version', 1, 'record', ARGV[1])
return 1
"#;

const CAS_SCRIPT: &str = r#"
local current = redis.call('HGET', KEYS[1], 'version')
if not current then
    return -2
end
if tonumber(current) ~= tonumber(ARGV[1]) then
    return -1
end
local next = tonumber(current) + 1
redis.call('HSET', KEYS[1], 'version', next, 'record', ARGV[2])
return next
"#;

const PUT_SCRIPT: &str = r#"
local next = redis.call('HINCRBY', KEYS[1], 'version', 1)
redis.call('HSET', KEYS[1], 'record', ARGV[1])
return next
"#;

/// Redis cursor store.
#[derive(Clone)]
pub struct RedisCursorStore {
    conn: MultiplexedConnection,
    key_prefix: String,
    insert: Script,
    cas: Script,
    put: Script,
}

impl RedisCursorStore {
    /// Create a store whose keys start with `key_prefix`.
    pub fn new(conn: MultiplexedConnection, key_prefix: impl Into<String>) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
            insert: Script::new(INSERT_SCRIPT),
            cas: Script::new(CAS_SCRIPT),
            put: Script::new(PUT_SCRIPT),
        }
    }

    /// Opens a multiplexed connection to `url`.
    pub async fn connect(url: &str, key_prefix: impl Into<String>) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(unavailable)?;
        Ok(Self::new(conn, key_prefix))
    }

    fn cycle_key(&self) -> String {
        cycle_key(&self.key_prefix)
    }

    fn consumption_key(&self) -> String {
        consumption_key(&self.key_prefix)
    }
}

fn cycle_key(prefix: &str) -> String {
    format!("{}:cycle_state", prefix)
}

fn consumption_key(prefix: &str) -> String {
    format!("{}:consumption", prefix)
}

fn unavailable(e: redis::RedisError) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, StoreError> {
    serde_json::from_str(raw).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Maps a script's status reply onto a version or a race error.
fn script_outcome(reply: i64) -> Result<u64, StoreError> {
    match reply {
        -1 => Err(StoreError::Conflict),
        -2 => Err(StoreError::NotFound),
        v if v > 0 => Ok(v as u64),
        other => Err(StoreError::Unavailable(format!(
            "unexpected script reply {}",
            other
        ))),
    }
}

#[async_trait]
impl CursorStore for RedisCursorStore {
    async fn load(&self) -> Result<Option<Versioned<CycleRecord>>, StoreError> {
        let mut conn = self.conn.clone();

        let (version, record): (Option<u64>, Option<String>) = conn
            .hget(self.cycle_key(), &["version", "record"][..])
            .await
            .map_err(unavailable)?;

        match (version, record) {
            (Some(version), Some(raw)) => Ok(Some(Versioned::new(version, decode(&raw)?))),
            _ => Ok(None),
        }
    }

    async fn insert(&self, record: &CycleRecord) -> Result<u64, StoreError> {
        let mut conn = self.conn.clone();
        let reply: i64 = self
            .insert
            .key(self.cycle_key())
            .arg(encode(record)?)
            .invoke_async(&mut conn)
            .await
            .map_err(unavailable)?;

        match script_outcome(reply) {
            Err(StoreError::Conflict) => Err(StoreError::AlreadyExists),
            outcome => outcome,
        }
    }

    async fn compare_and_swap(
        &self,
        expected: u64,
        record: &CycleRecord,
    ) -> Result<u64, StoreError> {
        let mut conn = self.conn.clone();
        let reply: i64 = self
            .cas
            .key(self.cycle_key())
            .arg(expected)
            .arg(encode(record)?)
            .invoke_async(&mut conn)
            .await
            .map_err(unavailable)?;

        script_outcome(reply)
    }

    async fn put(&self, record: &CycleRecord) -> Result<u64, StoreError> {
        let mut conn = self.conn.clone();
        let reply: i64 = self
            .put
            .key(self.cycle_key())
            .arg(encode(record)?)
            .invoke_async(&mut conn)
            .await
            .map_err(unavailable)?;

        script_outcome(reply)
    }

    async fn load_consumption(&self) -> Result<Option<ConsumptionRecord>, StoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(self.consumption_key())
            .await
            .map_err(unavailable)?;

        raw.as_deref().map(decode).transpose()
    }

    async fn save_consumption(&self, record: &ConsumptionRecord) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(self.consumption_key(), encode(record)?)
            .await
            .map_err(unavailable)
    }

    async fn clear_consumption(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.consumption_key())
            .await
            .map_err(unavailable)
    }
}

impl std::fmt::Debug for RedisCursorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCursorStore")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Round trips against a live server run separately:
    // NEWSWIRE__STORE__REDIS_URL=redis://127.0.0.1/ cargo test -- --ignored

    #[test]
    fn keys_share_prefix() {
        assert_eq!(cycle_key("newswire"), "newswire:cycle_state");
        assert_eq!(consumption_key("newswire"), "newswire:consumption");
    }

    #[test]
    fn script_replies_map_to_store_errors() {
        assert_eq!(script_outcome(1), Ok(1));
        assert_eq!(script_outcome(7), Ok(7));
        assert_eq!(script_outcome(-1), Err(StoreError::Conflict));
        assert_eq!(script_outcome(-2), Err(StoreError::NotFound));
        assert!(matches!(script_outcome(0), Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn records_survive_encoding() {
        let record = CycleRecord::fresh(crate::domain::foundation::Timestamp::from_millis(3));
        let decoded: CycleRecord = decode(&encode(&record).unwrap()).unwrap();
        assert_eq!(decoded, record);
    }

    #[tokio::test]
    #[ignore]
    async fn live_insert_then_conflict() {
        let url = std::env::var("NEWSWIRE__STORE__REDIS_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1/".to_string());
        let store = RedisCursorStore::connect(&url, "newswire-test").await.unwrap();
        let record = CycleRecord::fresh(crate::domain::foundation::Timestamp::now());

        let first = store.put(&record).await.unwrap();
        let second = store.compare_and_swap(first, &record).await.unwrap();

        assert_eq!(second, first + 1);
        assert_eq!(
            store.compare_and_swap(first, &record).await,
            Err(StoreError::Conflict)
        );
    }
}
