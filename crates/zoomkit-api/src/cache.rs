//! Requests cache. Keyed JSON lists, backed by memory or SQLite.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use rusqlite::{params, Connection, OptionalExtension};
use zoomkit_core::{CacheBackend, Config};

use crate::dates::DateRange;
use crate::error::CacheError;
use crate::types::{Record, DATE_FORMAT};

/// Cache key for the upcoming meetings list.
pub const UPCOMING_MEETINGS_KEY: &str = "upcomingMeetings";

/// Cache key for a recordings range, built from the normalized dates.
pub fn recordings_key(range: &DateRange) -> String {
    format!(
        "recordings_{}_{}",
        range.from().format(DATE_FORMAT),
        range.to().format(DATE_FORMAT)
    )
}

/// Storage behind the meeting service.
///
/// Failures are reported to the caller, which decides whether they matter.
pub trait RequestsCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<Record>>, CacheError>;

    fn set(&self, key: &str, value: &[Record]) -> Result<(), CacheError>;

    fn clear(&self) -> Result<(), CacheError>;
}

/// Build the configured backend.
pub fn from_config(config: &Config) -> Result<Arc<dyn RequestsCache>, CacheError> {
    let lifetime = config.cache.lifetime();
    let cache: Arc<dyn RequestsCache> = match config.cache.backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new(lifetime)),
        CacheBackend::Sqlite => Arc::new(SqliteCache::open(config.cache_path(), lifetime)?),
        CacheBackend::Disabled => Arc::new(NoCache),
    };
    Ok(cache)
}

struct MemoryEntry {
    value: Vec<Record>,
    stored_at: Instant,
}

/// Process-local cache.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, MemoryEntry>>,
    lifetime: Option<Duration>,
}

impl MemoryCache {
    pub fn new(lifetime: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            lifetime,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn is_fresh(&self, entry: &MemoryEntry) -> bool {
        self.lifetime
            .map(|lifetime| entry.stored_at.elapsed() < lifetime)
            .unwrap_or(true)
    }
}

impl RequestsCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<Record>>, CacheError> {
        let entries = self.entries.read();
        Ok(entries
            .get(key)
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| entry.value.clone()))
    }

    fn set(&self, key: &str, value: &[Record]) -> Result<(), CacheError> {
        self.entries.write().insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_vec(),
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.entries.write().clear();
        Ok(())
    }
}

/// SQLite-backed cache that survives restarts.
pub struct SqliteCache {
    conn: Mutex<Connection>,
    lifetime: Option<Duration>,
}

impl SqliteCache {
    /// Open (or create) the cache database at `path`.
    pub fn open<P: AsRef<Path>>(path: P, lifetime: Option<Duration>) -> Result<Self, CacheError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::with_connection(conn, lifetime)
    }

    pub fn in_memory(lifetime: Option<Duration>) -> Result<Self, CacheError> {
        Self::with_connection(Connection::open_in_memory()?, lifetime)
    }

    fn with_connection(conn: Connection, lifetime: Option<Duration>) -> Result<Self, CacheError> {
        let cache = Self {
            conn: Mutex::new(conn),
            lifetime,
        };
        cache.init_schema()?;
        Ok(cache)
    }

    fn init_schema(&self) -> Result<(), CacheError> {
        self.conn.lock().execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS requests (
                key TEXT PRIMARY KEY,
                value_json TEXT NOT NULL,
                cached_at INTEGER NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}

impl RequestsCache for SqliteCache {
    fn get(&self, key: &str) -> Result<Option<Vec<Record>>, CacheError> {
        let row: Option<(String, i64)> = self
            .conn
            .lock()
            .query_row(
                "SELECT value_json, cached_at FROM requests WHERE key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((value_json, cached_at)) = row else {
            return Ok(None);
        };

        if let Some(lifetime) = self.lifetime {
            let age = Utc::now().timestamp().saturating_sub(cached_at);
            if age < 0 || age as u64 >= lifetime.as_secs() {
                return Ok(None);
            }
        }

        let value = serde_json::from_str(&value_json).map_err(|e| CacheError::Read {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &[Record]) -> Result<(), CacheError> {
        let value_json = serde_json::to_string(value)?;
        self.conn.lock().execute(
            "INSERT OR REPLACE INTO requests (key, value_json, cached_at) VALUES (?1, ?2, ?3)",
            params![key, value_json, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.conn.lock().execute("DELETE FROM requests", [])?;
        Ok(())
    }
}

/// Never stores anything. Every read is a miss.
pub struct NoCache;

impl RequestsCache for NoCache {
    fn get(&self, _key: &str) -> Result<Option<Vec<Record>>, CacheError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &[Record]) -> Result<(), CacheError> {
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::TempDir;

    fn meetings() -> Vec<Record> {
        vec![json!({"id": 1, "topic": "Standup"}), json!({"id": 2, "topic": "Retro"})]
    }

    #[test]
    fn test_recordings_key() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
        )
        .unwrap();
        assert_eq!(recordings_key(&range), "recordings_2023-01-01_2023-03-01");
    }

    #[test]
    fn test_memory_cache_roundtrip_and_clear() {
        let cache = MemoryCache::new(None);
        assert!(cache.get(UPCOMING_MEETINGS_KEY).unwrap().is_none());

        cache.set(UPCOMING_MEETINGS_KEY, &meetings()).unwrap();
        assert_eq!(cache.get(UPCOMING_MEETINGS_KEY).unwrap(), Some(meetings()));
        assert_eq!(cache.len(), 1);

        cache.clear().unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_memory_cache_keeps_empty_lists() {
        let cache = MemoryCache::new(None);
        cache.set("recordings_x", &[]).unwrap();
        assert_eq!(cache.get("recordings_x").unwrap(), Some(vec![]));
    }

    #[test]
    fn test_memory_cache_expiry() {
        let cache = MemoryCache::new(Some(Duration::ZERO));
        cache.set(UPCOMING_MEETINGS_KEY, &meetings()).unwrap();
        assert!(cache.get(UPCOMING_MEETINGS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_sqlite_cache_roundtrip() {
        let cache = SqliteCache::in_memory(None).unwrap();
        assert!(cache.get(UPCOMING_MEETINGS_KEY).unwrap().is_none());

        cache.set(UPCOMING_MEETINGS_KEY, &meetings()).unwrap();
        assert_eq!(cache.get(UPCOMING_MEETINGS_KEY).unwrap(), Some(meetings()));

        let updated = vec![json!({"id": 3})];
        cache.set(UPCOMING_MEETINGS_KEY, &updated).unwrap();
        assert_eq!(cache.get(UPCOMING_MEETINGS_KEY).unwrap(), Some(updated));

        cache.clear().unwrap();
        assert!(cache.get(UPCOMING_MEETINGS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_sqlite_cache_expiry() {
        let cache = SqliteCache::in_memory(Some(Duration::ZERO)).unwrap();
        cache.set(UPCOMING_MEETINGS_KEY, &meetings()).unwrap();
        assert!(cache.get(UPCOMING_MEETINGS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_sqlite_cache_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("requests_cache.db");

        {
            let cache = SqliteCache::open(&path, None).unwrap();
            cache.set(UPCOMING_MEETINGS_KEY, &meetings()).unwrap();
        }

        let cache = SqliteCache::open(&path, None).unwrap();
        assert_eq!(cache.get(UPCOMING_MEETINGS_KEY).unwrap(), Some(meetings()));
    }

    #[test]
    fn test_no_cache_always_misses() {
        let cache = NoCache;
        cache.set(UPCOMING_MEETINGS_KEY, &meetings()).unwrap();
        assert!(cache.get(UPCOMING_MEETINGS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_from_config_backends() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.config_dir = dir.path().to_path_buf();

        let cache = from_config(&config).unwrap();
        cache.set("k", &meetings()).unwrap();
        assert!(cache.get("k").unwrap().is_some());

        config.cache.backend = CacheBackend::Sqlite;
        let cache = from_config(&config).unwrap();
        cache.set("k", &meetings()).unwrap();
        assert!(dir.path().join("requests_cache.db").exists());

        config.cache.backend = CacheBackend::Disabled;
        let cache = from_config(&config).unwrap();
        cache.set("k", &meetings()).unwrap();
        assert!(cache.get("k").unwrap().is_none());
    }
}
