/// Redis-backed response cache for the search endpoint.
///
/// Key schema:
/// - `bsearch:v1:search:{sha256(index version, q, category, tags, limit)}`: JSON SearchResponse (TTL 300s)
///
/// The connection is made once at startup. If Redis is not configured or does
/// not answer PING then, the cache stays off for the life of the process. A
/// command failing later is logged and treated as a miss.
///
/// Keys embed the version of the index that produced the response, so an
/// answer computed from an index that was replaced mid-query is never served.
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::api::{SearchParams, SearchResponse};

const KEY_PREFIX: &str = "bsearch:v1:";
const SCAN_BATCH: usize = 100;
pub const SEARCH_TTL_SECS: u64 = 300;

/// Redis key of one search answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKey(String);

impl SearchKey {
    /// Every part is length-prefixed, so no choice of parameter text can make
    /// two different requests hash alike.
    pub fn new(index_version: &str, params: &SearchParams) -> Self {
        let limit = params.limit().to_string();
        let parts = [
            index_version,
            params.q.as_deref().unwrap_or(""),
            params.category.as_deref().unwrap_or(""),
            params.tags.as_deref().unwrap_or(""),
            limit.as_str(),
        ];

        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        Self(format!("{KEY_PREFIX}search:{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub struct ResponseCache {
    conn: Option<MultiplexedConnection>,
}

impl ResponseCache {
    pub async fn connect(url: Option<&str>) -> Self {
        let Some(url) = url else {
            info!("REDIS_URL not set, response cache disabled");
            return Self { conn: None };
        };

        let conn = match open_connection(url).await {
            Ok(conn) => {
                info!("redis connected, response cache enabled");
                Some(conn)
            }
            Err(e) => {
                warn!(error = %e, "redis unavailable, response cache disabled");
                None
            }
        };
        Self { conn }
    }

    #[cfg(test)]
    pub fn disabled() -> Self {
        Self { conn: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.conn.is_some()
    }

    pub async fn get(&self, key: &SearchKey) -> Option<SearchResponse> {
        let mut conn = self.conn.clone()?;
        let json: Option<String> = conn
            .get(key.as_str())
            .await
            .inspect_err(|e| warn!(error = %e, key = key.as_str(), "redis GET failed"))
            .ok()?;
        serde_json::from_str(&json?)
            .inspect_err(|e| warn!(error = %e, key = key.as_str(), "cached response unreadable"))
            .ok()
    }

    pub async fn put(&self, key: &SearchKey, response: &SearchResponse) {
        let Some(mut conn) = self.conn.clone() else {
            return;
        };
        let json = match serde_json::to_string(response) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "search response not serializable, skipping cache");
                return;
            }
        };
        if let Err(e) = conn
            .set_ex::<_, _, ()>(key.as_str(), json, SEARCH_TTL_SECS)
            .await
        {
            warn!(error = %e, key = key.as_str(), "redis SETEX failed");
        }
    }

    /// Drop every cached answer. Returns the number of keys removed.
    pub async fn invalidate_all(&self) -> usize {
        let Some(mut conn) = self.conn.clone() else {
            return 0;
        };

        let keys = match cached_keys(&mut conn).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "redis SCAN failed, stale answers expire with their TTL");
                return 0;
            }
        };

        let mut removed = 0;
        for batch in keys.chunks(SCAN_BATCH) {
            match conn.del::<_, usize>(batch).await {
                Ok(n) => removed += n,
                Err(e) => {
                    warn!(error = %e, "redis DEL failed during invalidation");
                    break;
                }
            }
        }
        info!(removed, "response cache invalidated");
        removed
    }
}

async fn open_connection(url: &str) -> redis::RedisResult<MultiplexedConnection> {
    let client = redis::Client::open(url)?;
    let mut conn = client.get_multiplexed_async_connection().await?;
    let _pong: String = redis::cmd("PING").query_async(&mut conn).await?;
    Ok(conn)
}

async fn cached_keys(conn: &mut MultiplexedConnection) -> redis::RedisResult<Vec<String>> {
    let pattern = format!("{KEY_PREFIX}*");
    let mut keys = Vec::new();
    let mut cursor: u64 = 0;
    loop {
        let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(&pattern)
            .arg("COUNT")
            .arg(SCAN_BATCH)
            .query_async(conn)
            .await?;
        keys.extend(batch);
        if next == 0 {
            return Ok(keys);
        }
        cursor = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(q: Option<&str>, category: Option<&str>, limit: Option<&str>) -> SearchParams {
        SearchParams {
            q: q.map(str::to_string),
            category: category.map(str::to_string),
            limit: limit.map(str::to_string),
            ..SearchParams::default()
        }
    }

    #[test]
    fn keys_are_stable_and_prefixed() {
        let a = SearchKey::new("v1", &params(Some("ai"), None, None));
        assert_eq!(a, SearchKey::new("v1", &params(Some("ai"), None, None)));
        assert!(a.as_str().starts_with("bsearch:v1:search:"));
    }

    #[test]
    fn separator_text_in_parameters_cannot_collide() {
        let pipe_in_query = SearchKey::new("v1", &params(Some("a|"), Some(""), None));
        let pipe_in_category = SearchKey::new("v1", &params(Some("a"), Some("|"), None));
        assert_ne!(pipe_in_query, pipe_in_category);
    }

    #[test]
    fn keys_follow_index_version_and_effective_limit() {
        let base = SearchKey::new("v1", &params(Some("ai"), None, None));
        assert_ne!(base, SearchKey::new("v2", &params(Some("ai"), None, None)));
        assert_ne!(base, SearchKey::new("v1", &params(Some("ai"), None, Some("5"))));
        // unparsable limits fall back to the default and share its answer
        assert_eq!(base, SearchKey::new("v1", &params(Some("ai"), None, Some("lots"))));
    }

    #[tokio::test]
    async fn unconfigured_cache_is_a_no_op() {
        let cache = ResponseCache::connect(None).await;
        assert!(!cache.is_enabled());
        let key = SearchKey::new("v1", &SearchParams::default());
        assert_eq!(cache.get(&key).await, None);
        assert_eq!(cache.invalidate_all().await, 0);
    }

    #[tokio::test]
    async fn unreachable_redis_disables_cache() {
        assert!(!ResponseCache::connect(Some("not a url")).await.is_enabled());
        assert!(!ResponseCache::connect(Some("redis://127.0.0.1:1/")).await.is_enabled());
    }
}
