//! Query side of the blog: holds the persisted search index in memory and
//! answers queries against it, consulting the response cache first.
//!
//! The index is swapped as a whole on reload; readers keep the `Arc` they
//! started with.
use std::path::PathBuf;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use blog_content::error::ContentError;
use blog_content::index::parse_search_index;
use blog_content::model::SearchIndexEntry;
use blog_content::query::run_query;

use crate::api::{SearchParams, SearchResponse};
use crate::cache::{ResponseCache, SearchKey};
use crate::error::AppError;

/// One loaded index file. `version` is the SHA-256 of the file contents and
/// becomes part of every cache key computed from these entries.
#[derive(Clone)]
struct LoadedIndex {
    version: String,
    entries: Arc<Vec<SearchIndexEntry>>,
}

pub struct SearchEngine {
    index_path: PathBuf,
    index: RwLock<Option<LoadedIndex>>,
    cache: ResponseCache,
}

impl SearchEngine {
    /// Load the index from `index_path`. A missing or corrupt file is logged and
    /// leaves the engine without an index until the next successful reload.
    pub async fn load(index_path: PathBuf, cache: ResponseCache) -> Self {
        let engine = Self::new(index_path, cache);
        if let Err(e) = engine.reload().await {
            warn!(
                error = %e,
                path = %engine.index_path.display(),
                "search index not loaded, queries will fail until reload"
            );
        }
        engine
    }

    pub fn new(index_path: PathBuf, cache: ResponseCache) -> Self {
        Self {
            index_path,
            index: RwLock::new(None),
            cache,
        }
    }

    #[cfg(test)]
    pub fn with_entries(entries: Vec<SearchIndexEntry>, cache: ResponseCache) -> Self {
        Self {
            index_path: PathBuf::new(),
            index: RwLock::new(Some(LoadedIndex {
                version: "fixture".to_string(),
                entries: Arc::new(entries),
            })),
            cache,
        }
    }

    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse, AppError> {
        let index = self
            .index
            .read()
            .await
            .clone()
            .ok_or(AppError::IndexUnavailable)?;

        let key = SearchKey::new(&index.version, params);
        if let Some(cached) = self.cache.get(&key).await {
            debug!(key = key.as_str(), "search cache hit");
            return Ok(cached);
        }

        let outcome = run_query(&index.entries, &params.to_query());
        let response = SearchResponse::new(params, outcome.total, outcome.results);

        self.cache.put(&key, &response).await;
        Ok(response)
    }

    /// Re-read the index file. On failure the previous index stays in place.
    pub async fn reload(&self) -> Result<usize, AppError> {
        let json = tokio::fs::read_to_string(&self.index_path)
            .await
            .map_err(|source| ContentError::Io {
                path: self.index_path.clone(),
                source,
            })?;
        let entries = parse_search_index(&json, &self.index_path)?;
        let count = entries.len();
        let version = index_version(&json);

        *self.index.write().await = Some(LoadedIndex {
            version: version.clone(),
            entries: Arc::new(entries),
        });
        self.cache.invalidate_all().await;

        info!(
            path = %self.index_path.display(),
            entries = count,
            version = %version,
            "search index loaded"
        );
        Ok(count)
    }

    pub async fn entry_count(&self) -> Option<usize> {
        self.index.read().await.as_ref().map(|index| index.entries.len())
    }

    #[cfg(test)]
    async fn current_version(&self) -> Option<String> {
        self.index.read().await.as_ref().map(|index| index.version.clone())
    }
}

fn index_version(json: &str) -> String {
    format!("{:x}", Sha256::digest(json.as_bytes()))
}
