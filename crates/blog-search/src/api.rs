use serde::{Deserialize, Serialize};

use blog_content::model::SearchIndexEntry;
use blog_content::query::{parse_tag_list, SearchQuery, DEFAULT_LIMIT};

/// Hard ceiling on `limit`, whatever the client asks for.
pub const MAX_LIMIT: usize = 100;

/// Query string of `GET /api/search.json`.
///
/// Every field is optional text so malformed values never reject the request;
/// an unparsable `limit` falls back to the default.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub q: Option<String>,
    pub category: Option<String>,
    /// Comma-separated tag list
    pub tags: Option<String>,
    pub limit: Option<String>,
}

impl SearchParams {
    /// Build from raw query-string pairs. A repeated key keeps its first value;
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut params.q,
                "category" => &mut params.category,
                "tags" => &mut params.tags,
                "limit" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    pub fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT)
    }

    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            text: self.q.clone(),
            category: self.category.clone(),
            tags: self.tags.clone(),
            limit: self.limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub category: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub total: usize,
    pub results: Vec<SearchIndexEntry>,
    pub filters: SearchFilters,
}

/// Body of every 500 answer. Carries no detail about the underlying error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    pub results: Vec<SearchIndexEntry>,
}

impl FailureResponse {
    pub fn internal() -> Self {
        Self {
            success: false,
            error: "internal server error".to_string(),
            results: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub total: usize,
}

impl SearchResponse {
    pub fn new(params: &SearchParams, total: usize, results: Vec<SearchIndexEntry>) -> Self {
        Self {
            success: true,
            query: params.q.clone().unwrap_or_default(),
            total,
            results,
            filters: SearchFilters {
                category: params.category.clone().unwrap_or_default(),
                tags: parse_tag_list(params.tags.as_deref().unwrap_or("")),
            },
        }
    }
}
