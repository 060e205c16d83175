use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author recorded on articles whose front matter does not name one.
pub const DEFAULT_AUTHOR: &str = "Andrés Ignacio Maldonado";

/// URL prefix under which every article is published.
pub const BLOG_URL_PREFIX: &str = "/blog/";

/// A single blog entry, immutable once loaded for a build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Slug-derived identifier, e.g. "ai-assistant-kpis"
    pub id: String,
    pub title: String,
    pub description: String,
    /// Raw Markdown body, front matter already removed
    pub body: String,
    /// Display order is preserved; scoring treats tags as a set
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub author: String,
    pub date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    /// Unpublished; excluded from every derived view by default
    pub draft: bool,
    pub featured: bool,
    /// Derived from `body`, e.g. "4 min"
    pub reading_time: String,
}

impl Article {
    pub fn url(&self) -> String {
        format!("{BLOG_URL_PREFIX}{}", self.id)
    }

    /// Category as displayed and indexed; empty when the article has none.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_date.unwrap_or(self.date)
    }
}

/// One published article flattened for query-time filtering.
///
/// Serialized in camelCase; this is the shape of `search-index.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Body with Markdown punctuation stripped and whitespace collapsed
    pub content: String,
    pub tags: Vec<String>,
    /// Empty string when the article has no category
    pub category: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub reading_time: String,
    pub featured: bool,
    pub url: String,
    /// Lowercase `title description content`
    pub search_text: String,
    pub word_count: usize,
    pub last_modified: DateTime<Utc>,
}

/// Reduced projection written to `suggestions-index.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionEntry {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub category: String,
    pub featured: bool,
    pub url: String,
}

impl From<&SearchIndexEntry> for SuggestionEntry {
    fn from(entry: &SearchIndexEntry) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            tags: entry.tags.clone(),
            category: entry.category.clone(),
            featured: entry.featured,
            url: entry.url.clone(),
        }
    }
}

/// An article ranked against another one. Computed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedArticle {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    pub date: DateTime<Utc>,
    pub reading_time: String,
    pub featured: bool,
    pub url: String,
    /// Non-negative; 0 for listings that are not ranked
    pub relevance_score: f64,
}

impl RelatedArticle {
    pub fn from_article(article: &Article, relevance_score: f64) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            description: article.description.clone(),
            tags: article.tags.clone(),
            category: article.category_label().to_string(),
            date: article.date,
            reading_time: article.reading_time.clone(),
            featured: article.featured,
            url: article.url(),
            relevance_score,
        }
    }
}
