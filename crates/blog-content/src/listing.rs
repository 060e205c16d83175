//! Article listings used by index pages, archives and sidebars.
//!
//! Drafts are hidden unless a caller passes `include_drafts = true`. Listings
//! are newest first.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Article, RelatedArticle, BLOG_URL_PREFIX};

pub const DEFAULT_CATEGORY_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMatch {
    /// At least one requested tag
    Any,
    /// Every requested tag
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogStats {
    pub total_posts: usize,
    pub featured_posts: usize,
    pub categories: BTreeMap<String, usize>,
    pub tags: BTreeMap<String, usize>,
    pub latest_post_date: Option<DateTime<Utc>>,
}

pub fn published_articles(all: &[Article], include_drafts: bool) -> Vec<&Article> {
    let mut articles: Vec<&Article> = all
        .iter()
        .filter(|a| include_drafts || !a.draft)
        .collect();
    articles.sort_by(|a, b| b.date.cmp(&a.date));
    articles
}

pub fn latest_article(all: &[Article], include_drafts: bool) -> Option<&Article> {
    published_articles(all, include_drafts).into_iter().next()
}

pub fn recent_articles(all: &[Article], include_drafts: bool, limit: Option<usize>) -> Vec<&Article> {
    let mut articles = published_articles(all, include_drafts);
    if let Some(limit) = limit {
        articles.truncate(limit);
    }
    articles
}

/// Case-insensitive exact category match.
pub fn articles_by_category<'a>(
    all: &'a [Article],
    category: &str,
    include_drafts: bool,
) -> Vec<&'a Article> {
    let category = category.to_lowercase();
    published_articles(all, include_drafts)
        .into_iter()
        .filter(|a| {
            a.category
                .as_deref()
                .is_some_and(|c| c.to_lowercase() == category)
        })
        .collect()
}

/// Case-insensitive tag match. Articles without tags never match.
pub fn articles_by_tags<'a>(
    all: &'a [Article],
    tags: &[String],
    include_drafts: bool,
    mode: TagMatch,
) -> Vec<&'a Article> {
    let wanted: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    published_articles(all, include_drafts)
        .into_iter()
        .filter(|a| {
            if a.tags.is_empty() {
                return false;
            }
            let has = |tag: &String| a.tags.iter().any(|t| t.to_lowercase() == *tag);
            match mode {
                TagMatch::Any => wanted.iter().any(has),
                TagMatch::All => wanted.iter().all(has),
            }
        })
        .collect()
}

pub fn featured_articles(all: &[Article], include_drafts: bool) -> Vec<&Article> {
    published_articles(all, include_drafts)
        .into_iter()
        .filter(|a| a.featured)
        .collect()
}

/// Other published articles in exactly `category`, newest first, unscored.
pub fn category_articles(
    all: &[Article],
    category: &str,
    exclude_id: Option<&str>,
    max_results: usize,
) -> Vec<RelatedArticle> {
    published_articles(all, false)
        .into_iter()
        .filter(|a| a.category.as_deref() == Some(category) && Some(a.id.as_str()) != exclude_id)
        .take(max_results)
        .map(|a| RelatedArticle::from_article(a, 0.0))
        .collect()
}

pub fn blog_stats(all: &[Article], include_drafts: bool) -> BlogStats {
    let articles = published_articles(all, include_drafts);
    let mut categories = BTreeMap::new();
    let mut tags = BTreeMap::new();

    for article in &articles {
        if let Some(category) = article.category.as_ref() {
            *categories.entry(category.clone()).or_insert(0) += 1;
        }
        for tag in &article.tags {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    BlogStats {
        total_posts: articles.len(),
        featured_posts: articles.iter().filter(|a| a.featured).count(),
        categories,
        tags,
        latest_post_date: articles.iter().map(|a| a.date).max(),
    }
}

/// `"ai-assistant-kpis/index.md"` → `"/blog/ai-assistant-kpis"`.
pub fn post_url(post_id: &str) -> String {
    let clean = post_id.replacen("/index.md", "", 1);
    format!("{BLOG_URL_PREFIX}{clean}")
}
