//! Read-only commands over the article store: related, suggest, stats.

use std::collections::BTreeMap;

use blog_content::listing::{blog_stats, BlogStats};
use blog_content::model::{Article, RelatedArticle};
use blog_content::related::related_articles;
use blog_content::suggestions::random_suggestions;
use blog_content::tags::{TagColor, TagRegistry};
use rand::Rng;
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionView {
    pub id: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    #[serde(flatten)]
    pub stats: BlogStats,
    pub category_colors: BTreeMap<String, TagColor>,
}

pub fn related(articles: &[Article], id: &str, limit: usize) -> Result<Vec<RelatedArticle>, AppError> {
    let current = articles
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    Ok(related_articles(current, articles, limit))
}

pub fn suggest<R: Rng + ?Sized>(
    articles: &[Article],
    exclude: Option<&str>,
    limit: usize,
    rng: &mut R,
) -> Vec<SuggestionView> {
    random_suggestions(articles, exclude, limit, rng)
        .into_iter()
        .map(|a| SuggestionView {
            id: a.id.clone(),
            title: a.title.clone(),
            url: a.url(),
        })
        .collect()
}

pub fn stats(articles: &[Article], include_drafts: bool, registry: &TagRegistry) -> StatsView {
    let stats = blog_stats(articles, include_drafts);
    let category_colors = stats
        .categories
        .keys()
        .map(|category| (category.clone(), registry.category_color(category)))
        .collect();
    StatsView {
        stats,
        category_colors,
    }
}
