//! "Related articles" ranking.
//!
//! Every published candidate other than the current article gets an additive
//! score from shared tags, a shared category, the featured flag, body
//! similarity and publication-date proximity. Scores never go below zero.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Article, RelatedArticle};

pub const DEFAULT_MAX_RELATED: usize = 3;

const SHARED_TAG_WEIGHT: f64 = 10.0;
const SAME_CATEGORY_WEIGHT: f64 = 15.0;
const FEATURED_WEIGHT: f64 = 5.0;
const CONTENT_SIMILARITY_WEIGHT: f64 = 2.0;
const STALE_PENALTY: f64 = 5.0;
const RECENT_BONUS: f64 = 3.0;
const STALE_AFTER_DAYS: f64 = 365.0;
const RECENT_WITHIN_DAYS: f64 = 30.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Top `max_results` published articles most related to `current`.
pub fn related_articles(
    current: &Article,
    all_articles: &[Article],
    max_results: usize,
) -> Vec<RelatedArticle> {
    let mut scored: Vec<RelatedArticle> = all_articles
        .iter()
        .filter(|candidate| !candidate.draft && candidate.id != current.id)
        .map(|candidate| RelatedArticle::from_article(candidate, relatedness_score(current, candidate)))
        .collect();

    scored.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    scored.truncate(max_results);
    scored
}

pub fn relatedness_score(current: &Article, candidate: &Article) -> f64 {
    let mut score = shared_tag_count(&current.tags, &candidate.tags) as f64 * SHARED_TAG_WEIGHT;

    if same_category(current.category.as_deref(), candidate.category.as_deref()) {
        score += SAME_CATEGORY_WEIGHT;
    }
    if candidate.featured {
        score += FEATURED_WEIGHT;
    }

    score += content_similarity(&current.body, &candidate.body) * CONTENT_SIMILARITY_WEIGHT;

    let days_apart =
        (current.date - candidate.date).num_milliseconds().abs() as f64 / MILLIS_PER_DAY;
    if days_apart > STALE_AFTER_DAYS {
        score -= STALE_PENALTY;
    }
    if days_apart < RECENT_WITHIN_DAYS {
        score += RECENT_BONUS;
    }

    score.max(0.0)
}

/// Jaccard similarity of the two bodies' word sets, in `[0, 1]`.
///
/// Two bodies without any words have similarity 0.
pub fn content_similarity(a: &str, b: &str) -> f64 {
    let normalized_a = normalize_words(a);
    let normalized_b = normalize_words(b);
    let words_a: HashSet<&str> = normalized_a.split_whitespace().collect();
    let words_b: HashSet<&str> = normalized_b.split_whitespace().collect();

    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}

fn normalize_words(text: &str) -> String {
    NON_WORD.replace_all(&text.to_lowercase(), " ").into_owned()
}

/// Tags are compared exactly; each shared tag counts once.
fn shared_tag_count(current: &[String], candidate: &[String]) -> usize {
    let current: HashSet<&str> = current.iter().map(String::as_str).collect();
    let candidate: HashSet<&str> = candidate.iter().map(String::as_str).collect();
    current.intersection(&candidate).count()
}

fn same_category(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => !a.is_empty() && a == b,
        _ => false,
    }
}
