//! Query engine over a loaded search index.
//!
//! Filters run in a fixed order: category, then tags, then free text. With a
//! text query the survivors are ranked by [`relevance_score`]; without one
//! they are ordered newest first. Both sorts are stable, so ties keep index
//! order.

use crate::model::SearchIndexEntry;
use crate::scoring::relevance_score;

pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free text; blank means "no text filter"
    pub text: Option<String>,
    /// Case-insensitive exact category; blank means "any"
    pub category: Option<String>,
    /// Comma-separated tags, matched with OR semantics
    pub tags: Option<String>,
    pub limit: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: None,
            category: None,
            tags: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchQuery {
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn tags(mut self, tags: &str) -> Self {
        self.tags = Some(tags.to_string());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Requested tags, trimmed, with blanks removed. Original casing is kept.
    pub fn tag_list(&self) -> Vec<String> {
        parse_tag_list(self.tags.as_deref().unwrap_or(""))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// Number of matches before truncation to the limit
    pub total: usize,
    pub results: Vec<SearchIndexEntry>,
}

pub fn parse_tag_list(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn run_query(index: &[SearchIndexEntry], query: &SearchQuery) -> QueryOutcome {
    let mut matches: Vec<&SearchIndexEntry> = index.iter().collect();

    if let Some(category) = non_blank(query.category.as_deref()) {
        let category = category.to_lowercase();
        matches.retain(|entry| entry.category.to_lowercase() == category);
    }

    let wanted_tags: Vec<String> = query
        .tag_list()
        .iter()
        .map(|tag| tag.to_lowercase())
        .collect();
    if !wanted_tags.is_empty() {
        matches.retain(|entry| {
            entry
                .tags
                .iter()
                .any(|tag| wanted_tags.contains(&tag.to_lowercase()))
        });
    }

    match non_blank(query.text.as_deref()) {
        Some(text) => {
            let query_lower = text.to_lowercase();
            matches.retain(|entry| text_matches(entry, &query_lower));

            let mut scored: Vec<(u32, &SearchIndexEntry)> = matches
                .into_iter()
                .map(|entry| (relevance_score(entry, &query_lower), entry))
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            matches = scored.into_iter().map(|(_, entry)| entry).collect();
        }
        None => matches.sort_by(|a, b| b.date.cmp(&a.date)),
    }

    let total = matches.len();
    let results = matches
        .into_iter()
        .take(query.limit)
        .cloned()
        .collect();

    QueryOutcome { total, results }
}

fn text_matches(entry: &SearchIndexEntry, query_lower: &str) -> bool {
    entry.search_text.contains(query_lower)
        || entry
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query_lower))
        || entry.category.to_lowercase().contains(query_lower)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_search_index;
    use crate::test_utils::{article, date, ArticleFixture};

    fn sample_index() -> Vec<SearchIndexEntry> {
        build_search_index(&[
            article("kpis")
                .titled("AI Assistant KPIs")
                .described("Measuring assistants")
                .with_body("How to measure an assistant.")
                .tagged(&["AI", "Metrics"])
                .in_category("AI")
                .dated(date(2024, 3, 1)),
            article("leadership")
                .titled("Leadership playbook")
                .described("Leading teams")
                .with_body("Teams, rituals and AI tooling. More ai ai.")
                .tagged(&["Leadership"])
                .in_category("Leadership")
                .dated(date(2024, 5, 1)),
            article("rock")
                .titled("Rock and tech")
                .described("Music meets code")
                .with_body("Guitars and servers.")
                .tagged(&["Music", "Tech"])
                .in_category("Music")
                .dated(date(2023, 11, 1)),
            article("okr")
                .titled("OKRs that work")
                .described("Goal setting")
                .with_body("Objectives.")
                .tagged(&["Leadership", "tech"])
                .in_category("Leadership")
                .dated(date(2024, 1, 15)),
        ])
    }

    fn ids(outcome: &QueryOutcome) -> Vec<&str> {
        outcome.results.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn single_article_query_example() {
        let index = build_search_index(&[article("ai-assistant-kpis").titled("AI Assistant KPIs")]);
        let query = SearchQuery::default().text("ai").category("").tags("").limit(5);
        let outcome = run_query(&index, &query);
        assert_eq!(outcome.total, 1);
        assert_eq!(ids(&outcome), vec!["ai-assistant-kpis"]);
    }

    #[test]
    fn no_text_sorts_newest_first() {
        let outcome = run_query(&sample_index(), &SearchQuery::default());
        assert_eq!(outcome.total, 4);
        assert_eq!(ids(&outcome), vec!["leadership", "kpis", "okr", "rock"]);
    }

    #[test]
    fn text_ranks_by_relevance() {
        let outcome = run_query(&sample_index(), &SearchQuery::default().text("AI"));
        // kpis: title 10 + tag 3 + category 2 = 15; leadership: content "ai" hits only
        assert_eq!(ids(&outcome), vec!["kpis", "leadership"]);
        assert_eq!(outcome.total, 2);
    }

    #[test]
    fn category_filter_is_case_insensitive_exact() {
        let outcome = run_query(&sample_index(), &SearchQuery::default().category("leadership"));
        assert_eq!(ids(&outcome), vec!["leadership", "okr"]);

        let partial = run_query(&sample_index(), &SearchQuery::default().category("Lead"));
        assert_eq!(partial.total, 0);
        assert!(partial.results.is_empty());
    }

    #[test]
    fn tag_filter_uses_or_semantics() {
        let outcome = run_query(&sample_index(), &SearchQuery::default().tags("TECH, metrics"));
        assert_eq!(ids(&outcome), vec!["kpis", "okr", "rock"]);
    }

    #[test]
    fn blank_tags_do_not_filter() {
        let outcome = run_query(&sample_index(), &SearchQuery::default().tags(" , "));
        assert_eq!(outcome.total, 4);
    }

    #[test]
    fn filters_combine_before_text() {
        let query = SearchQuery::default().category("Leadership").text("teams");
        let outcome = run_query(&sample_index(), &query);
        assert_eq!(ids(&outcome), vec!["leadership"]);
    }

    #[test]
    fn text_matches_tags_and_category() {
        let outcome = run_query(&sample_index(), &SearchQuery::default().text("music"));
        assert_eq!(ids(&outcome), vec!["rock"]);
    }

    #[test]
    fn total_counts_before_limit() {
        let index = sample_index();
        for limit in 0..6 {
            let outcome = run_query(&index, &SearchQuery::default().limit(limit));
            assert_eq!(outcome.total, 4);
            assert!(outcome.results.len() <= limit);
            assert!(outcome.total >= outcome.results.len());
        }
    }

    #[test]
    fn ties_keep_index_order() {
        let index = build_search_index(&[
            article("first").titled("Rust one").dated(date(2024, 2, 1)),
            article("second").titled("Rust two").dated(date(2024, 1, 1)),
        ]);
        let outcome = run_query(&index, &SearchQuery::default().text("rust"));
        assert_eq!(ids(&outcome), vec!["first", "second"]);
    }

    #[test]
    fn drafts_never_surface() {
        let index = build_search_index(&[
            article("public").titled("Rust"),
            article("hidden").titled("Rust secrets").draft(),
        ]);
        let outcome = run_query(&index, &SearchQuery::default().text("rust"));
        assert_eq!(ids(&outcome), vec!["public"]);
    }

    #[test]
    fn parses_tag_list() {
        assert_eq!(parse_tag_list(" AI ,Tech,, "), vec!["AI", "Tech"]);
        assert!(parse_tag_list("").is_empty());
    }
}
