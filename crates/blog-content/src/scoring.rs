//! Lexical relevance of an index entry for a search query.
//!
//! | match                              | points   |
//! |------------------------------------|----------|
//! | title contains query               | 10       |
//! | description contains query         | 5        |
//! | each tag containing query          | 3 each   |
//! | category contains query            | 2        |
//! | each occurrence in content         | 1 each   |
//! | featured article                   | 1        |
//!
//! Every comparison is a case-insensitive literal substring test.

use crate::model::SearchIndexEntry;

const TITLE_WEIGHT: u32 = 10;
const DESCRIPTION_WEIGHT: u32 = 5;
const TAG_WEIGHT: u32 = 3;
const CATEGORY_WEIGHT: u32 = 2;
const CONTENT_OCCURRENCE_WEIGHT: u32 = 1;
const FEATURED_BONUS: u32 = 1;

/// Score `entry` against an already lower-cased query.
pub fn relevance_score(entry: &SearchIndexEntry, query_lower: &str) -> u32 {
    let mut score = 0;

    if entry.title.to_lowercase().contains(query_lower) {
        score += TITLE_WEIGHT;
    }
    if entry.description.to_lowercase().contains(query_lower) {
        score += DESCRIPTION_WEIGHT;
    }

    let tag_matches = entry
        .tags
        .iter()
        .filter(|tag| tag.to_lowercase().contains(query_lower))
        .count() as u32;
    score += tag_matches * TAG_WEIGHT;

    if entry.category.to_lowercase().contains(query_lower) {
        score += CATEGORY_WEIGHT;
    }

    let occurrences = count_occurrences(&entry.content.to_lowercase(), query_lower) as u32;
    score += occurrences * CONTENT_OCCURRENCE_WEIGHT;

    if entry.featured {
        score += FEATURED_BONUS;
    }

    score
}

/// Count literal occurrences of `needle` in `haystack`, overlaps included.
///
/// "aa" occurs twice in "aaa". An empty needle never matches.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        count += 1;
        let matched = start + pos;
        // Resume one character past the match start to allow overlaps.
        let step = haystack[matched..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);
        start = matched + step;
        if start >= haystack.len() {
            break;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::index_entry;
    use crate::test_utils::{article, ArticleFixture};

    fn entry_for(
        title: &str,
        description: &str,
        body: &str,
        tags: &[&str],
        category: Option<&str>,
    ) -> SearchIndexEntry {
        let mut a = article("post")
            .titled(title)
            .described(description)
            .with_body(body)
            .tagged(tags);
        a.category = category.map(str::to_string);
        index_entry(&a)
    }

    #[test]
    fn scores_each_location() {
        let entry = entry_for(
            "Rust tips",
            "Practical rust",
            "rust is fun. I like RUST.",
            &["Rust", "rustacean", "Go"],
            Some("Rust"),
        );
        // title 10 + description 5 + two tags 6 + category 2 + content 2
        assert_eq!(relevance_score(&entry, "rust"), 25);
    }

    #[test]
    fn featured_adds_one() {
        let plain = entry_for("Nothing", "Nothing", "nothing", &[], None);
        let mut featured = plain.clone();
        featured.featured = true;
        assert_eq!(relevance_score(&plain, "zzz"), 0);
        assert_eq!(relevance_score(&featured, "zzz"), 1);
    }

    #[test]
    fn matching_more_fields_never_lowers_score() {
        let base = entry_for("Intro", "A post", "text about kpis", &["Tech"], None);
        let with_title = entry_for("KPIs intro", "A post", "text about kpis", &["Tech"], None);
        let with_tag = entry_for("Intro", "A post", "text about kpis", &["Tech", "KPIs"], None);

        let base_score = relevance_score(&base, "kpis");
        assert!(relevance_score(&with_title, "kpis") >= base_score);
        assert!(relevance_score(&with_tag, "kpis") >= base_score);
        assert_eq!(relevance_score(&with_title, "kpis"), base_score + 10);
        assert_eq!(relevance_score(&with_tag, "kpis"), base_score + 3);
    }

    #[test]
    fn query_is_matched_literally() {
        let entry = entry_for("What a.b means", "x", "a.b then a.b but never axb", &[], None);
        // title 10 + two literal content hits; "axb" would only match as a pattern
        assert_eq!(relevance_score(&entry, "a.b"), 12);
        assert_eq!(relevance_score(&entry, "c++"), 0);
    }

    #[test]
    fn counts_overlapping_occurrences() {
        assert_eq!(count_occurrences("aaaa", "aa"), 3);
        assert_eq!(count_occurrences("banana", "ana"), 2);
        assert_eq!(count_occurrences("abc", ""), 0);
        assert_eq!(count_occurrences("", "a"), 0);
        assert_eq!(count_occurrences("año año", "ñ"), 2);
    }
}
