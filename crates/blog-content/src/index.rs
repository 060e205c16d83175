/// Search-index construction and persistence.
///
/// The index is rebuilt from scratch on every build and written as two
/// artifacts next to each other:
/// - `search-index.json`: one [`SearchIndexEntry`] per published article
/// - `suggestions-index.json`: the [`SuggestionEntry`] projection of it
///
/// Each file is written to a sibling temp file and renamed over the target, so
/// readers see either the previous index or the new one.
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::ContentError;
use crate::model::{Article, SearchIndexEntry, SuggestionEntry};

pub const SEARCH_INDEX_FILE: &str = "search-index.json";
pub const SUGGESTIONS_INDEX_FILE: &str = "suggestions-index.json";

const MARKUP_CHARS: &[char] = &['#', '*', '`', '[', ']', '(', ')'];

/// Paths and sizes of a completed artifact write.
#[derive(Debug, Clone)]
pub struct IndexArtifacts {
    pub search_index_path: PathBuf,
    pub suggestions_index_path: PathBuf,
    pub search_entries: usize,
    pub suggestion_entries: usize,
}

/// Build the index for every non-draft article, newest first.
pub fn build_search_index(articles: &[Article]) -> Vec<SearchIndexEntry> {
    let mut entries: Vec<SearchIndexEntry> = articles
        .iter()
        .filter(|a| !a.draft)
        .map(index_entry)
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

/// Flatten a single article. Does not look at the draft flag.
pub fn index_entry(article: &Article) -> SearchIndexEntry {
    let content = normalize_content(&article.body);
    let search_text =
        format!("{} {} {}", article.title, article.description, content).to_lowercase();
    let word_count = content.split_whitespace().count();

    SearchIndexEntry {
        id: article.id.clone(),
        title: article.title.clone(),
        description: article.description.clone(),
        tags: article.tags.clone(),
        category: article.category_label().to_string(),
        author: article.author.clone(),
        date: article.date,
        reading_time: article.reading_time.clone(),
        featured: article.featured,
        url: article.url(),
        search_text,
        word_count,
        last_modified: article.last_modified(),
        content,
    }
}

/// Drop Markdown punctuation and collapse whitespace runs to single spaces.
pub fn normalize_content(body: &str) -> String {
    body.split(|c: char| MARKUP_CHARS.contains(&c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn build_suggestions_index(entries: &[SearchIndexEntry]) -> Vec<SuggestionEntry> {
    entries.iter().map(SuggestionEntry::from).collect()
}

/// Write both artifacts into `dir`, creating it if needed.
pub fn write_index_artifacts(
    dir: &Path,
    entries: &[SearchIndexEntry],
) -> Result<IndexArtifacts, ContentError> {
    std::fs::create_dir_all(dir).map_err(|e| ContentError::io(dir, e))?;

    let search_index_path = dir.join(SEARCH_INDEX_FILE);
    write_json_replacing(&search_index_path, &entries)?;
    info!(
        path = %search_index_path.display(),
        entries = entries.len(),
        "search index written"
    );

    let suggestions = build_suggestions_index(entries);
    let suggestions_index_path = dir.join(SUGGESTIONS_INDEX_FILE);
    write_json_replacing(&suggestions_index_path, &suggestions)?;
    info!(
        path = %suggestions_index_path.display(),
        entries = suggestions.len(),
        "suggestions index written"
    );

    Ok(IndexArtifacts {
        search_index_path,
        suggestions_index_path,
        search_entries: entries.len(),
        suggestion_entries: suggestions.len(),
    })
}

pub fn load_search_index(path: &Path) -> Result<Vec<SearchIndexEntry>, ContentError> {
    let json = std::fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
    parse_search_index(&json, path)
}

/// Parse an already-read `search-index.json`. `path` is only used for errors.
pub fn parse_search_index(json: &str, path: &Path) -> Result<Vec<SearchIndexEntry>, ContentError> {
    serde_json::from_str(json).map_err(|e| ContentError::json(path, e))
}

fn write_json_replacing<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ContentError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| ContentError::json(path, e))?;

    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    std::fs::write(&tmp_path, json).map_err(|e| ContentError::io(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| ContentError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{article, date, ArticleFixture};

    #[test]
    fn normalizes_markdown_body() {
        let body = "# Title\n\nSome **bold** and `code` with [link](http://x.y)\n\n\n  end  ";
        assert_eq!(
            normalize_content(body),
            "Title Some bold and code with linkhttp://x.y end"
        );
        assert_eq!(normalize_content("   \n\t"), "");
    }

    #[test]
    fn excludes_drafts_and_sorts_newest_first() {
        let articles = vec![
            article("old").dated(date(2023, 5, 1)),
            article("secret").dated(date(2025, 1, 1)).draft(),
            article("new").dated(date(2024, 9, 1)),
        ];
        let index = build_search_index(&articles);
        let ids: Vec<&str> = index.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[test]
    fn entry_fields_are_derived_from_article() {
        let a = article("ai-assistant-kpis")
            .titled("AI Assistant KPIs")
            .described("Measuring Assistants")
            .with_body("## Why\n\nMeasure *everything* twice")
            .tagged(&["AI", "Tech"]);
        let entry = index_entry(&a);

        assert_eq!(entry.url, "/blog/ai-assistant-kpis");
        assert_eq!(entry.content, "Why Measure everything twice");
        assert_eq!(
            entry.search_text,
            "ai assistant kpis measuring assistants why measure everything twice"
        );
        assert_eq!(entry.word_count, 4);
        assert_eq!(entry.category, "");
        assert_eq!(entry.last_modified, entry.date);
        assert_eq!(entry.tags, vec!["AI", "Tech"]);
    }

    #[test]
    fn empty_body_has_zero_words() {
        let entry = index_entry(&article("empty").with_body(""));
        assert_eq!(entry.word_count, 0);
        assert_eq!(entry.content, "");
    }

    #[test]
    fn writes_and_reloads_artifacts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let public = dir.path().join("public");
        let articles = vec![
            article("one").tagged(&["Tech"]).in_category("AI").featured(),
            article("two").dated(date(2024, 2, 1)),
        ];
        let entries = build_search_index(&articles);

        let artifacts = write_index_artifacts(&public, &entries).expect("write artifacts");
        assert_eq!(artifacts.search_entries, 2);
        assert_eq!(artifacts.suggestion_entries, 2);

        let reloaded = load_search_index(&artifacts.search_index_path).expect("reload");
        assert_eq!(reloaded, entries);

        let raw = std::fs::read_to_string(&artifacts.suggestions_index_path).expect("read");
        let suggestions: Vec<SuggestionEntry> = serde_json::from_str(&raw).expect("parse");
        assert_eq!(suggestions[1].id, "one");
        assert_eq!(suggestions[1].category, "AI");
        assert!(suggestions[1].featured);
        assert!(raw.contains("\n  {"), "artifacts are written indented");
        assert!(!public.join("search-index.json.tmp").exists());
    }

    #[test]
    fn rewrite_replaces_previous_index() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = build_search_index(&[article("a"), article("b")]);
        write_index_artifacts(dir.path(), &first).expect("first write");

        let second = build_search_index(&[article("c")]);
        let artifacts = write_index_artifacts(dir.path(), &second).expect("second write");
        let reloaded = load_search_index(&artifacts.search_index_path).expect("reload");
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].id, "c");
    }

    #[test]
    fn serialized_entry_uses_camel_case() {
        let entry = index_entry(&article("x"));
        let json = serde_json::to_value(&entry).expect("serialize");
        assert!(json.get("searchText").is_some());
        assert!(json.get("wordCount").is_some());
        assert!(json.get("readingTime").is_some());
        assert!(json.get("lastModified").is_some());
    }

    #[test]
    fn missing_index_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_search_index(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }
}
