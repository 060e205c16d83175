/// File-based article store.
///
/// Every `*.md` / `*.mdx` file below the content root is one article with YAML
/// front matter:
///
/// ```text
/// ---
/// title: AI Assistant KPIs
/// description: What to measure
/// date: 2024-03-01
/// tags: [AI, Tech]
/// category: AI
/// ---
/// Body in Markdown.
/// ```
///
/// The identifier is the relative path without extension; `foo/index.md`
/// becomes `foo`.
use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use gray_matter::{engine::YAML, Matter};
use serde::Deserialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::ContentError;
use crate::model::{Article, DEFAULT_AUTHOR};
use crate::reading_time::estimate_reading_time;

const ARTICLE_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Keys nothing here reads (`image`, `video`, `resources`, `relatedPosts`,
/// `seo`) are skipped by serde.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrontMatter {
    title: Option<String>,
    description: Option<String>,
    date: Option<String>,
    updated_date: Option<String>,
    tags: Option<Vec<String>>,
    category: Option<String>,
    author: Option<String>,
    featured: Option<bool>,
    draft: Option<bool>,
}

/// Load every article under `root`, in file-name order.
pub fn load_articles(root: &Path, words_per_minute: usize) -> Result<Vec<Article>, ContentError> {
    let mut articles = Vec::new();
    let mut seen = HashSet::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            ContentError::io(path, std::io::Error::other(e.to_string()))
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_article_file(path) {
            continue;
        }

        let id = article_id(root, path);
        let content = std::fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        let article = parse_article(&id, &content, path, words_per_minute)?;
        if !seen.insert(article.id.clone()) {
            return Err(ContentError::DuplicateId {
                id: article.id,
                path: path.to_path_buf(),
            });
        }
        debug!(id = %article.id, draft = article.draft, "loaded article");
        articles.push(article);
    }

    info!(
        root = %root.display(),
        articles = articles.len(),
        "article store loaded"
    );
    Ok(articles)
}

/// Parse one Markdown document into an [`Article`].
///
/// `path` is only used for error messages.
pub fn parse_article(
    id: &str,
    content: &str,
    path: &Path,
    words_per_minute: usize,
) -> Result<Article, ContentError> {
    let parsed = Matter::<YAML>::new().parse(content);
    let front_matter: FrontMatter = parsed
        .data
        .map(|data| data.deserialize::<FrontMatter>())
        .transpose()
        .map_err(|e| ContentError::FrontMatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .unwrap_or_default();

    let title = required_text(front_matter.title, "title", path)?;
    let description = required_text(front_matter.description, "description", path)?;
    let date = match front_matter.date {
        Some(value) => parse_date(&value, path)?,
        None => {
            return Err(ContentError::InvalidArticle {
                path: path.to_path_buf(),
                message: "missing 'date'".to_string(),
            })
        }
    };
    let updated_date = front_matter
        .updated_date
        .map(|value| parse_date(&value, path))
        .transpose()?;

    let body = parsed.content;
    let reading_time = estimate_reading_time(&body, words_per_minute);

    Ok(Article {
        id: id.to_string(),
        title,
        description,
        tags: front_matter.tags.unwrap_or_default(),
        category: front_matter
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        author: front_matter
            .author
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        date,
        updated_date,
        draft: front_matter.draft.unwrap_or(false),
        featured: front_matter.featured.unwrap_or(false),
        reading_time,
        body,
    })
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(value: &str, path: &Path) -> Result<DateTime<Utc>, ContentError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ContentError::InvalidDate {
            path: path.to_path_buf(),
            value: value.to_string(),
        })
}

fn required_text(value: Option<String>, field: &str, path: &Path) -> Result<String, ContentError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ContentError::InvalidArticle {
            path: path.to_path_buf(),
            message: format!("missing or empty '{field}'"),
        })
}

fn is_article_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ARTICLE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

fn article_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    let id = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    match id.strip_suffix("/index") {
        Some(parent) => parent.to_string(),
        None => id,
    }
}
