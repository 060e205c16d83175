use std::path::PathBuf;

use blog_content::reading_time::DEFAULT_WORDS_PER_MINUTE;

use crate::error::AppError;

/// Build configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the Markdown article tree.
    pub content_dir: PathBuf,
    /// Directory receiving `search-index.json` and `suggestions-index.json`.
    pub public_dir: PathBuf,
    pub words_per_minute: usize,
}

impl Config {
    /// Required:
    /// - `BLOG_CONTENT_DIR`
    ///
    /// Optional:
    /// - `BLOG_PUBLIC_DIR` (default: "public")
    /// - `BLOG_WORDS_PER_MINUTE` (default: 120)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let content_dir = lookup("BLOG_CONTENT_DIR").ok_or_else(|| {
            AppError::Config("BLOG_CONTENT_DIR environment variable is required".to_string())
        })?;
        let content_dir = PathBuf::from(content_dir);
        if !content_dir.is_dir() {
            return Err(AppError::Config(format!(
                "content directory not found: {}",
                content_dir.display()
            )));
        }

        let public_dir = lookup("BLOG_PUBLIC_DIR").unwrap_or_else(|| "public".to_string());

        let words_per_minute = match lookup("BLOG_WORDS_PER_MINUTE") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "BLOG_WORDS_PER_MINUTE must be a positive integer, got '{raw}'"
                    ))
                })?,
            None => DEFAULT_WORDS_PER_MINUTE,
        };

        Ok(Self {
            content_dir,
            public_dir: PathBuf::from(public_dir),
            words_per_minute,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: HashMap<&'static str, String>) -> impl Fn(&str) -> Option<String> {
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn requires_content_dir() {
        let err = Config::from_lookup(lookup(HashMap::new())).unwrap_err();
        assert!(err.to_string().contains("BLOG_CONTENT_DIR"));
    }

    #[test]
    fn applies_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vars = HashMap::from([("BLOG_CONTENT_DIR", dir.path().display().to_string())]);
        let config = Config::from_lookup(lookup(vars)).expect("config");
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.words_per_minute, 120);
    }

    #[test]
    fn rejects_bad_reading_rate() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vars = HashMap::from([
            ("BLOG_CONTENT_DIR", dir.path().display().to_string()),
            ("BLOG_WORDS_PER_MINUTE", "0".to_string()),
        ]);
        assert!(matches!(
            Config::from_lookup(lookup(vars)),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn rejects_missing_content_dir() {
        let vars = HashMap::from([("BLOG_CONTENT_DIR", "/definitely/not/here".to_string())]);
        assert!(Config::from_lookup(lookup(vars)).is_err());
    }
}
