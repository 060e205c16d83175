use std::path::PathBuf;

use blog_content::index::SEARCH_INDEX_FILE;

use crate::error::AppError;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:4321";

/// Server configuration loaded from environment variables.
///
/// Nothing is required: the index is read from `public/` next to the working
/// directory unless told otherwise, and Redis is only used when configured.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL. `None` disables response caching.
    pub redis_url: Option<String>,
    /// Directory holding `search-index.json`.
    pub public_dir: PathBuf,
    pub listen_addr: String,
}

impl Config {
    /// Optional:
    /// - `BLOG_PUBLIC_DIR` (default: "public")
    /// - `BLOG_LISTEN_ADDR` (default: "127.0.0.1:4321")
    /// - `REDIS_URL`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let listen_addr = lookup("BLOG_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        if listen_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(AppError::Config(format!(
                "BLOG_LISTEN_ADDR must be a socket address like {DEFAULT_LISTEN_ADDR}, got '{listen_addr}'"
            )));
        }

        Ok(Self {
            redis_url: lookup("REDIS_URL").filter(|url| !url.trim().is_empty()),
            public_dir: PathBuf::from(
                lookup("BLOG_PUBLIC_DIR").unwrap_or_else(|| "public".to_string()),
            ),
            listen_addr,
        })
    }

    pub fn search_index_path(&self) -> PathBuf {
        self.public_dir.join(SEARCH_INDEX_FILE)
    }
}
