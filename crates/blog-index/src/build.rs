/// Full index build: load the article store, rebuild the index from scratch,
/// write both artifacts. There is no incremental mode; a failed build leaves
/// the previous artifacts in place.
use blog_content::index::{build_search_index, write_index_artifacts, IndexArtifacts};
use blog_content::store::load_articles;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;

#[derive(Debug)]
pub struct BuildReport {
    pub articles: usize,
    pub drafts: usize,
    pub artifacts: IndexArtifacts,
}

pub fn run_build(config: &Config) -> Result<BuildReport, AppError> {
    info!(content_dir = %config.content_dir.display(), "starting index build");

    let articles = load_articles(&config.content_dir, config.words_per_minute)?;
    let drafts = articles.iter().filter(|a| a.draft).count();

    let entries = build_search_index(&articles);
    let artifacts = write_index_artifacts(&config.public_dir, &entries)?;

    info!(
        articles = articles.len(),
        drafts,
        indexed = artifacts.search_entries,
        "index build complete"
    );

    Ok(BuildReport {
        articles: articles.len(),
        drafts,
        artifacts,
    })
}
