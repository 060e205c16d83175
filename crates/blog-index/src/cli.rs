use clap::{Parser, Subcommand};

use blog_content::related::DEFAULT_MAX_RELATED;
use blog_content::suggestions::DEFAULT_MAX_SUGGESTIONS;

#[derive(Parser)]
#[command(name = "blog-index", version, about = "Build and inspect the blog search index")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild search-index.json and suggestions-index.json (default).
    Build,
    /// Print the articles most related to one article as JSON.
    Related {
        /// Article id, e.g. "ai-assistant-kpis".
        id: String,
        #[arg(long, default_value_t = DEFAULT_MAX_RELATED)]
        limit: usize,
    },
    /// Print random article suggestions as JSON.
    Suggest {
        /// Article id to leave out (usually the page being rendered).
        #[arg(long)]
        exclude: Option<String>,
        #[arg(long, default_value_t = DEFAULT_MAX_SUGGESTIONS)]
        limit: usize,
        /// Seed for a reproducible pick.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print post, category and tag counts as JSON.
    Stats {
        #[arg(long)]
        include_drafts: bool,
    },
}
