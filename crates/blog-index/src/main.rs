mod build;
mod cli;
mod commands;
mod config;
mod error;

use blog_content::store::load_articles;
use blog_content::tags::TagRegistry;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::Config;

fn main() -> anyhow::Result<()> {
    // stdout carries command output; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    info!(
        content_dir = %config.content_dir.display(),
        public_dir = %config.public_dir.display(),
        words_per_minute = config.words_per_minute,
        "configuration loaded"
    );

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => {
            let report = build::run_build(&config).inspect_err(|e| {
                tracing::error!(error = %e, "index build failed");
            })?;
            info!(
                search_index = %report.artifacts.search_index_path.display(),
                suggestions_index = %report.artifacts.suggestions_index_path.display(),
                "artifacts ready"
            );
        }
        Commands::Related { id, limit } => {
            let articles = load_articles(&config.content_dir, config.words_per_minute)?;
            print_json(&commands::related(&articles, &id, limit)?)?;
        }
        Commands::Suggest {
            exclude,
            limit,
            seed,
        } => {
            let articles = load_articles(&config.content_dir, config.words_per_minute)?;
            let suggestions = match seed {
                Some(seed) => {
                    commands::suggest(&articles, exclude.as_deref(), limit, &mut StdRng::seed_from_u64(seed))
                }
                None => commands::suggest(&articles, exclude.as_deref(), limit, &mut rand::thread_rng()),
            };
            print_json(&suggestions)?;
        }
        Commands::Stats { include_drafts } => {
            let articles = load_articles(&config.content_dir, config.words_per_minute)?;
            let registry = TagRegistry::builtin();
            print_json(&commands::stats(&articles, include_drafts, &registry))?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), error::AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
