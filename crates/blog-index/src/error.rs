use blog_content::error::ContentError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("config error: {0}")]
    Config(String),

    #[error("article not found: {0}")]
    NotFound(String),

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}
