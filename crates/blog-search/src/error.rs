use blog_content::error::ContentError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("search index not loaded")]
    IndexUnavailable,
}
