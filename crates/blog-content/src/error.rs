/// Errors raised while loading articles or reading and writing index artifacts.
///
/// Missing optional front matter fields are not errors; they fall back to the
/// defaults documented on [`crate::model::Article`].
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid front matter in {}: {message}", path.display())]
    FrontMatter { path: PathBuf, message: String },

    #[error("invalid article {}: {message}", path.display())]
    InvalidArticle { path: PathBuf, message: String },

    #[error("invalid date '{value}' in {}", path.display())]
    InvalidDate { path: PathBuf, value: String },

    #[error("duplicate article id '{id}' ({})", path.display())]
    DuplicateId { id: String, path: PathBuf },

    #[error("json error at {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
