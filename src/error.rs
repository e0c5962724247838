use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlogError>;

#[derive(Debug, Error)]
pub enum BlogError {
    /// The posts directory is missing or cannot be listed. Nothing can be built without it.
    #[error("content directory {} is unavailable: {source}", .path.display())]
    ContentDirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("post {0} not found")]
    PostNotFound(String),

    #[error("invalid front-matter in post {id}: {reason}")]
    FrontMatterParseError { id: String, reason: String },

    #[error("post {0} has no previewable body line")]
    EmptyPostBody(String),

    #[error("invalid date {input:?}: {reason}")]
    InvalidDateInput { input: String, reason: String },

    #[error("page number has to be greater than 0, got {0}")]
    InvalidPageNumber(u32),

    #[error("error rendering markdown: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl BlogError {
    pub(crate) fn front_matter(id: &str, reason: impl ToString) -> Self {
        BlogError::FrontMatterParseError {
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_date(input: &str, reason: impl ToString) -> Self {
        BlogError::InvalidDateInput {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}
