use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaviconError {
    /// The target could not be parsed as a URL after normalization.
    #[error("invalid URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// A built-in scan pattern failed to compile.
    #[error("invalid icon pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type FaviconResult<T> = Result<T, FaviconError>;
