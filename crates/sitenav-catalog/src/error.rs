use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Bad or missing input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record carries the requested name.
    #[error("website not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] sitenav_store::StoreError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
