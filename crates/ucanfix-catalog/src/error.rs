use thiserror::Error;

/// Fatal batch-generation errors. There is no retry or recovery path:
/// fixtures already emitted before the failure stand as a partial corpus.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Token assembly or key handling failed.
    #[error("token assembly failed: {0}")]
    Token(#[from] ucanfix_token::TokenError),
    /// Fixture serialization failed.
    #[error("fixture serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
