use crate::types::BoxError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Backend I/O or query failure. The source error is kept as-is.
    #[error("Storage error: {0}")]
    Storage(#[source] BoxError),
}

impl CoreError {
    /// Wrap a backend error without altering it.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CoreError::Storage(Box::new(err))
    }
}
