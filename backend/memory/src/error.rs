use mimic_core::BotError;
use thiserror::Error;

/// Errors returned by a [`crate::LearnStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// No item exists for the requested `(scope, key)`.
    #[error("item not found: {scope}/{key}")]
    NotFound { scope: String, key: String },

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(scope: &str, key: &str) -> Self {
        StoreError::NotFound {
            scope: scope.to_string(),
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<StoreError> for BotError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { key, .. } => BotError::NotFound(key),
            other => BotError::Storage(other.to_string()),
        }
    }
}
