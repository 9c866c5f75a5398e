/// Convenience result type used across Borealis.
pub type BorealisResult<T> = Result<T, BorealisError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Runtime media failures (`Media`) are the only class the scene anticipates;
/// the compositor catches and logs them instead of propagating (the backdrop
/// is best-effort). Everything else is construction-time.
#[derive(thiserror::Error, Debug)]
pub enum BorealisError {
    /// Invalid user-provided configuration or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while probing or decoding media sources.
    #[error("media error: {0}")]
    Media(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BorealisError {
    /// Build a [`BorealisError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BorealisError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`BorealisError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
