/// Result alias used across the crate.
pub type ScrollworkResult<T> = Result<T, ScrollworkError>;

/// Error type for the configuration boundary.
///
/// Runtime sampling never fails: missing anchors and absent capabilities degrade the output
/// instead. Errors are only produced while parsing or validating page specs, trigger strings
/// and colors.
#[derive(thiserror::Error, Debug)]
pub enum ScrollworkError {
    /// A value violates a static invariant (duplicate id, empty range, bad viewport).
    #[error("validation error: {0}")]
    Validation(String),

    /// A textual value (trigger position, color, route) could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A timeline declaration is malformed.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollworkError {
    /// Build a [`ScrollworkError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollworkError::Parse`].
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`ScrollworkError::Timeline`].
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`ScrollworkError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
