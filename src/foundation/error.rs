/// Convenience result type used across avgcolor.
pub type AvgColorResult<T> = Result<T, AvgColorError>;

/// Top-level error taxonomy used by generator APIs.
#[derive(thiserror::Error, Debug)]
pub enum AvgColorError {
    /// Invalid configuration; raised before any scene mutation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The scheduler could not find a strategy that fits the remaining items.
    #[error("scheduler invariant violation: {0}")]
    SchedulerInvariant(String),

    /// The scene host rejected a mutation.
    #[error("host mutation failure: {0}")]
    Host(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AvgColorError {
    /// Build a [`AvgColorError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`AvgColorError::SchedulerInvariant`] value.
    pub fn scheduler(msg: impl Into<String>) -> Self {
        Self::SchedulerInvariant(msg.into())
    }

    /// Build a [`AvgColorError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Build a [`AvgColorError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error was raised by configuration validation.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<serde_json::Error> for AvgColorError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
