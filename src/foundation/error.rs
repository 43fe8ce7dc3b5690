/// Convenience result type used across Framesmith.
pub type FramesmithResult<T> = Result<T, FramesmithError>;

/// Top-level error taxonomy used by engine APIs.
///
/// The `Geometry`, `AssetLoad`, `Configuration` and `Scheduler` classes are recoverable: the
/// engine logs them and degrades to a visual fallback instead of handing them to the host.
#[derive(thiserror::Error, Debug)]
pub enum FramesmithError {
    /// A reveal/border configuration would produce a non-positive layer.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Artwork bytes could not be loaded or decoded.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// A material index does not exist in the loaded catalog.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A frame callback arrived for a cancelled or torn-down scheduler.
    #[error("scheduler error: {0}")]
    Scheduler(String),

    /// Invalid caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised while executing a draw plan.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramesmithError {
    /// Build a [`FramesmithError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`FramesmithError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`FramesmithError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`FramesmithError::Scheduler`] value.
    pub fn scheduler(msg: impl Into<String>) -> Self {
        Self::Scheduler(msg.into())
    }

    /// Build a [`FramesmithError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramesmithError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FramesmithError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for the classes the engine recovers from locally.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Geometry(_) | Self::AssetLoad(_) | Self::Configuration(_) | Self::Scheduler(_)
        )
    }
}

impl From<serde_json::Error> for FramesmithError {
    fn from(value: serde_json::Error) -> Self {
        Self::serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
