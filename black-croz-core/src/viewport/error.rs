use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors surfaced to callers of the viewport tracker.
///
/// Steady-state problems (unresolved anchors, stale or unknown events) are
/// absorbed and never show up here.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Malformed registration or configuration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The observation source refused to connect or observe.
    #[error("observation source failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TrackerError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(err))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
