//! Error types for blink_view

use thiserror::Error;

/// Errors that can occur while building or rendering a blink view
///
/// None of these escape the component boundary: `BlinkView` logs them and
/// degrades instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlinkError {
    /// Delay was negative, NaN or infinite
    #[error("invalid blink delay: {0}ms")]
    InvalidDelay(f32),

    /// The animation scheduler was dropped before the view was created
    #[error("animation scheduler is no longer running")]
    SchedulerUnavailable,

    /// Custom element type not present in the registry
    #[error("unknown element type: {0}")]
    UnknownElement(String),

    /// Element type cannot be wrapped by the animated wrapper
    #[error("element type cannot be animated: {0}")]
    NotAnimatable(String),

    /// The view failed to construct and has no animation state
    #[error("blink view has no animation state")]
    Uninitialized,

    /// Configuration could not be parsed
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for BlinkError {
    fn from(err: toml::de::Error) -> Self {
        BlinkError::Config(err.to_string())
    }
}

/// Result type for blink_view operations
pub type Result<T> = std::result::Result<T, BlinkError>;
