//! Input Handling Error Types

use thiserror::Error;

/// Result type for input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Input module error types
#[derive(Error, Debug)]
pub enum InputError {
    /// Global listener could not be set up (missing permission,
    /// no display connection). Reported once; the engine stays inert.
    #[error("Listener setup failed: {0}")]
    ListenerSetup(String),

    /// Current pointer position could not be sampled this tick
    #[error("Pointer position unavailable: {0}")]
    PositionQuery(String),

    /// Synthetic scroll injection failed
    #[error("Scroll injection failed: {0}")]
    Injection(String),

    /// Portal remote desktop error
    #[error("Portal remote desktop error: {0}")]
    Portal(String),

    /// Event channel closed (listener thread gone)
    #[error("Button event channel closed")]
    ChannelClosed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InputError {
    /// Whether the error is expected to clear on a later tick.
    ///
    /// Transient failures are swallowed by the tick loop; the fixed
    /// cadence itself is the retry mechanism.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            InputError::PositionQuery(_) | InputError::Injection(_) | InputError::Portal(_)
        )
    }
}
