use thiserror::Error;

/// Errors surfaced by the debug overlay.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DebugError {
    /// Raised by the "Throw error" test action on the next overlay frame.
    #[error("oh no!")]
    InjectedFailure,

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("unknown debug action: {0}")]
    UnknownAction(String),

    /// Failure reported by the host editor.
    #[error("editor error: {0}")]
    Editor(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type DebugResult<T> = Result<T, DebugError>;
