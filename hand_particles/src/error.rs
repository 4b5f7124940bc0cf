//! Application error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("window error: {0}")]
    Window(#[from] minifb::Error),

    /// The hand detector could not be opened or stopped responding.
    #[error("hand detector error: {0}")]
    Detector(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("frame pump thread panicked")]
    PumpPanicked,
}
