// error.rs - Error types for the simulation core

use thiserror::Error;

/// Rejected settings. Raised before any display is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("seed density {0} must be between 0.0 and 1.0")]
    InvalidDensity(f64),
    #[error("grid dimensions must be non-zero (got {height}x{width})")]
    EmptyGrid { height: usize, width: usize },
    #[error("row {row} does not have the expected width {expected}")]
    RaggedRows { row: usize, expected: usize },
    #[error("unknown pattern `{0}`")]
    UnknownPattern(String),
}

/// Failures reported by a [`crate::DisplaySink`].
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("display initialisation failed: {0}")]
    Init(String),
    #[error(
        "frame is {actual_width}x{actual_height} but the display is \
         {expected_width}x{expected_height}"
    )]
    FrameSize {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },
    #[error("display I/O failed")]
    Io(#[from] std::io::Error),
    #[error("display is no longer connected")]
    Disconnected,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error("failed to start the scheduler runtime")]
    Runtime(#[source] std::io::Error),
}
