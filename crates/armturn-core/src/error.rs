//! Error types for ARMTURN

use thiserror::Error;

use crate::JointType;

/// Core ARMTURN errors
#[derive(Error, Debug)]
pub enum ArmturnError {
    // Angle errors
    #[error("Frame contains no joints")]
    EmptyFrame,

    #[error("Missing joint: {0:?}")]
    MissingJoint(JointType),

    #[error("Degenerate segment: {from:?} and {to:?} coincide")]
    DegenerateSegment { from: JointType, to: JointType },

    // Encoding errors
    #[error("Buffer too short: expected {expected}, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    // Configuration errors
    #[error("Invalid bucket bounds: {0}")]
    InvalidBucketBounds(String),

    #[error("Invalid window period: {0}")]
    InvalidWindowPeriod(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Lifecycle errors
    #[error("Pipeline already running")]
    AlreadyRunning,

    #[error("Pipeline not running")]
    NotRunning,

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Result type for ARMTURN operations
pub type ArmturnResult<T> = Result<T, ArmturnError>;
