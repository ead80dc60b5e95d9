//! Error types for the channel detection pipeline

use std::fmt;

/// Errors that can occur while constructing or controlling a detector
#[derive(Debug, Clone)]
pub enum ChansiftError {
    /// Sample source could not be turned into a detector
    LoadFailure(String),

    /// Rejected write to an adjustable parameter
    ParameterOutOfRange(String),
}

impl fmt::Display for ChansiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChansiftError::LoadFailure(msg) => write!(f, "Load failure: {}", msg),
            ChansiftError::ParameterOutOfRange(msg) => write!(f, "Parameter out of range: {}", msg),
        }
    }
}

impl std::error::Error for ChansiftError {}
