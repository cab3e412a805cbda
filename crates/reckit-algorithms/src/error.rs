use std::error::Error;
use std::fmt;

use crate::data::UserId;

/// Error type shared by every algorithm capability.
#[derive(Debug)]
pub enum AlgorithmError {
    /// A capability was requested from an algorithm that does not declare it.
    Unimplemented { operation: &'static str },
    /// The operation exists but this implementation does not support the given option.
    Unsupported { feature: &'static str },
    /// A persisted state belongs to a different algorithm type.
    StateMismatch { expected: String, found: String },
    /// Scoring failed for one user; aborts the surrounding batch.
    Scoring { user: UserId, message: String },
    Io(std::io::Error),
    Serialization(String),
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlgorithmError::Unimplemented { operation } => {
                write!(f, "Operation '{}' is not implemented by this algorithm", operation)
            }
            AlgorithmError::Unsupported { feature } => {
                write!(f, "{} is not supported by this implementation", feature)
            }
            AlgorithmError::StateMismatch { expected, found } => write!(
                f,
                "Saved state belongs to algorithm '{}', cannot load into '{}'",
                found, expected
            ),
            AlgorithmError::Scoring { user, message } => {
                write!(f, "Failed to score items for user {}: {}", user, message)
            }
            AlgorithmError::Io(e) => write!(f, "I/O error: {}", e),
            AlgorithmError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AlgorithmError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(e: std::io::Error) -> Self {
        AlgorithmError::Io(e)
    }
}

impl From<bincode::Error> for AlgorithmError {
    fn from(e: bincode::Error) -> Self {
        match *e {
            bincode::ErrorKind::Io(io) => AlgorithmError::Io(io),
            other => AlgorithmError::Serialization(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AlgorithmError>;
