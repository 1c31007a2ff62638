//! Why a piece of request input was refused

use std::fmt;

/// Input rejected by one of the model constructors
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Blank where a value is required
    Empty { field: &'static str },

    /// Over the field's size cap (characters or bytes, per field)
    TooLong { field: &'static str, max: usize },

    /// Present but malformed (email shape, path id)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => write!(f, "{} is too long (limit {})", field, max),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}
