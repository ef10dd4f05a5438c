use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// An input value is outside its allowed range or shape.
    ///
    /// Raised eagerly when an object or a request is built, never from
    /// inside the solver.
    #[error("invalid input: {message}")]
    Validation { message: String },

    /// A value does not have the capability required at this position,
    /// e.g. a window material used as an opaque construction layer.
    #[error("expected {expected}, got {found}")]
    Type { expected: String, found: String },

    /// A named material or construction could not be resolved.
    #[error("failed to find {name} in {source_name}")]
    Lookup { name: String, source_name: String },

    /// The thermal network produced a non-positive or non-finite value.
    #[error("thermal computation failed: {message}")]
    Computation { message: String },

    /// An IDF text record is malformed.
    #[error("malformed IDF record: {message}")]
    IdfParse { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn computation(message: impl Into<String>) -> Self {
        Self::Computation {
            message: message.into(),
        }
    }

    pub(crate) fn lookup(name: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self::Lookup {
            name: name.into(),
            source_name: source_name.into(),
        }
    }

    pub(crate) fn idf(message: impl Into<String>) -> Self {
        Self::IdfParse {
            message: message.into(),
        }
    }

    /// True for failures that batch extraction treats as "not an opaque record".
    pub fn is_unresolved_record(&self) -> bool {
        matches!(self, Self::Lookup { .. } | Self::Type { .. })
    }
}

/// Checks that `value` lies in the closed interval `[min, max]`.
pub(crate) fn ensure_in_range(value: f64, min: f64, max: f64, what: &str) -> Result<f64> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(Error::validation(format!(
            "{what} must be between {min} and {max}, got {value}"
        )))
    }
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn ensure_positive(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::validation(format!(
            "{what} must be greater than 0, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_in_range() {
        assert!(ensure_in_range(0.5, 0.0, 1.0, "absorptance").is_ok());
        assert!(ensure_in_range(0.0, 0.0, 1.0, "absorptance").is_ok());
        assert!(ensure_in_range(1.0, 0.0, 1.0, "absorptance").is_ok());
        assert!(ensure_in_range(1.01, 0.0, 1.0, "absorptance").is_err());
        assert!(ensure_in_range(f64::NAN, 0.0, 1.0, "absorptance").is_err());
    }

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive(1e-6, "height").is_ok());
        assert!(ensure_positive(0.0, "height").is_err());
        assert!(ensure_positive(-1.0, "height").is_err());
        assert!(ensure_positive(f64::INFINITY, "height").is_err());
    }

    #[test]
    fn test_error_messages() {
        let e = Error::lookup("Generic Brick", "IDF materials");
        assert_eq!(e.to_string(), "failed to find Generic Brick in IDF materials");
        assert!(e.is_unresolved_record());

        let e = Error::validation("too many layers");
        assert_eq!(e.to_string(), "invalid input: too many layers");
        assert!(!e.is_unresolved_record());
    }
}
