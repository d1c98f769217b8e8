//! Error types for pose relativization.

use std::fmt;

/// Result type for pose operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while relativizing poses.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// An orientation quaternion cannot be used as a rotation.
    ///
    /// Raised for zero-norm (or non-finite) quaternions, which have no inverse.
    InvalidOrientation {
        /// Norm of the rejected quaternion.
        norm: f64,
    },
    /// A latitude or longitude is not a usable coordinate.
    InvalidCoordinate {
        /// Which field was rejected.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidOrientation { norm } => {
                write!(f, "invalid orientation: quaternion norm {norm} cannot be inverted")
            }
            Error::InvalidCoordinate { field, value } => {
                write!(f, "invalid {field}: {value}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::InvalidOrientation { norm: 0.0 };
        assert_eq!(
            err.to_string(),
            "invalid orientation: quaternion norm 0 cannot be inverted"
        );

        let err = Error::InvalidCoordinate {
            field: "latitude",
            value: 91.5,
        };
        assert_eq!(err.to_string(), "invalid latitude: 91.5");
    }
}
