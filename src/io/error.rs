//! Error types and path context for extraction operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all extraction operations
#[derive(Debug)]
pub enum ExtractionError {
    /// Failed to load a tile or reference image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A line of an assignment file could not be parsed
    MalformedAssignment {
        /// 1-based line number in the source file
        line: usize,
        /// Description of what's wrong with the line
        reason: String,
    },

    /// A signature does not have the length the catalog was built with
    SignatureLength {
        /// Length shared by every catalog entry
        expected: usize,
        /// Length of the rejected signature
        actual: usize,
    },

    /// Failed to serialize the run report
    Report {
        /// Path where the report was being written
        path: PathBuf,
        /// Underlying serialization error
        source: serde_json::Error,
    },
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MalformedAssignment { line, reason } => {
                write!(f, "Malformed assignment on line {line}: {reason}")
            }
            Self::SignatureLength { expected, actual } => {
                write!(
                    f,
                    "Signature length {actual} does not match catalog length {expected}"
                )
            }
            Self::Report { path, source } => {
                write!(f, "Failed to write report '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExtractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Report { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for extraction results
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Attaches the offending path to bare I/O and image errors
pub trait WithPath<T> {
    /// Replace the unknown path of a converted error with `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<ExtractionError>,
{
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|e| match e.into() {
            ExtractionError::FileSystem { source, .. } => ExtractionError::FileSystem {
                path: path.to_path_buf(),
                operation,
                source,
            },
            ExtractionError::ImageLoad { source, .. } => ExtractionError::ImageLoad {
                path: path.to_path_buf(),
                source,
            },
            ExtractionError::Report { source, .. } => ExtractionError::Report {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

impl From<image::ImageError> for ExtractionError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for ExtractionError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for ExtractionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Report {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ExtractionError {
    ExtractionError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a malformed assignment error for a 1-based line number
pub fn malformed_assignment(line: usize, reason: &impl ToString) -> ExtractionError {
    ExtractionError::MalformedAssignment {
        line,
        reason: reason.to_string(),
    }
}
