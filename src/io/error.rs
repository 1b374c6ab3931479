//! Error types and context management for stimulus rendering operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all stimulus operations
#[derive(Debug)]
pub enum StimulusError {
    /// Variation identifier outside the catalog range
    NotFound {
        /// Requested variation identifier
        variation_id: usize,
        /// Number of variations in the catalog
        count: usize,
    },

    /// Cached backdrop tile is absent and regeneration is disabled
    MissingAsset {
        /// Expected location of the tile on disk
        path: PathBuf,
    },

    /// Parameter or catalog entry validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load a cached image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
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

    /// Participant record could not be encoded or decoded
    Serialization {
        /// File involved in the operation
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Rasterization produced no usable surface
    Render {
        /// Name of the rendering step that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for StimulusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound {
                variation_id,
                count,
            } => {
                write!(
                    f,
                    "Variation {variation_id} not found (catalog holds {count} variations)"
                )
            }
            Self::MissingAsset { path } => {
                write!(f, "Pattern asset '{}' is missing", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
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
            Self::Serialization { path, source } => {
                write!(
                    f,
                    "Failed to serialize record '{}': {source}",
                    path.display()
                )
            }
            Self::Render { operation, reason } => {
                write!(f, "Rendering error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for StimulusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for stimulus results
pub type Result<T> = std::result::Result<T, StimulusError>;

/// Enriches errors raised without location information
pub trait WithContext<T> {
    /// Attach the file path an I/O style error refers to
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path filled in
    fn with_path(self, path: &Path) -> Result<T>;

    /// Attach the operation a file system error happened during
    ///
    /// # Errors
    ///
    /// Propagates the original error with the operation filled in
    fn with_operation(self, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<StimulusError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors carrying a path placeholder are rewritten
            match &mut error {
                StimulusError::ImageLoad { path: p, .. }
                | StimulusError::ImageExport { path: p, .. }
                | StimulusError::FileSystem { path: p, .. }
                | StimulusError::Serialization { path: p, .. }
                | StimulusError::MissingAsset { path: p } => {
                    *p = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }

    fn with_operation(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            if let StimulusError::FileSystem { operation: op, .. } = &mut error {
                *op = operation;
            }
            error
        })
    }
}

impl From<image::ImageError> for StimulusError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for StimulusError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for StimulusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
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
) -> StimulusError {
    StimulusError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a rendering error
pub fn render_error(operation: &'static str, reason: &impl ToString) -> StimulusError {
    StimulusError::Render {
        operation,
        reason: reason.to_string(),
    }
}
