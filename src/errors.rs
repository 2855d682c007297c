//! Centralized error handling for era5_nc2bin
//!
//! Every failure in a conversion run is fatal: errors carry the path of the
//! file being processed so the caller can see which month the run stopped at.

use std::fmt;
use std::path::PathBuf;

/// Main error type for conversion operations
#[derive(Debug)]
pub enum ConvertError {
    /// Input dataset missing, unreadable or not a valid NetCDF container
    DatasetOpen {
        path: PathBuf,
        source: netcdf::Error,
    },

    /// Requested field absent from an otherwise valid dataset
    FieldNotFound { field: String, path: PathBuf },

    /// Output file could not be created or written
    IoWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Raw dump could not be read back
    IoRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Field has a non-numeric NetCDF type
    UnsupportedType { field: String, vartype: String },

    /// start year after end year
    InvalidYearRange { start: i32, end: i32 },

    /// Year/month pair outside the calendar
    InvalidDate { year: i32, month: u32 },

    /// Raw dump length does not match the requested shape
    ShapeMismatch {
        path: PathBuf,
        expected_bytes: u64,
        actual_bytes: u64,
    },

    /// Raw dump differs from its source dataset
    VerifyMismatch { path: PathBuf, detail: String },

    /// NetCDF library errors outside of opening a dataset
    NetCDFError(netcdf::Error),

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::DatasetOpen { path, source } => {
                write!(f, "Failed to open dataset '{}': {}", path.display(), source)
            }
            ConvertError::FieldNotFound { field, path } => {
                write!(f, "Field '{}' not found in '{}'", field, path.display())
            }
            ConvertError::IoWrite { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }
            ConvertError::IoRead { path, source } => {
                write!(f, "Failed to read '{}': {}", path.display(), source)
            }
            ConvertError::UnsupportedType { field, vartype } => {
                write!(f, "Field '{}' has unsupported type {}", field, vartype)
            }
            ConvertError::InvalidYearRange { start, end } => {
                write!(f, "Invalid year range: start {} is after end {}", start, end)
            }
            ConvertError::InvalidDate { year, month } => {
                write!(f, "Invalid date: {}-{:02}", year, month)
            }
            ConvertError::ShapeMismatch {
                path,
                expected_bytes,
                actual_bytes,
            } => write!(
                f,
                "'{}' holds {} bytes, expected {}",
                path.display(),
                actual_bytes,
                expected_bytes
            ),
            ConvertError::VerifyMismatch { path, detail } => {
                write!(f, "Verification failed for '{}': {}", path.display(), detail)
            }
            ConvertError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            ConvertError::ArrayError(e) => write!(f, "Array error: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::DatasetOpen { source, .. } => Some(source),
            ConvertError::IoWrite { source, .. } => Some(source),
            ConvertError::IoRead { source, .. } => Some(source),
            ConvertError::NetCDFError(e) => Some(e),
            ConvertError::ArrayError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<netcdf::Error> for ConvertError {
    fn from(error: netcdf::Error) -> Self {
        ConvertError::NetCDFError(error)
    }
}

impl From<ndarray::ShapeError> for ConvertError {
    fn from(error: ndarray::ShapeError) -> Self {
        ConvertError::ArrayError(error)
    }
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
