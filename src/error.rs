//! Error types for the sheetsplit conversion pipeline.
//!
//! This module defines one error type per layer:
//!
//! - [`ConfigError`] - startup configuration errors
//! - [`CsvError`] - CSV decoding/parsing errors
//! - [`TransformError`] - grouping and workbook serialization errors
//! - [`StorageError`] - object storage access errors
//! - [`ConvertError`] - per-file conversion errors
//! - [`BatchError`] - batch orchestration errors
//! - [`ServerError`] - HTTP server errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while assembling the service configuration at startup.
///
/// These are fatal: the service refuses to start rather than failing on the
/// first request.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Storage credentials are not configured.
    #[error("Missing GOOGLE_APPLICATION_CREDENTIALS environment variable")]
    MissingCredentials,

    /// No bucket configured.
    #[error("Missing SHEETSPLIT_BUCKET environment variable")]
    MissingBucket,

    /// Port value is not a valid TCP port.
    #[error("Invalid SHEETSPLIT_PORT value: {0}")]
    InvalidPort(String),
}

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors while decoding and parsing source CSV bytes.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read a local file (CLI convert path).
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Bytes could not be decoded to text.
    #[error("Failed to decode content as {encoding}: {message}")]
    EncodingError { encoding: String, message: String },

    /// Structurally invalid CSV content.
    #[error("Invalid CSV at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Empty file.
    #[error("CSV content is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No header row found in CSV")]
    NoHeaders,
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors while partitioning rows and building the output workbook.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The configured grouping column is absent from the file.
    #[error("Grouping column '{column}' not found (columns: {available})")]
    ColumnNotFound { column: String, available: String },

    /// The spreadsheet writer failed while assembling the workbook.
    #[error("Workbook serialization failed: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors talking to object storage. Never retried; the batch aborts.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Client authentication failed.
    #[error("Storage authentication failed: {0}")]
    Auth(String),

    /// Listing objects under a prefix failed.
    #[error("Failed to list objects under '{prefix}': {message}")]
    List { prefix: String, message: String },

    /// Downloading an object failed.
    #[error("Failed to download '{object}': {message}")]
    Download { object: String, message: String },

    /// Uploading an object failed.
    #[error("Failed to upload '{object}': {message}")]
    Upload { object: String, message: String },
}

// =============================================================================
// Conversion Errors (one file)
// =============================================================================

/// Errors converting a single CSV payload into a workbook.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Grouping or serialization error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Local file IO error (CLI convert path).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// =============================================================================
// Batch Errors (top-level)
// =============================================================================

/// Top-level batch orchestration errors.
///
/// This is the main error type returned by [`crate::batch::run_batch`]. The
/// first failure aborts the remainder of the batch and carries enough context
/// to name the failing object.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Storage access error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A source object failed to convert.
    #[error("Failed to convert '{object}': {source}")]
    Convert {
        object: String,
        #[source]
        source: ConvertError,
    },
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Batch error.
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    /// Storage error outside the batch itself (e.g. client construction).
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for CSV parsing.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for single-file conversion.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> ConvertError -> BatchError
        let csv_err = CsvError::EmptyFile;
        let convert_err: ConvertError = csv_err.into();
        let batch_err = BatchError::Convert {
            object: "in/a.csv".into(),
            source: convert_err,
        };
        assert!(batch_err.to_string().contains("in/a.csv"));
        assert!(batch_err.to_string().contains("empty"));

        // StorageError -> BatchError -> ServerError
        let storage_err = StorageError::Download {
            object: "in/b.csv".into(),
            message: "404".into(),
        };
        let batch_err: BatchError = storage_err.into();
        let server_err: ServerError = batch_err.into();
        assert!(server_err.to_string().contains("in/b.csv"));
    }

    #[test]
    fn test_column_not_found_names_columns() {
        let err = TransformError::ColumnNotFound {
            column: "Region".into(),
            available: "a, b, c".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'Region'"));
        assert!(msg.contains("a, b, c"));
    }
}
