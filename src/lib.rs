//! # sheetsplit - CSV reports to grouped multi-sheet Excel workbooks
//!
//! sheetsplit reads CSV files from a cloud storage bucket, partitions each
//! file's rows by the distinct values of a configured grouping column, and
//! writes back one `.xlsx` workbook per file: one sheet per distinct value
//! plus a trailing `Total` sheet with every row.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Bucket CSV  │────▶│   Parser    │────▶│  Transform  │────▶│ Bucket xlsx │
//! │ (prefix/*)  │     │ (auto-enc)  │     │ (split+wb)  │     │ (overwrite) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sheetsplit::transform::convert_bytes;
//!
//! let conversion = convert_bytes(csv_bytes, "Last_Transaction_Date_Range")?;
//! std::fs::write("report.xlsx", &conversion.bytes)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Tabular data model (Dataset, CellValue)
//! - [`parser`] - CSV parsing with auto-detection
//! - [`transform`] - Sanitizer, splitter, workbook builder, pipeline
//! - [`storage`] - Object storage access
//! - [`batch`] - The enumerate/download/convert/upload loop
//! - [`config`] - Explicit service configuration
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Storage
pub mod storage;

// Orchestration
pub mod batch;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    BatchError, ConfigError, ConvertError, CsvError, ServerError, StorageError, TransformError,
};

// =============================================================================
// Re-exports - Data model
// =============================================================================

pub use models::{CellValue, Dataset};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{decode_content, detect_delimiter, detect_encoding, parse_bytes_auto, ParseResult};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    assign_sheet_names, build_workbook, convert_bytes, convert_file, sanitize_sheet_name,
    split_by_column, Conversion, CsvInfo, RowGroup, SheetInfo, ALL_RECORDS_SHEET,
};

// =============================================================================
// Re-exports - Storage & Batch
// =============================================================================

pub use batch::{derive_output_key, run_batch, BatchOptions, BatchSummary, ProcessedFile};
pub use storage::BlobStore;

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::AppConfig;

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, ProcessResponse, ResponseMetadata};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
