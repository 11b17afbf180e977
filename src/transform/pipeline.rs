//! High-level conversion pipeline for one CSV payload.
//!
//! Combines parsing, grouping, and workbook serialization. This layer is
//! fully synchronous and touches no storage, so it can be exercised end to
//! end in unit tests with in-memory bytes.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheetsplit::transform::convert_bytes;
//!
//! let conversion = convert_bytes(csv_bytes, "Last_Transaction_Date_Range")?;
//! println!("{} sheets", conversion.sheets.len());
//! ```

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::api::logs::{log_info, log_success};
use crate::error::ConvertError;
use crate::parser::parse_bytes_auto;
use crate::transform::splitter::split_by_column;
use crate::transform::workbook::{build_workbook, SheetInfo};

/// CSV parse metadata carried through to the API response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// A completed file conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Serialized xlsx workbook.
    pub bytes: Vec<u8>,
    /// Emitted sheets, in order; the all-records sheet is last.
    pub sheets: Vec<SheetInfo>,
    /// Source CSV metadata.
    pub csv_info: CsvInfo,
}

/// Convert CSV bytes into a multi-sheet workbook.
///
/// Steps:
/// 1. Parse the CSV with encoding/delimiter auto-detection
/// 2. Partition rows by the distinct values of `group_column`
/// 3. Serialize one sheet per group plus the trailing `Total` sheet
pub fn convert_bytes(bytes: &[u8], group_column: &str) -> Result<Conversion, ConvertError> {
    let parsed = parse_bytes_auto(bytes)?;
    log_info(format!(
        "Parsed {} rows ({} columns, {} encoded)",
        parsed.dataset.row_count(),
        parsed.dataset.headers.len(),
        parsed.encoding
    ));

    let groups = split_by_column(&parsed.dataset, group_column)?;
    log_info(format!(
        "{} distinct '{}' value(s)",
        groups.len(),
        group_column
    ));

    let csv_info = CsvInfo {
        encoding: parsed.encoding,
        delimiter: parsed.delimiter,
        headers: parsed.dataset.headers.clone(),
        row_count: parsed.dataset.row_count(),
    };

    let (bytes, sheets) = build_workbook(&parsed.dataset, &groups)?;
    log_success(format!(
        "Workbook built: {} sheet(s), {} bytes",
        sheets.len(),
        bytes.len()
    ));

    Ok(Conversion {
        bytes,
        sheets,
        csv_info,
    })
}

/// Convert a local CSV file into a local xlsx file (CLI debug path).
pub fn convert_file(
    input: &Path,
    output: &Path,
    group_column: &str,
) -> Result<Conversion, ConvertError> {
    let bytes = fs::read(input)?;
    let conversion = convert_bytes(&bytes, group_column)?;
    fs::write(output, &conversion.bytes)?;
    Ok(conversion)
}
