//! Batch orchestration: the enumerate -> download -> convert -> upload loop.
//!
//! Files are processed strictly one at a time; nothing is shared between
//! iterations beyond the storage client. The first error aborts the rest of
//! the batch and propagates to the caller — there is no partial-success
//! bookkeeping and no retry.

use serde::{Deserialize, Serialize};

use crate::api::logs::{log_info, log_success, log_warning};
use crate::error::BatchError;
use crate::storage::BlobStore;
use crate::transform::pipeline::convert_bytes;

/// The configuration slice the batch loop consumes.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Key prefix holding the source CSV objects.
    pub input_prefix: String,
    /// Key prefix the workbooks are written under.
    pub output_prefix: String,
    /// Column whose distinct values become sheets.
    pub group_column: String,
}

/// One converted file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedFile {
    /// Source object key.
    pub source: String,
    /// Destination object key.
    pub destination: String,
    /// Sheets in the output workbook, including the all-records sheet.
    pub sheets: usize,
    /// Data rows in the source file.
    pub data_rows: usize,
}

/// Result of one full batch invocation.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Files converted, in processing order.
    pub files: Vec<ProcessedFile>,
}

impl BatchSummary {
    /// Total data rows across all converted files.
    pub fn total_data_rows(&self) -> usize {
        self.files.iter().map(|f| f.data_rows).sum()
    }
}

/// Derive the destination key for a source CSV object.
///
/// The input prefix is replaced with `output_prefix`, and the `.csv` suffix
/// (any case) with `.xlsx`: `in/2024/report.csv` -> `out/report.xlsx`.
pub fn derive_output_key(source_key: &str, output_prefix: &str) -> String {
    let base = source_key.rsplit('/').next().unwrap_or(source_key);
    // ".csv" is 4 ASCII bytes, so the slice below stays on a char boundary.
    let stem = if base.to_ascii_lowercase().ends_with(".csv") {
        &base[..base.len() - 4]
    } else {
        base
    };
    format!("{}/{}.xlsx", output_prefix.trim_end_matches('/'), stem)
}

/// Run one batch: convert every `.csv` object under the input prefix and
/// upload the resulting workbook under the output prefix, overwriting any
/// existing object.
pub async fn run_batch(
    store: &BlobStore,
    options: &BatchOptions,
) -> Result<BatchSummary, BatchError> {
    log_info(format!(
        "Listing CSV objects under '{}/' in bucket '{}'",
        options.input_prefix,
        store.bucket()
    ));
    let keys = store.list_csv_keys(&options.input_prefix).await?;

    if keys.is_empty() {
        log_warning("No CSV objects found; nothing to do");
        return Ok(BatchSummary::default());
    }
    log_info(format!("{} CSV file(s) to convert", keys.len()));

    let mut files = Vec::with_capacity(keys.len());
    for key in keys {
        log_info(format!("Downloading {}", key));
        let bytes = store.download(&key).await?;

        let conversion =
            convert_bytes(&bytes, &options.group_column).map_err(|source| BatchError::Convert {
                object: key.clone(),
                source,
            })?;

        let destination = derive_output_key(&key, &options.output_prefix);
        store.upload(&destination, conversion.bytes).await?;

        log_success(format!(
            "{} -> {} ({} sheets, {} rows)",
            key,
            destination,
            conversion.sheets.len(),
            conversion.csv_info.row_count
        ));
        files.push(ProcessedFile {
            source: key,
            destination,
            sheets: conversion.sheets.len(),
            data_rows: conversion.csv_info.row_count,
        });
    }

    Ok(BatchSummary { files })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output_key() {
        assert_eq!(
            derive_output_key("2024-November/report.csv", "2024-November-Processed"),
            "2024-November-Processed/report.xlsx"
        );
    }

    #[test]
    fn test_derive_output_key_nested_source() {
        assert_eq!(
            derive_output_key("in/2024/11/daily.csv", "out"),
            "out/daily.xlsx"
        );
    }

    #[test]
    fn test_derive_output_key_uppercase_extension() {
        assert_eq!(derive_output_key("in/REPORT.CSV", "out"), "out/REPORT.xlsx");
    }

    #[test]
    fn test_derive_output_key_trailing_slash_prefix() {
        assert_eq!(derive_output_key("in/a.csv", "out/"), "out/a.xlsx");
    }

    #[test]
    fn test_summary_totals() {
        let summary = BatchSummary {
            files: vec![
                ProcessedFile {
                    source: "in/a.csv".into(),
                    destination: "out/a.xlsx".into(),
                    sheets: 3,
                    data_rows: 10,
                },
                ProcessedFile {
                    source: "in/b.csv".into(),
                    destination: "out/b.xlsx".into(),
                    sheets: 2,
                    data_rows: 5,
                },
            ],
        };
        assert_eq!(summary.total_data_rows(), 15);
    }
}
