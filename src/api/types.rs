//! REST API types for the processing trigger.
//!
//! The response carries the full per-file report so a caller can see exactly
//! which workbooks were written without consulting the bucket.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::batch::{BatchSummary, ProcessedFile};
use crate::config::AppConfig;

/// Response sent after a processing run completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    /// Unique job identifier
    pub job_id: String,

    /// Status: "ok" (possibly with zero files) or "error"
    pub status: String,

    /// Converted files, in processing order
    pub files: Vec<ProcessedFile>,

    /// Metadata about the run
    pub metadata: ResponseMetadata,
}

/// Metadata about one processing run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    /// Bucket the run read from and wrote to
    pub bucket: String,

    /// Source key prefix
    pub input_prefix: String,

    /// Destination key prefix
    pub output_prefix: String,

    /// Grouping column used for sheet partitioning
    pub group_column: String,

    /// Number of files converted
    pub file_count: usize,

    /// Total data rows across all files
    pub total_data_rows: usize,

    /// RFC 3339 completion time
    pub completed_at: String,
}

impl ProcessResponse {
    /// Build the success response for a finished batch.
    pub fn from_summary(summary: BatchSummary, config: &AppConfig) -> Self {
        let total_data_rows = summary.total_data_rows();
        let file_count = summary.files.len();

        Self {
            job_id: Uuid::new_v4().to_string(),
            status: "ok".to_string(),
            files: summary.files,
            metadata: ResponseMetadata {
                bucket: config.bucket.clone(),
                input_prefix: config.input_prefix.clone(),
                output_prefix: config.output_prefix.clone(),
                group_column: config.group_column.clone(),
                file_count,
                total_data_rows,
                completed_at: Utc::now().to_rfc3339(),
            },
        }
    }
}

/// Create an error response body
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "files": [],
    })
}
