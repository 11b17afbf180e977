//! Service configuration.
//!
//! Everything the batch and the server need is collected into one explicit
//! [`AppConfig`] at startup and passed by value from there on; no module
//! reads the process environment on its own. `.env` files are honored by the
//! CLI entry point via dotenvy before this module runs.

use crate::batch::BatchOptions;
use crate::error::ConfigError;

/// Default key prefix for source CSV objects.
pub const DEFAULT_INPUT_PREFIX: &str = "2024-November";

/// Default key prefix for output workbooks.
pub const DEFAULT_OUTPUT_PREFIX: &str = "2024-November-Processed";

/// Default grouping column.
pub const DEFAULT_GROUP_COLUMN: &str = "Last_Transaction_Date_Range";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Resolved service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Storage bucket holding both source and output objects.
    pub bucket: String,
    /// Key prefix to enumerate source CSVs under.
    pub input_prefix: String,
    /// Key prefix to write workbooks under.
    pub output_prefix: String,
    /// Column whose distinct values become sheets.
    pub group_column: String,
    /// HTTP listen port.
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Fails fast on startup misconfiguration: missing credentials or bucket
    /// prevent the service from coming up at all.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// The indirection keeps tests free of process-environment mutation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // The storage SDK resolves the credentials itself; all we own is
        // failing at startup instead of on the first request.
        if present("GOOGLE_APPLICATION_CREDENTIALS").is_none() {
            return Err(ConfigError::MissingCredentials);
        }

        let bucket = present("SHEETSPLIT_BUCKET").ok_or(ConfigError::MissingBucket)?;

        let port = match present("SHEETSPLIT_PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
        };

        Ok(Self {
            bucket,
            input_prefix: present("SHEETSPLIT_INPUT_PREFIX")
                .unwrap_or_else(|| DEFAULT_INPUT_PREFIX.to_string()),
            output_prefix: present("SHEETSPLIT_OUTPUT_PREFIX")
                .unwrap_or_else(|| DEFAULT_OUTPUT_PREFIX.to_string()),
            group_column: present("SHEETSPLIT_GROUP_COLUMN")
                .unwrap_or_else(|| DEFAULT_GROUP_COLUMN.to_string()),
            port,
        })
    }

    /// The slice of this configuration the batch loop needs.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            input_prefix: self.input_prefix.clone(),
            output_prefix: self.output_prefix.clone(),
            group_column: self.group_column.clone(),
        }
    }
}
