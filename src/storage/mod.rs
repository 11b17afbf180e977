//! Object storage access.
//!
//! Thin wrapper over Google Cloud Storage: list CSV objects under a prefix,
//! download full object bytes, upload workbook bytes. Authentication uses
//! Application Default Credentials; the credentials path is validated by
//! [`crate::config::AppConfig`] at startup. No retries here: every failure
//! maps to a [`StorageError`] naming the object and aborts the batch.

use google_cloud_storage::client::{Client, ClientConfig};
use google_cloud_storage::http::objects::download::Range;
use google_cloud_storage::http::objects::get::GetObjectRequest;
use google_cloud_storage::http::objects::list::ListObjectsRequest;
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};

use crate::error::StorageError;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One bucket's worth of object storage.
pub struct BlobStore {
    client: Client,
    bucket: String,
}

impl BlobStore {
    /// Authenticate and bind to a bucket.
    pub async fn connect(bucket: impl Into<String>) -> Result<Self, StorageError> {
        let config = ClientConfig::default()
            .with_auth()
            .await
            .map_err(|e| StorageError::Auth(e.to_string()))?;

        Ok(Self {
            client: Client::new(config),
            bucket: bucket.into(),
        })
    }

    /// The bucket this store is bound to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// List the keys of all `.csv` objects under `prefix/`, following
    /// pagination to the end.
    pub async fn list_csv_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let folder = folder_prefix(prefix);
        let mut keys = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let request = ListObjectsRequest {
                bucket: self.bucket.clone(),
                prefix: Some(folder.clone()),
                page_token: page_token.clone(),
                ..Default::default()
            };
            let response =
                self.client
                    .list_objects(&request)
                    .await
                    .map_err(|e| StorageError::List {
                        prefix: folder.clone(),
                        message: e.to_string(),
                    })?;

            for object in response.items.unwrap_or_default() {
                if is_csv_key(&object.name) {
                    keys.push(object.name);
                }
            }

            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(keys)
    }

    /// Download an object's full byte content.
    pub async fn download(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let request = GetObjectRequest {
            bucket: self.bucket.clone(),
            object: key.to_string(),
            ..Default::default()
        };

        self.client
            .download_object(&request, &Range(None, None))
            .await
            .map_err(|e| StorageError::Download {
                object: key.to_string(),
                message: e.to_string(),
            })
    }

    /// Upload bytes to `key`, overwriting any existing object.
    pub async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let mut media = Media::new(key.to_string());
        media.content_type = XLSX_CONTENT_TYPE.into();
        media.content_length = Some(bytes.len() as u64);

        let request = UploadObjectRequest {
            bucket: self.bucket.clone(),
            ..Default::default()
        };

        self.client
            .upload_object(&request, bytes, &UploadType::Simple(media))
            .await
            .map_err(|e| StorageError::Upload {
                object: key.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}

/// Normalize a prefix into the `folder/` form used for listing.
fn folder_prefix(prefix: &str) -> String {
    format!("{}/", prefix.trim_end_matches('/'))
}

/// Only `.csv` objects are eligible source files.
fn is_csv_key(key: &str) -> bool {
    key.to_ascii_lowercase().ends_with(".csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_prefix_normalization() {
        assert_eq!(folder_prefix("2024-November"), "2024-November/");
        assert_eq!(folder_prefix("2024-November/"), "2024-November/");
    }

    #[test]
    fn test_is_csv_key() {
        assert!(is_csv_key("2024-November/report.csv"));
        assert!(is_csv_key("2024-November/REPORT.CSV"));
        assert!(!is_csv_key("2024-November/report.xlsx"));
        assert!(!is_csv_key("2024-November/notes.txt"));
        assert!(!is_csv_key("csv"));
    }
}
