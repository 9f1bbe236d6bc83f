use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::api::log_api_error;
use crate::client::ApiClient;
use crate::config::{API_PREFIX, UPLOAD_TIMEOUT};
use crate::error::ApiError;

const UPLOAD_FIELD: &str = "file";
const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub loaded: u64,
    pub total: u64,
}

impl UploadProgress {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.loaded as f32 / self.total as f32
        }
    }
}

pub type ProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// A CSV file held in memory, ready to upload.
#[derive(Debug, Clone)]
pub struct CsvUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CsvUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Request(format!("reading {}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("upload.csv"));
        Ok(Self::new(file_name, bytes))
    }

    fn into_part(self, progress: Option<ProgressCallback>) -> Result<Part, ApiError> {
        let total = self.bytes.len() as u64;

        let mut loaded = 0u64;
        let stream = futures::stream::iter(chunks(Bytes::from(self.bytes)).map(move |chunk| {
            loaded += chunk.len() as u64;
            if let Some(ref report) = progress {
                report(UploadProgress { loaded, total });
            }
            Ok::<_, std::io::Error>(chunk)
        }));

        let part = Part::stream_with_length(reqwest::Body::wrap_stream(stream), total)
            .file_name(self.file_name)
            .mime_str("text/csv")?;
        Ok(part)
    }
}

/// `CHUNK_SIZE` views into `bytes`, sharing its buffer.
fn chunks(bytes: Bytes) -> impl Iterator<Item = Bytes> {
    (0..bytes.len())
        .step_by(CHUNK_SIZE)
        .map(move |start| bytes.slice(start..(start + CHUNK_SIZE).min(bytes.len())))
}

/// Outcome reported by the import endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImportResult {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone)]
pub struct ImportApi {
    client: ApiClient,
}

impl ImportApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn upload_csv(
        &self,
        upload: CsvUpload,
        progress: Option<ProgressCallback>,
    ) -> Result<ImportResult, ApiError> {
        let path = format!("{}/import", API_PREFIX);
        let file_name = upload.file_name.clone();
        let size = upload.bytes.len();

        let result = async {
            let form = Form::new().part(UPLOAD_FIELD, upload.into_part(progress)?);
            let body = self
                .client
                .post_multipart(&path, form, UPLOAD_TIMEOUT)
                .await?;
            Ok::<ImportResult, ApiError>(serde_json::from_value(body)?)
        }
        .await
        .map_err(|e| log_api_error("upload_csv", e))?;

        info!("Imported {} ({} bytes)", file_name, size);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_fraction() {
        let half = UploadProgress {
            loaded: 50,
            total: 100,
        };
        assert_eq!(half.fraction(), 0.5);
        let empty = UploadProgress {
            loaded: 0,
            total: 0,
        };
        assert_eq!(empty.fraction(), 1.0);
    }

    #[test]
    fn chunks_cover_the_buffer_without_copying() {
        let data = Bytes::from(vec![7u8; CHUNK_SIZE * 2 + 10]);
        let parts: Vec<Bytes> = chunks(data.clone()).collect();

        let sizes: Vec<usize> = parts.iter().map(Bytes::len).collect();
        assert_eq!(sizes, vec![CHUNK_SIZE, CHUNK_SIZE, 10]);
        assert_eq!(parts.concat(), data.to_vec());
        assert_eq!(parts[1].as_ptr(), data[CHUNK_SIZE..].as_ptr());
        assert_eq!(chunks(Bytes::new()).count(), 0);
    }

    #[tokio::test]
    async fn reads_upload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        std::fs::write(&path, "id,title\n1,Heat\n").unwrap();

        let upload = CsvUpload::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name, "movies.csv");
        assert_eq!(upload.bytes.len(), 16);
    }

    #[tokio::test]
    async fn missing_file_is_a_construction_error() {
        let err = CsvUpload::from_path(Path::new("/nonexistent/movies.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Request(_)));
    }
}
