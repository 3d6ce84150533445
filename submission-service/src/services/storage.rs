use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use super::ServiceError;

/// Blob storage collaborator: store bytes under a suggested name, get a
/// stable retrieval path back. No transformation, no deduplication.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn store(&self, suggested_name: &str, data: &[u8]) -> Result<String, ServiceError>;
    async fn load(&self, path: &str) -> Result<Vec<u8>, ServiceError>;
}

/// Filesystem-backed storage rooted at the configured upload directory.
/// Stored names carry a millisecond-timestamp prefix so repeated uploads of
/// the same file name never collide.
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, ServiceError> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).await?;
        }
        Ok(Self { base_path })
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(&self, suggested_name: &str, data: &[u8]) -> Result<String, ServiceError> {
        // Keep only the final path component of whatever the client sent.
        let file_name = suggested_name
            .rsplit(['/', '\\'])
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("upload.bin");
        let stored_name = format!("{}-{}", chrono::Utc::now().timestamp_millis(), file_name);
        let path = self.base_path.join(&stored_name);
        fs::write(&path, data).await?;
        Ok(path.to_string_lossy().into_owned())
    }

    async fn load(&self, path: &str) -> Result<Vec<u8>, ServiceError> {
        Ok(fs::read(path).await?)
    }
}
