use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("file download failed: {0}")]
pub struct FetchError(pub String);

/// Downloads photo bytes by transport file reference.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    async fn fetch(&self, file_id: &str) -> Result<Vec<u8>, FetchError>;
}
