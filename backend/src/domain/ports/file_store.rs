//! Port for proof-file storage.
//!
//! The ledger never touches bytes after upload; it persists only the URL
//! returned here plus the reported content type.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by file store adapters.
    pub enum FileStoreError {
        /// The backing store rejected or failed the write.
        Io { message: String } =>
            "file store write failed: {message}",
        /// The upload was rejected before storage (e.g. empty payload).
        Rejected { message: String } =>
            "upload rejected: {message}",
    }
}

impl From<FileStoreError> for crate::domain::Error {
    fn from(error: FileStoreError) -> Self {
        match error {
            FileStoreError::Io { message } => {
                tracing::error!(%message, "file store write failed");
                Self::internal("failed to store uploaded file")
            }
            FileStoreError::Rejected { message } => Self::invalid_request(message),
        }
    }
}

/// Port for storing uploaded proof artifacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist the bytes under a location derived from `filename` and
    /// return a URL or path reference for the stored artifact.
    async fn store<'a>(
        &self,
        bytes: &[u8],
        filename: &str,
        content_type: Option<&'a str>,
    ) -> Result<String, FileStoreError>;
}
