//! Filesystem implementation of the `FileStore` port.
//!
//! Artifacts land under a single upload directory with a UUID prefix so
//! repeated uploads of the same filename never collide. The returned URL is
//! the public `/uploads/...` path the frontend serves files from.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::ports::{FileStore, FileStoreError};

/// Public URL prefix under which stored artifacts are served.
const PUBLIC_PREFIX: &str = "/uploads";

/// File store writing artifacts to a local directory.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory artifacts are written to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Strip path components and characters that have no business in a stored
/// filename, keeping the extension intact.
fn sanitise_filename(filename: &str) -> String {
    let base = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('_').is_empty() {
        "upload".to_owned()
    } else {
        cleaned
    }
}

#[async_trait::async_trait]
impl FileStore for LocalFileStore {
    async fn store<'a>(
        &self,
        bytes: &[u8],
        filename: &str,
        _content_type: Option<&'a str>,
    ) -> Result<String, FileStoreError> {
        if bytes.is_empty() {
            return Err(FileStoreError::rejected("uploaded file is empty"));
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| FileStoreError::io(err.to_string()))?;

        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitise_filename(filename));
        let path = self.root.join(&stored_name);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|err| FileStoreError::io(err.to_string()))?;

        Ok(format!("{PUBLIC_PREFIX}/{stored_name}"))
    }
}
