use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::ports::{PhotoStore, StorageError};
use crate::domain::value_objects::{PhotoNamespace, PhotoPath};
use crate::infrastructure::storage::PathBuilder;

/// Photo store on the local filesystem.
///
/// Blobs live at `<root>/<namespace>/<uuid>.<ext>` and are published by
/// serving `root` under `public_base_url`.
pub struct LocalPhotoStore {
    path_builder: PathBuilder,
    public_base_url: String,
    durable_writes: bool,
}

impl LocalPhotoStore {
    pub fn new(root: PathBuf, public_base_url: impl Into<String>) -> Self {
        Self::with_durability(root, public_base_url, true)
    }

    pub fn with_durability(
        root: PathBuf,
        public_base_url: impl Into<String>,
        durable_writes: bool,
    ) -> Self {
        Self {
            path_builder: PathBuilder::new(root),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            durable_writes,
        }
    }

    pub fn root(&self) -> &Path {
        self.path_builder.root()
    }

    /// Initialize storage directories
    pub async fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.path_builder.temp_dir()).await?;
        fs::create_dir_all(self.path_builder.namespace_dir(&PhotoNamespace::hotels())).await?;
        Ok(())
    }

    async fn write_temp(&self, temp_path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        let mut file = File::create(temp_path).await?;
        file.write_all(bytes).await?;
        if self.durable_writes {
            file.sync_all().await?;
        }
        Ok(())
    }

    async fn sync_parent(&self, path: &Path) {
        let Some(parent) = path.parent() else {
            return;
        };
        match File::open(parent).await {
            Ok(parent_file) => {
                if let Err(e) = parent_file.sync_all().await {
                    // File is already renamed; log but don't fail
                    warn!("Failed to sync parent directory after rename: {}", e);
                }
            }
            Err(e) => warn!("Failed to open parent directory for sync: {}", e),
        }
    }
}

#[async_trait]
impl PhotoStore for LocalPhotoStore {
    async fn put(
        &self,
        bytes: Bytes,
        namespace: &PhotoNamespace,
        extension: &str,
    ) -> Result<PhotoPath, StorageError> {
        // 1. Pick the final name up front so an invalid extension fails early
        let id = Uuid::new_v4();
        let photo_path = PhotoPath::from_parts(namespace, &format!("{}.{}", id, extension))
            .map_err(|e| StorageError::Internal(e.to_string()))?;

        // 2. Write to temp file
        fs::create_dir_all(self.path_builder.temp_dir()).await?;
        let temp_path = self.path_builder.temp_path(id);
        debug!("Writing photo to temp file: {:?}", temp_path);
        if let Err(e) = self.write_temp(&temp_path, &bytes).await {
            warn!("Failed to write photo to temp file {:?}: {}", temp_path, e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        // 3. Move into the namespace directory (atomic)
        let final_path = self.path_builder.final_path(&photo_path);
        if let Err(e) = fs::create_dir_all(self.path_builder.namespace_dir(namespace)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::Io(e));
        }
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::Io(e));
        }

        if self.durable_writes {
            self.sync_parent(&final_path).await;
        }

        debug!(photo = %photo_path, size = bytes.len(), "Photo stored");
        Ok(photo_path)
    }

    async fn delete(&self, path: &PhotoPath) -> Result<(), StorageError> {
        let full_path = self.path_builder.final_path(path);

        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(photo = %path, "Photo already gone");
                Ok(())
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn exists(&self, path: &PhotoPath) -> Result<bool, StorageError> {
        let full_path = self.path_builder.final_path(path);
        Ok(fs::try_exists(&full_path).await?)
    }

    fn resolve(&self, path: &PhotoPath) -> String {
        format!("{}/{}", self.public_base_url, path)
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        let probe = self.path_builder.temp_path(Uuid::new_v4());
        fs::create_dir_all(self.path_builder.temp_dir()).await?;
        fs::write(&probe, b"ok").await?;
        fs::remove_file(&probe).await?;
        Ok(())
    }
}
