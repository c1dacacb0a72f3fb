use std::path::{Path, PathBuf};

use crate::domain::value_objects::{PhotoNamespace, PhotoPath};

const TEMP_DIR: &str = ".tmp";

/// Utility for generating storage paths
pub struct PathBuilder {
    root: PathBuf,
}

impl PathBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generate temp upload path: /root/.tmp/{uuid}
    pub fn temp_path(&self, id: uuid::Uuid) -> PathBuf {
        self.temp_dir().join(id.to_string())
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.root.join(TEMP_DIR)
    }

    /// Directory holding every blob of a namespace: /root/{namespace}
    pub fn namespace_dir(&self, namespace: &PhotoNamespace) -> PathBuf {
        self.root.join(namespace.as_str())
    }

    /// Generate final path: /root/{namespace}/{file}
    pub fn final_path(&self, path: &PhotoPath) -> PathBuf {
        self.root.join(path.namespace()).join(path.file_name())
    }
}
