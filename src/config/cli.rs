use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FILE: &str = "filetree.txt";

#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// 先嘗試 `primary`，失敗時改寫到 `fallback`
    pub async fn write_with_fallback(
        &self,
        primary: &Path,
        fallback: &Path,
        data: &[u8],
    ) -> Result<PathBuf> {
        match self.write_file(primary, data).await {
            Ok(path) => Ok(path),
            Err(e) => {
                tracing::warn!(
                    "Could not save to {}: {}, trying {}",
                    primary.display(),
                    e,
                    fallback.display()
                );
                self.write_file(fallback, data).await
            }
        }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<PathBuf> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(&full_path, data).await?;
        Ok(full_path)
    }
}
