use crate::config::TreeConfig;
use crate::core::ignore::IgnoreMatcher;
use crate::core::render::renderer_for;
use crate::core::scanner::{filter_ellipsis_children, DirectoryScanner};
use crate::domain::model::{TreeEntry, TreeOutput, TreeStats};
use crate::utils::error::{FileTreerError, Result};
use crate::utils::validation::{validate_directory, Validate};
use std::path::{Path, PathBuf};

pub struct FileTreeGenerator {
    config: TreeConfig,
    matcher: IgnoreMatcher,
}

impl FileTreeGenerator {
    pub fn new(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        let matcher = IgnoreMatcher::from_config(&config);
        Ok(Self { config, matcher })
    }

    pub fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        self.matcher.is_ignored(path, is_dir)
    }

    /// 掃描並過濾，不做輸出
    pub fn scan_directory(&self, root: &Path) -> Vec<TreeEntry> {
        let raw = DirectoryScanner::new(&self.config, &self.matcher).scan(root);
        filter_ellipsis_children(raw)
    }

    pub fn generate(&self, root: &Path) -> Result<TreeOutput> {
        validate_directory(root)?;

        let root_name = root_name(root)?;
        tracing::debug!("Scanning {} as '{}'", root.display(), root_name);

        let entries = self.scan_directory(root);
        let format = self.config.output_format;
        let content = renderer_for(format).render(&root_name, &entries);

        Ok(TreeOutput {
            content,
            format,
            stats: TreeStats::count(&entries),
        })
    }
}

/// 以正規化後的最後一段路徑作為根目錄名稱（`.` 也能取得實際名稱）
fn root_name(root: &Path) -> Result<String> {
    let canonical = root.canonicalize()?;
    Ok(canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| canonical.display().to_string()))
}

/// 在阻塞執行緒上產生檔案樹，避免佔住 async runtime
pub async fn generate_in_background(config: TreeConfig, root: PathBuf) -> Result<TreeOutput> {
    tokio::task::spawn_blocking(move || FileTreeGenerator::new(config)?.generate(&root))
        .await
        .map_err(|e| FileTreerError::ScanError {
            message: e.to_string(),
        })?
}
