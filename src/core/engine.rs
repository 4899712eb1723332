use crate::config::TreeConfig;
use crate::core::generator::generate_in_background;
use crate::domain::model::TreeOutput;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::path::PathBuf;

/// 串起一次完整的產生流程，並視需要記錄資源用量
pub struct TreeEngine {
    config: TreeConfig,
    monitor: SystemMonitor,
}

impl TreeEngine {
    pub fn new(config: TreeConfig) -> Self {
        Self::new_with_monitoring(config, false)
    }

    pub fn new_with_monitoring(config: TreeConfig, monitor_enabled: bool) -> Self {
        Self {
            config,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self, root: PathBuf) -> Result<TreeOutput> {
        tracing::info!("Scanning folder: {}", root.display());
        self.monitor.log_stats("Before scan");

        let output = generate_in_background(self.config.clone(), root).await?;

        self.monitor.log_stats("After scan");
        tracing::info!(
            "Done - files: {}, dirs: {}",
            output.stats.files,
            output.stats.dirs
        );
        self.monitor.log_final_stats();

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_produces_tree() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("site");
        std::fs::create_dir_all(root.join("assets")).unwrap();

        let engine = TreeEngine::new(TreeConfig::default());
        let output = engine.run(root).await.unwrap();

        assert_eq!(output.content, "site/\n└── assets/");
        assert_eq!(output.stats.dirs, 1);
    }

    #[tokio::test]
    async fn test_run_propagates_invalid_root() {
        let dir = TempDir::new().unwrap();
        let engine = TreeEngine::new(TreeConfig::default());
        assert!(engine.run(dir.path().join("missing")).await.is_err());
    }
}
