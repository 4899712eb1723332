use crate::config::package::PackageRecipe;
use crate::config::tree_config::{TreeConfig, CONFIG_FILE_NAME};
use crate::domain::model::{CompileOutput, PackageMode, PackageReport};
use crate::domain::ports::Compiler;
use crate::utils::error::{FileTreerError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;

pub const BUILD_INFO_FILE: &str = "build-info.json";

/// 以 `cargo build` 作為編譯器；進度與診斷顯示在主控台
#[derive(Debug, Clone, Copy, Default)]
pub struct CargoCompiler;

#[async_trait]
impl Compiler for CargoCompiler {
    async fn compile(&self, recipe: &PackageRecipe) -> Result<CompileOutput> {
        let args = recipe.compiler_args();
        tracing::info!("🔨 Running: {} {}", recipe.program, args.join(" "));

        let output = tokio::process::Command::new(&recipe.program)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|e| FileTreerError::CompilerSpawnError {
                message: format!("{}: {}", recipe.program, e),
            })?;

        tracing::debug!("Compiler exited with {}", output.status);

        let messages = String::from_utf8_lossy(&output.stdout);
        let artifact = artifact_from_messages(&messages, &recipe.bin).unwrap_or_else(|| {
            let expected = recipe.build_artifact();
            tracing::debug!("No artifact reported, assuming {}", expected.display());
            expected
        });

        Ok(CompileOutput {
            success: output.status.success(),
            code: output.status.code(),
            artifact,
        })
    }
}

/// 從 cargo 的 JSON 訊息中找出指定 bin 的執行檔路徑
///
/// 實際位置取決於 `.cargo/config.toml` 的 `build.target-dir` 與 workspace
/// 根目錄，因此以編譯器回報的為準。
pub fn artifact_from_messages(messages: &str, bin: &str) -> Option<PathBuf> {
    messages
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .filter(|msg| msg["reason"] == "compiler-artifact" && msg["target"]["name"] == bin)
        .filter(|msg| {
            msg["target"]["kind"]
                .as_array()
                .is_some_and(|kinds| kinds.iter().any(|k| k == "bin"))
        })
        .filter_map(|msg| msg["executable"].as_str().map(PathBuf::from))
        .last()
}

#[derive(Debug, Serialize)]
struct BuildInfo<'a> {
    name: &'a str,
    version: &'a str,
    mode: String,
    release: bool,
    features: &'a [String],
    built_at: DateTime<Utc>,
}

pub struct Packager<C: Compiler> {
    compiler: C,
    recipe: PackageRecipe,
}

impl<C: Compiler> Packager<C> {
    pub fn new(compiler: C, recipe: PackageRecipe) -> Self {
        Self { compiler, recipe }
    }

    pub fn recipe(&self) -> &PackageRecipe {
        &self.recipe
    }

    /// 編譯一次並依模式配置輸出；編譯失敗時不動既有的 dist 內容
    pub async fn run(&self, mode: PackageMode) -> Result<PackageReport> {
        self.recipe.validate()?;
        tracing::info!(
            "📦 Packaging {} ({} mode)",
            self.recipe.executable_name(),
            mode
        );

        let output = self.compiler.compile(&self.recipe).await?;
        if !output.success {
            return Err(FileTreerError::CompilerFailed { code: output.code });
        }
        if !output.artifact.is_file() {
            return Err(FileTreerError::PackageError {
                message: format!(
                    "compiler succeeded but {} was not produced",
                    output.artifact.display()
                ),
            });
        }

        self.remove_previous_output().await?;

        let report = match mode {
            PackageMode::Standalone => self.layout_standalone(&output.artifact).await?,
            PackageMode::OneFile => self.layout_onefile(&output.artifact).await?,
        };

        tracing::info!("✅ Executable written to {}", report.executable.display());
        Ok(report)
    }

    /// 兩種模式的舊輸出都清掉，避免殘留不同配置的檔案
    async fn remove_previous_output(&self) -> Result<()> {
        let standalone = self.recipe.standalone_path();
        if standalone.is_dir() {
            tracing::debug!("Removing {}", standalone.display());
            tokio::fs::remove_dir_all(&standalone).await?;
        }

        let onefile = self.recipe.executable_path(PackageMode::OneFile);
        if onefile.is_file() {
            tracing::debug!("Removing {}", onefile.display());
            tokio::fs::remove_file(&onefile).await?;
        }
        Ok(())
    }

    async fn layout_standalone(&self, artifact: &Path) -> Result<PackageReport> {
        let dir = self.recipe.standalone_path();
        tokio::fs::create_dir_all(&dir).await?;

        let executable = self.recipe.executable_path(PackageMode::Standalone);
        tokio::fs::copy(artifact, &executable).await?;

        // 附上預設設定，讓執行檔旁就有可編輯的設定檔
        let config = TreeConfig::new(&dir);
        tokio::fs::write(dir.join(CONFIG_FILE_NAME), config.to_json_string()?).await?;

        let info = BuildInfo {
            name: &self.recipe.output_name,
            version: env!("CARGO_PKG_VERSION"),
            mode: PackageMode::Standalone.to_string(),
            release: self.recipe.release,
            features: &self.recipe.features,
            built_at: Utc::now(),
        };
        tokio::fs::write(dir.join(BUILD_INFO_FILE), serde_json::to_string_pretty(&info)?).await?;

        Ok(PackageReport {
            mode: PackageMode::Standalone,
            files: vec![
                executable.clone(),
                dir.join(CONFIG_FILE_NAME),
                dir.join(BUILD_INFO_FILE),
            ],
            executable,
        })
    }

    async fn layout_onefile(&self, artifact: &Path) -> Result<PackageReport> {
        tokio::fs::create_dir_all(&self.recipe.output_dir).await?;

        let executable: PathBuf = self.recipe.executable_path(PackageMode::OneFile);
        tokio::fs::copy(artifact, &executable).await?;

        Ok(PackageReport {
            mode: PackageMode::OneFile,
            files: vec![executable.clone()],
            executable,
        })
    }
}
