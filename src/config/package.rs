use crate::domain::model::PackageMode;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 打包流程的固定設定
///
/// 預設值即為正式的打包配方；TOML 檔只用於覆寫個別欄位。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageRecipe {
    pub program: String,
    pub manifest_dir: PathBuf,
    pub bin: String,
    /// Only these features are compiled in.
    pub features: Vec<String>,
    pub release: bool,
    /// Falls back to `CARGO_TARGET_DIR`, then `<manifest_dir>/target`.
    pub target_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub output_name: String,
    pub standalone_dir: String,
}

impl Default for PackageRecipe {
    fn default() -> Self {
        Self {
            program: "cargo".to_string(),
            manifest_dir: PathBuf::from("."),
            bin: "filetreer".to_string(),
            features: vec!["cli".to_string()],
            release: true,
            target_dir: None,
            output_dir: PathBuf::from("dist"),
            output_name: "FileTreer".to_string(),
            standalone_dir: "main.dist".to_string(),
        }
    }
}

impl PackageRecipe {
    /// 從 TOML 檔案載入配方
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配方，未寫的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${CARGO_HOME})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 帶平台副檔名的輸出檔名（Windows 為 `FileTreer.exe`）
    pub fn executable_name(&self) -> String {
        format!("{}{}", self.output_name, std::env::consts::EXE_SUFFIX)
    }

    pub fn standalone_path(&self) -> PathBuf {
        self.output_dir.join(&self.standalone_dir)
    }

    /// 各模式下最終執行檔的位置
    pub fn executable_path(&self, mode: PackageMode) -> PathBuf {
        match mode {
            PackageMode::Standalone => self.standalone_path().join(self.executable_name()),
            PackageMode::OneFile => self.output_dir.join(self.executable_name()),
        }
    }

    pub fn target_dir(&self) -> PathBuf {
        self.target_dir
            .clone()
            .or_else(|| std::env::var_os("CARGO_TARGET_DIR").map(PathBuf::from))
            .unwrap_or_else(|| self.manifest_dir.join("target"))
    }

    /// 預期的執行檔位置；編譯器沒有回報實際路徑時才使用
    pub fn build_artifact(&self) -> PathBuf {
        let profile = if self.release { "release" } else { "debug" };
        self.target_dir()
            .join(profile)
            .join(format!("{}{}", self.bin, std::env::consts::EXE_SUFFIX))
    }

    pub fn compiler_args(&self) -> Vec<String> {
        let mut args = vec![
            "build".to_string(),
            // 診斷訊息照常顯示在 stderr，stdout 則是可解析的 JSON
            "--message-format=json-render-diagnostics".to_string(),
            "--manifest-path".to_string(),
            self.manifest_dir.join("Cargo.toml").display().to_string(),
            "--bin".to_string(),
            self.bin.clone(),
        ];
        if self.release {
            args.push("--release".to_string());
        }
        if let Some(target_dir) = &self.target_dir {
            args.push("--target-dir".to_string());
            args.push(target_dir.display().to_string());
        }
        args.push("--no-default-features".to_string());
        if !self.features.is_empty() {
            args.push("--features".to_string());
            args.push(self.features.join(","));
        }
        args
    }
}

impl Validate for PackageRecipe {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("program", &self.program)?;
        validation::validate_path("manifest_dir", &self.manifest_dir.to_string_lossy())?;
        validation::validate_non_empty_string("bin", &self.bin)?;
        validation::validate_path("output_dir", &self.output_dir.to_string_lossy())?;
        validation::validate_file_name("output_name", &self.output_name)?;
        validation::validate_file_name("standalone_dir", &self.standalone_dir)?;
        for feature in &self.features {
            validation::validate_non_empty_string("features", feature)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_recipe_paths() {
        let recipe = PackageRecipe::default();
        let exe = format!("FileTreer{}", std::env::consts::EXE_SUFFIX);

        assert_eq!(
            recipe.executable_path(PackageMode::Standalone),
            PathBuf::from("dist").join("main.dist").join(&exe)
        );
        assert_eq!(
            recipe.executable_path(PackageMode::OneFile),
            PathBuf::from("dist").join(&exe)
        );
        assert!(recipe.validate().is_ok());
    }

    #[test]
    fn test_compiler_args_whitelist_features() {
        let recipe = PackageRecipe::default();
        let args = recipe.compiler_args();

        assert_eq!(args[0], "build");
        assert!(args.contains(&"--message-format=json-render-diagnostics".to_string()));
        assert!(args.contains(&"--release".to_string()));
        assert!(args.contains(&"--no-default-features".to_string()));
        let idx = args.iter().position(|a| a == "--features").unwrap();
        assert_eq!(args[idx + 1], "cli");
        let idx = args.iter().position(|a| a == "--bin").unwrap();
        assert_eq!(args[idx + 1], "filetreer");
    }

    #[test]
    fn test_partial_toml_overrides() {
        let recipe = PackageRecipe::from_toml_str(
            r#"
output_dir = "build/out"
release = false
features = []
"#,
        )
        .unwrap();

        assert_eq!(recipe.output_dir, PathBuf::from("build/out"));
        assert!(!recipe.release);
        assert_eq!(recipe.output_name, "FileTreer");
        assert!(!recipe.compiler_args().contains(&"--features".to_string()));
        assert!(recipe.build_artifact().to_string_lossy().contains("debug"));
    }

    #[test]
    fn test_explicit_target_dir() {
        let recipe = PackageRecipe {
            target_dir: Some(PathBuf::from("/tmp/ft-target")),
            ..PackageRecipe::default()
        };

        let exe = format!("filetreer{}", std::env::consts::EXE_SUFFIX);
        assert_eq!(
            recipe.build_artifact(),
            PathBuf::from("/tmp/ft-target").join("release").join(exe)
        );
        let args = recipe.compiler_args();
        let idx = args.iter().position(|a| a == "--target-dir").unwrap();
        assert_eq!(args[idx + 1], PathBuf::from("/tmp/ft-target").display().to_string());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FILETREER_TEST_OUTPUT", "release-artifacts");

        let recipe =
            PackageRecipe::from_toml_str(r#"output_dir = "${FILETREER_TEST_OUTPUT}""#).unwrap();
        assert_eq!(recipe.output_dir, PathBuf::from("release-artifacts"));

        std::env::remove_var("FILETREER_TEST_OUTPUT");
    }

    #[test]
    fn test_invalid_output_name() {
        let recipe = PackageRecipe {
            output_name: "../escape".to_string(),
            ..PackageRecipe::default()
        };
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn test_recipe_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"bin = \"other\"\nprogram = \"cross\"\n")
            .unwrap();

        let recipe = PackageRecipe::from_file(temp_file.path()).unwrap();
        assert_eq!(recipe.bin, "other");
        assert_eq!(recipe.program, "cross");
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(PackageRecipe::from_toml_str("release = ").is_err());
    }
}
