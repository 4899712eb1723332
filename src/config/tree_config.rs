use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "filetreer_config.json";

pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    ".gitignore",
    "__pycache__",
    "*.pyc",
    "node_modules",
    ".vscode",
    ".idea",
    ".DS_Store",
];

pub const DEFAULT_MAX_DEPTH: usize = 4;
pub const DEFAULT_MAX_ITEMS_PER_LEVEL: usize = 15;

/// 掃描與輸出設定，以 JSON 形式保存
///
/// `max_depth` 與 `max_items_per_level` 為 `None` 表示不限制；JSON 中寫成
/// `null`，欄位缺少時則使用預設值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub ignore_hidden: bool,
    pub ignore_patterns: Vec<String>,
    pub max_depth: Option<usize>,
    pub max_items_per_level: Option<usize>,
    pub unlimit_root_items: bool,
    #[serde(deserialize_with = "lenient_output_format")]
    pub output_format: OutputFormat,
    #[serde(skip)]
    pub config_file: PathBuf,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            ignore_hidden: true,
            ignore_patterns: default_ignore_patterns(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_items_per_level: Some(DEFAULT_MAX_ITEMS_PER_LEVEL),
            unlimit_root_items: true,
            output_format: OutputFormat::Ascii,
            config_file: PathBuf::from(CONFIG_FILE_NAME),
        }
    }
}

fn default_ignore_patterns() -> Vec<String> {
    DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn lenient_output_format<'de, D>(deserializer: D) -> std::result::Result<OutputFormat, D::Error>
where
    D: Deserializer<'de>,
{
    // null、數字等非字串值一律視為 ascii，不影響其他欄位
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .map_or(OutputFormat::Ascii, OutputFormat::parse_lenient))
}

impl TreeConfig {
    /// 以預設值建立，設定檔放在 `config_dir` 底下
    pub fn new<P: AsRef<Path>>(config_dir: P) -> Self {
        Self {
            config_file: config_dir.as_ref().join(CONFIG_FILE_NAME),
            ..Self::default()
        }
    }

    /// 執行檔所在目錄；取不到時退回目前工作目錄
    pub fn default_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 從設定檔載入；讀取或解析失敗時記錄警告並回到預設值
    pub fn load(&mut self) {
        if !self.config_file.exists() {
            tracing::debug!("No settings file at {}, using defaults", self.config_file.display());
            return;
        }

        match self.read_file() {
            Ok(mut loaded) => {
                loaded.config_file = std::mem::take(&mut self.config_file);
                *self = loaded;
                tracing::debug!("Loaded settings from {}", self.config_file.display());
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load settings from {}: {}, using defaults",
                    self.config_file.display(),
                    e
                );
                let config_file = std::mem::take(&mut self.config_file);
                *self = Self {
                    config_file,
                    ..Self::default()
                };
            }
        }
    }

    fn read_file(&self) -> Result<Self> {
        let content = std::fs::read_to_string(&self.config_file)?;
        Self::from_json_str(&content)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.config_file, self.to_json_string()?)?;
        tracing::debug!("Saved settings to {}", self.config_file.display());
        Ok(())
    }

    /// 從換行分隔的文字設定忽略清單（類似 .gitignore）
    ///
    /// 空白文字會清空清單；否則略過空行與 `#` 註解，並合併在預設清單之後去重。
    pub fn set_ignore_patterns_from_str(&mut self, text: &str) {
        if text.trim().is_empty() {
            self.ignore_patterns.clear();
            return;
        }

        let user_patterns = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        let mut merged: Vec<String> = Vec::new();
        for pattern in DEFAULT_IGNORE_PATTERNS.iter().copied().chain(user_patterns) {
            if !merged.iter().any(|existing| existing == pattern) {
                merged.push(pattern.to_string());
            }
        }
        self.ignore_patterns = merged;
    }

    pub fn ignore_patterns_string(&self) -> String {
        self.ignore_patterns.join("\n")
    }

    /// 每項不限制的設定各回傳一行提示
    pub fn unlimited_settings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.max_depth.is_none() {
            warnings.push("Max depth: unlimited");
        }
        if self.max_items_per_level.is_none() {
            warnings.push("Max items per level: unlimited");
        }
        if self.unlimit_root_items {
            warnings.push("Root level items: unlimited");
        }
        warnings
    }
}

impl Validate for TreeConfig {
    fn validate(&self) -> Result<()> {
        if let Some(items) = self.max_items_per_level {
            validation::validate_positive_number("max_items_per_level", items, 1)?;
        }
        for pattern in &self.ignore_patterns {
            validation::validate_non_empty_string("ignore_patterns", pattern)?;
        }
        Ok(())
    }
}
