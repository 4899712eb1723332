use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileTreerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid regular expression: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Not a directory: {path}")]
    InvalidRootError { path: String },

    #[error("Scan aborted: {message}")]
    ScanError { message: String },

    #[error("Compiler could not be started: {message}")]
    CompilerSpawnError { message: String },

    #[error("Compiler exited with status {}", describe_exit_code(.code))]
    CompilerFailed { code: Option<i32> },

    #[error("Packaging error: {message}")]
    PackageError { message: String },
}

fn describe_exit_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    FileSystem,
    Build,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FileTreerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FileTreerError::InvalidConfigValueError { .. }
            | FileTreerError::TomlError(_)
            | FileTreerError::SerializationError(_)
            | FileTreerError::RegexError(_) => ErrorCategory::Configuration,
            FileTreerError::InvalidRootError { .. } => ErrorCategory::Input,
            FileTreerError::IoError(_) | FileTreerError::ScanError { .. } => {
                ErrorCategory::FileSystem
            }
            FileTreerError::CompilerSpawnError { .. }
            | FileTreerError::CompilerFailed { .. }
            | FileTreerError::PackageError { .. } => ErrorCategory::Build,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::FileSystem => ErrorSeverity::Medium,
            ErrorCategory::Build => match self {
                FileTreerError::CompilerSpawnError { .. } => ErrorSeverity::Critical,
                _ => ErrorSeverity::High,
            },
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            FileTreerError::InvalidRootError { path } => {
                format!("Please choose a valid folder ('{}' is not one)", path)
            }
            FileTreerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            FileTreerError::CompilerFailed { .. } | FileTreerError::CompilerSpawnError { .. } => {
                "Packaging failed, the executable was not produced".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FileTreerError::InvalidRootError { .. } => "Pass an existing directory path",
            FileTreerError::InvalidConfigValueError { .. } => {
                "Fix the setting or run `filetreer config reset`"
            }
            FileTreerError::SerializationError(_) => "Check the JSON settings file for syntax errors",
            FileTreerError::TomlError(_) => "Check the packaging recipe for TOML syntax errors",
            FileTreerError::RegexError(_) => "Check the packaging recipe for malformed placeholders",
            FileTreerError::IoError(_) | FileTreerError::ScanError { .. } => {
                "Check that the path exists and is readable"
            }
            FileTreerError::CompilerSpawnError { .. } => {
                "Make sure the Rust toolchain (cargo) is installed and on PATH"
            }
            FileTreerError::CompilerFailed { .. } => {
                "Read the compiler output above and fix the reported errors"
            }
            FileTreerError::PackageError { .. } => "Check write permissions on the output directory",
        }
    }

    /// 依嚴重程度對應行程結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, FileTreerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_failure_is_build_error() {
        let err = FileTreerError::CompilerFailed { code: Some(101) };
        assert_eq!(err.category(), ErrorCategory::Build);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "Compiler exited with status 101");
    }

    #[test]
    fn test_missing_compiler_is_critical() {
        let err = FileTreerError::CompilerSpawnError {
            message: "not found".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_unknown_exit_code_display() {
        let err = FileTreerError::CompilerFailed { code: None };
        assert_eq!(err.to_string(), "Compiler exited with status unknown");
    }
}
