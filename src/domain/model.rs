use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Ascii,
    Markdown,
}

impl OutputFormat {
    /// 未知格式一律退回 ASCII
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "markdown" => OutputFormat::Markdown,
            _ => OutputFormat::Ascii,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Ascii => "ascii",
            OutputFormat::Markdown => "markdown",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Stands for entries cut by the per-level limit.
    Ellipsis { omitted_files: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// 相對於掃描根目錄的上一層，因此以根目錄名稱開頭
    pub relative_path: String,
    pub depth: usize,
    pub name: String,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn ellipsis(depth: usize, omitted_files: bool) -> Self {
        Self {
            relative_path: "...".to_string(),
            depth,
            name: "...".to_string(),
            kind: EntryKind::Ellipsis { omitted_files },
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self.kind, EntryKind::Ellipsis { .. })
    }

    pub fn display_name(&self) -> String {
        match self.kind {
            EntryKind::Dir => format!("{}/", self.name),
            EntryKind::File => self.name.clone(),
            EntryKind::Ellipsis { .. } => "...".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub files: usize,
    pub dirs: usize,
}

impl TreeStats {
    pub fn count(entries: &[TreeEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut stats, entry| {
            match entry.kind {
                EntryKind::File => stats.files += 1,
                EntryKind::Dir => stats.dirs += 1,
                EntryKind::Ellipsis { .. } => {}
            }
            stats
        })
    }
}

#[derive(Debug, Clone)]
pub struct TreeOutput {
    pub content: String,
    pub format: OutputFormat,
    pub stats: TreeStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageMode {
    /// Directory holding the executable and its supporting files.
    Standalone,
    /// One self-contained executable.
    OneFile,
}

impl fmt::Display for PackageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageMode::Standalone => f.write_str("standalone"),
            PackageMode::OneFile => f.write_str("onefile"),
        }
    }
}

/// Result of one compiler run.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub success: bool,
    pub code: Option<i32>,
    /// Where the compiler leaves the built executable.
    pub artifact: PathBuf,
}

#[derive(Debug, Clone)]
pub struct PackageReport {
    pub mode: PackageMode,
    pub executable: PathBuf,
    pub files: Vec<PathBuf>,
}
