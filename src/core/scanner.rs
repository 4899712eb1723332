use crate::config::TreeConfig;
use crate::core::ignore::IgnoreMatcher;
use crate::domain::model::{EntryKind, TreeEntry};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

struct DirItem {
    path: PathBuf,
    name: String,
    is_dir: bool,
    is_symlink: bool,
}

/// 遞迴掃描目錄，掃描過程中套用深度與每層數量限制
pub struct DirectoryScanner<'a> {
    matcher: &'a IgnoreMatcher,
    max_depth: Option<usize>,
    max_items_per_level: Option<usize>,
    unlimit_root_items: bool,
}

impl<'a> DirectoryScanner<'a> {
    pub fn new(config: &TreeConfig, matcher: &'a IgnoreMatcher) -> Self {
        Self {
            matcher,
            max_depth: config.max_depth,
            max_items_per_level: config.max_items_per_level,
            unlimit_root_items: config.unlimit_root_items,
        }
    }

    /// Entries in pre-order. The root is not included; its children have
    /// depth 0.
    pub fn scan(&self, root: &Path) -> Vec<TreeEntry> {
        let base = root.parent().unwrap_or(root);
        let mut entries = Vec::new();
        self.scan_into(root, base, 0, &mut entries);
        entries
    }

    fn scan_into(&self, dir: &Path, base: &Path, depth: usize, out: &mut Vec<TreeEntry>) {
        if self.max_depth.is_some_and(|max| depth >= max) {
            return;
        }

        let items = match self.list_dir(dir) {
            Ok(items) => items,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                tracing::debug!("Permission denied, skipping {}", dir.display());
                return;
            }
            Err(e) => {
                tracing::warn!("Error scanning {}: {}", dir.display(), e);
                return;
            }
        };

        let limit = if depth == 0 && self.unlimit_root_items {
            None
        } else {
            self.max_items_per_level
        };
        let keep = limit.map_or(items.len(), |max| max.min(items.len()));
        let (kept, omitted) = items.split_at(keep);

        for item in kept {
            let relative_path = item
                .path
                .strip_prefix(base)
                .unwrap_or(&item.path)
                .to_string_lossy()
                .into_owned();

            out.push(TreeEntry {
                relative_path,
                depth,
                name: item.name.clone(),
                kind: if item.is_dir {
                    EntryKind::Dir
                } else {
                    EntryKind::File
                },
            });

            // 不跟隨符號連結，避免循環
            if item.is_dir && !item.is_symlink {
                self.scan_into(&item.path, base, depth + 1, out);
            }
        }

        if !omitted.is_empty() {
            let omitted_files = omitted.iter().any(|item| !item.is_dir)
                && kept.last().is_some_and(|item| item.is_dir);
            out.push(TreeEntry::ellipsis(depth, omitted_files));
        }
    }

    /// 讀取並排序：目錄在前，再依小寫名稱
    fn list_dir(&self, dir: &Path) -> std::io::Result<Vec<DirItem>> {
        let mut items = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    tracing::debug!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            let is_symlink = file_type.is_symlink();
            let is_dir = if is_symlink {
                path.is_dir()
            } else {
                file_type.is_dir()
            };

            if self.matcher.is_ignored(&path, is_dir) {
                continue;
            }

            items.push(DirItem {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                is_dir,
                is_symlink,
            });
        }

        items.sort_by_cached_key(|item| (!item.is_dir, item.name.to_lowercase(), item.name.clone()));
        Ok(items)
    }
}

/// 移除省略號之後、比它更深的項目
pub fn filter_ellipsis_children(entries: Vec<TreeEntry>) -> Vec<TreeEntry> {
    let mut filtered = Vec::with_capacity(entries.len());
    let mut skip_from_depth: Option<usize> = None;

    for entry in entries {
        if entry.is_ellipsis() {
            skip_from_depth = Some(entry.depth + 1);
            filtered.push(entry);
            continue;
        }

        if let Some(skip) = skip_from_depth {
            if entry.depth >= skip {
                continue;
            }
            skip_from_depth = None;
        }
        filtered.push(entry);
    }

    filtered
}
