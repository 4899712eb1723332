use crate::config::TreeConfig;
use crate::utils::pattern::NamePattern;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone)]
struct CompiledPattern {
    pattern: NamePattern,
    dir_only: bool,
}

/// 忽略清單，建立時一次編譯所有模式
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    ignore_hidden: bool,
    literals: HashSet<String>,
    patterns: Vec<CompiledPattern>,
}

impl IgnoreMatcher {
    /// 無效的模式只會被略過，不影響其他項目
    pub fn new(ignore_hidden: bool, patterns: &[String]) -> Self {
        let mut literals = HashSet::new();
        let mut compiled = Vec::new();

        for pattern in patterns {
            let (body, dir_only) = match pattern.strip_suffix('/') {
                Some(body) => (body, true),
                None => (pattern.as_str(), false),
            };

            match NamePattern::parse(body) {
                Some(NamePattern::Literal(name)) if !dir_only => {
                    literals.insert(name);
                }
                Some(pattern) => compiled.push(CompiledPattern { pattern, dir_only }),
                None => {}
            }
        }

        Self {
            ignore_hidden,
            literals,
            patterns: compiled,
        }
    }

    pub fn from_config(config: &TreeConfig) -> Self {
        Self::new(config.ignore_hidden, &config.ignore_patterns)
    }

    /// 名稱或完整路徑符合任一模式即忽略；以 `/` 結尾的模式只套用在目錄
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.ignore_hidden && name.starts_with('.') {
            return true;
        }

        if self.literals.contains(&*name) {
            return true;
        }

        let full_path = path.to_string_lossy();
        self.patterns
            .iter()
            .filter(|p| is_dir || !p.dir_only)
            .any(|p| p.pattern.is_match(&name) || p.pattern.is_match(&full_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(ignore_hidden: bool, patterns: &[&str]) -> IgnoreMatcher {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        IgnoreMatcher::new(ignore_hidden, &patterns)
    }

    #[test]
    fn test_hidden_entries() {
        let m = matcher(true, &[]);
        assert!(m.is_ignored(Path::new("/repo/.env"), false));
        assert!(!m.is_ignored(Path::new("/repo/env"), false));

        let m = matcher(false, &[]);
        assert!(!m.is_ignored(Path::new("/repo/.env"), false));
    }

    #[test]
    fn test_literal_and_wildcard_patterns() {
        let m = matcher(false, &["node_modules", "*.pyc"]);
        assert!(m.is_ignored(Path::new("/repo/node_modules"), true));
        assert!(m.is_ignored(Path::new("/repo/pkg/mod.pyc"), false));
        assert!(!m.is_ignored(Path::new("/repo/pkg/mod.py"), false));
    }

    #[test]
    fn test_directory_only_pattern() {
        let m = matcher(false, &["build/"]);
        assert!(m.is_ignored(Path::new("/repo/build"), true));
        assert!(!m.is_ignored(Path::new("/repo/build"), false));
    }

    #[cfg(unix)]
    #[test]
    fn test_pattern_matches_full_path() {
        let m = matcher(false, &["*/generated/*"]);
        assert!(m.is_ignored(Path::new("/repo/generated/schema.rs"), false));
        assert!(!m.is_ignored(Path::new("/repo/src/schema.rs"), false));
    }

    #[test]
    fn test_invalid_pattern_does_not_disable_others() {
        let m = matcher(false, &["[z-a]", "*.log", "dist"]);
        assert!(m.is_ignored(Path::new("/repo/app.log"), false));
        assert!(m.is_ignored(Path::new("/repo/dist"), true));
        assert!(!m.is_ignored(Path::new("/repo/z"), false));
    }
}
