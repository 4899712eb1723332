//! Shell-style wildcard patterns (`*`, `?`, `[seq]`, `[!seq]`) for the
//! ignore list.

use globset::{ErrorKind, GlobBuilder, GlobMatcher};

/// `*` 也會跨越路徑分隔字元，且不支援反斜線跳脫
#[derive(Debug, Clone)]
pub struct GlobPattern {
    matcher: GlobMatcher,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Result<Self, globset::Error> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(false)
            .backslash_escape(false)
            // Windows 路徑不分大小寫
            .case_insensitive(cfg!(windows))
            .build()?;

        Ok(Self {
            matcher: glob.compile_matcher(),
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

/// 忽略清單中的單一項目
#[derive(Debug, Clone)]
pub enum NamePattern {
    Literal(String),
    Glob(GlobPattern),
}

impl NamePattern {
    /// 無法解析的模式記錄警告後回傳 `None`；未閉合的 `[` 視為一般字元
    pub fn parse(pattern: &str) -> Option<Self> {
        if !has_wildcards(pattern) {
            return Some(Self::Literal(pattern.to_string()));
        }

        match GlobPattern::new(pattern) {
            Ok(glob) => Some(Self::Glob(glob)),
            Err(e) if matches!(e.kind(), ErrorKind::UnclosedClass) => {
                Some(Self::Literal(pattern.to_string()))
            }
            Err(e) => {
                tracing::warn!("Skipping invalid ignore pattern '{}': {}", pattern, e);
                None
            }
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == text,
            Self::Glob(glob) => glob.is_match(text),
        }
    }
}

/// 含萬用字元的模式才需要編譯；其餘直接做字串比對
pub fn has_wildcards(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, text: &str) -> bool {
        NamePattern::parse(pattern).unwrap().is_match(text)
    }

    #[test]
    fn test_star_and_question_mark() {
        assert!(matches("*.pyc", "module.pyc"));
        assert!(!matches("*.pyc", "module.py"));
        assert!(matches("file?.txt", "file1.txt"));
        assert!(!matches("file?.txt", "file12.txt"));
    }

    #[test]
    fn test_star_crosses_separators() {
        assert!(matches("*/build", "/home/user/project/build"));
        assert!(matches("*", "a/b/c"));
    }

    #[test]
    fn test_character_classes() {
        assert!(matches("log[0-9].txt", "log7.txt"));
        assert!(!matches("log[0-9].txt", "logx.txt"));
        assert!(matches("log[!0-9].txt", "logx.txt"));
        assert!(!matches("log[!0-9].txt", "log7.txt"));
        assert!(matches("[]]", "]"));
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        assert!(matches("a[b", "a[b"));
        assert!(!matches("a[b", "ab"));
    }

    #[cfg(unix)]
    #[test]
    fn test_backslash_is_not_an_escape() {
        assert!(matches("dir\\*", "dir\\build"));
    }

    #[test]
    fn test_reversed_range_is_skipped() {
        assert!(NamePattern::parse("[z-a]").is_none());
        assert!(NamePattern::parse("*.log").is_some());
    }

    #[test]
    fn test_has_wildcards() {
        assert!(has_wildcards("*.log"));
        assert!(has_wildcards("file?"));
        assert!(has_wildcards("[ab]"));
        assert!(!has_wildcards("node_modules"));
    }
}
