use crate::domain::model::{EntryKind, OutputFormat, TreeEntry};
use crate::domain::ports::TreeRenderer;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

pub fn renderer_for(format: OutputFormat) -> Box<dyn TreeRenderer> {
    match format {
        OutputFormat::Ascii => Box::new(AsciiRenderer),
        OutputFormat::Markdown => Box::new(MarkdownRenderer),
    }
}

/// `├──` / `└──` / `│` tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiRenderer;

impl TreeRenderer for AsciiRenderer {
    fn render(&self, root_name: &str, entries: &[TreeEntry]) -> String {
        let mut lines = vec![String::new(); entries.len()];
        // has_later_sibling[d]：深度 d 的祖先在後面還有同層項目
        let mut has_later_sibling: Vec<bool> = Vec::new();

        // 由後往前走，一次算出每行的前綴
        for (i, entry) in entries.iter().enumerate().rev() {
            let depth = entry.depth;
            if has_later_sibling.len() <= depth {
                has_later_sibling.resize(depth + 1, false);
            }

            let mut line = String::new();
            for &open in &has_later_sibling[..depth] {
                line.push_str(if open { PIPE } else { SPACE });
            }

            let connector = match entry.kind {
                EntryKind::Ellipsis { omitted_files: true } => BRANCH,
                EntryKind::Ellipsis { omitted_files: false } => LAST_BRANCH,
                _ if has_later_sibling[depth] => BRANCH,
                _ => LAST_BRANCH,
            };
            line.push_str(connector);
            line.push_str(&entry.display_name());
            lines[i] = line;

            has_later_sibling[depth] = true;
            has_later_sibling.truncate(depth + 1);
        }

        std::iter::once(format!("{}/", root_name))
            .chain(lines)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Nested Markdown list, four spaces per level.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl TreeRenderer for MarkdownRenderer {
    fn render(&self, root_name: &str, entries: &[TreeEntry]) -> String {
        let mut lines = Vec::with_capacity(entries.len() + 1);
        lines.push(format!("- {}/", root_name));

        for entry in entries {
            lines.push(format!(
                "{}- {}",
                SPACE.repeat(entry.depth + 1),
                entry.display_name()
            ));
        }

        lines.join("\n")
    }
}
