//! Diff rendering with a change gutter.

use colored::Colorize;

use super::order::Ordering;
use super::yaml::{YamlWriter, key_repr};
use super::{Options, Style};
use crate::diff::{Diff, Mode};
use crate::template::Path;

pub(super) fn render(diff: &Diff, options: &Options<'_>) -> String {
    if options.style == Style::Json {
        // String-keyed trees always serialize
        return serde_json::to_string_pretty(diff).map(|text| text + "\n").unwrap_or_default();
    }

    let ordering = Ordering {
        unsorted: options.unsorted,
        resources: None,
    };
    let mut renderer = DiffRenderer {
        ordering: &ordering,
        compact: options.compact,
        lines: Vec::new(),
    };
    renderer.body(diff, &Path::root(), 0);

    renderer
        .lines
        .into_iter()
        .map(|(mode, text)| {
            let line = format!("{}{text}", gutter(mode));
            let line = if options.color { paint(mode, &line) } else { line };
            line + "\n"
        })
        .collect()
}

/// Two-character prefix marking a line's mode.
pub fn gutter(mode: Mode) -> &'static str {
    match mode {
        Mode::Added => "+ ",
        Mode::Removed => "- ",
        Mode::Changed => "> ",
        Mode::Unchanged => "  ",
    }
}

fn paint(mode: Mode, line: &str) -> String {
    match mode {
        Mode::Added => line.green().to_string(),
        Mode::Removed => line.red().to_string(),
        Mode::Changed => line.yellow().to_string(),
        Mode::Unchanged => line.to_string(),
    }
}

struct DiffRenderer<'a> {
    ordering: &'a Ordering,
    compact: bool,
    lines: Vec<(Mode, String)>,
}

impl<'a> DiffRenderer<'a> {
    fn skip(&self, diff: &Diff) -> bool {
        self.compact && diff.is_unchanged()
    }

    fn body(&mut self, diff: &Diff, path: &Path, indent: usize) {
        match diff {
            Diff::Mapping { entries, .. } => {
                for key in self.ordering.keys(path, entries.keys().map(String::as_str)) {
                    self.entry(key, &entries[key], &path.key(key), indent);
                }
            }
            Diff::Sequence { items, .. } => {
                for (i, item) in items.iter().enumerate() {
                    self.item(item, &path.index(i), indent);
                }
            }
            Diff::Value { mode, value } => {
                let mut writer = self.writer();
                writer.node(value, path, indent);
                self.push_text(*mode, &writer.finish());
            }
        }
    }

    fn entry(&mut self, key: &str, diff: &Diff, path: &Path, indent: usize) {
        if self.skip(diff) {
            return;
        }
        if let Diff::Value { mode, value } = diff {
            let mut writer = self.writer();
            writer.entry(key, value, path, indent);
            self.push_text(*mode, &writer.finish());
            return;
        }

        let header = format!("{:indent$}{}:", "", key_repr(key));
        let at = self.lines.len();
        self.lines.push((diff.mode(), header));
        self.body(diff, path, indent + 2);
        if self.lines.len() == at + 1 {
            self.lines[at].1.push_str(empty_marker(diff));
        }
    }

    fn item(&mut self, diff: &Diff, path: &Path, indent: usize) {
        if self.skip(diff) {
            return;
        }
        if let Diff::Value { mode, value } = diff {
            let mut writer = self.writer();
            writer.item(value, path, indent);
            self.push_text(*mode, &writer.finish());
            return;
        }

        let at = self.lines.len();
        self.body(diff, path, indent + 2);
        if self.lines.len() == at {
            self.lines.push((diff.mode(), format!("{:indent$}-{}", "", empty_marker(diff))));
        } else {
            self.lines[at].1.replace_range(indent..indent + 2, "- ");
        }
    }

    fn writer(&self) -> YamlWriter<'a> {
        YamlWriter::new(self.ordering, None, true)
    }

    fn push_text(&mut self, mode: Mode, text: &str) {
        self.lines.extend(text.lines().map(|line| (mode, line.to_string())));
    }
}

fn empty_marker(diff: &Diff) -> &'static str {
    match diff {
        Diff::Sequence { .. } => " []",
        _ => " {}",
    }
}
