//! Out-of-band comments keyed by template path.

use std::collections::BTreeMap;

use crate::template::Path;

/// Comments to render alongside a template, keyed by the path they annotate.
///
/// The store is independent of the template it annotates: paths that do not
/// exist in the template are simply never rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentStore {
    comments: BTreeMap<Path, String>,
}

impl CommentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `comment` to `path`, replacing any previous comment there.
    pub fn insert(&mut self, path: Path, comment: impl Into<String>) {
        self.comments.insert(path, comment.into());
    }

    /// Detach the comment at `path`.
    pub fn remove(&mut self, path: &Path) -> Option<String> {
        self.comments.remove(path)
    }

    /// The comment at `path`.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&str> {
        self.comments.get(path).map(String::as_str)
    }

    /// Number of comments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Whether the store holds no comments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

/// Render `comment` as full lines at `indent`, one per comment line.
pub(super) fn leading_lines(comment: &str, marker: &str, indent: usize) -> String {
    comment
        .lines()
        .map(|line| {
            if line.is_empty() {
                format!("{:indent$}{marker}\n", "")
            } else {
                format!("{:indent$}{marker} {line}\n", "")
            }
        })
        .collect()
}

/// Render `comment` as a same-line trailer.
pub(super) fn trailing(comment: &str, marker: &str) -> String {
    let flat: Vec<&str> = comment.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    format!("  {marker} {}", flat.join(" "))
}
