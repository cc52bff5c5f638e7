//! JSON writer with canonical key order and `//` comments.

use super::comments::{leading_lines, trailing};
use super::order::Ordering;
use super::CommentStore;
use crate::template::{Node, Path, Scalar};

const MARKER: &str = "//";

pub(super) struct JsonWriter<'a> {
    ordering: &'a Ordering,
    comments: Option<&'a CommentStore>,
    out: String,
}

impl<'a> JsonWriter<'a> {
    pub(super) fn new(ordering: &'a Ordering, comments: Option<&'a CommentStore>) -> Self {
        Self {
            ordering,
            comments,
            out: String::new(),
        }
    }

    pub(super) fn finish(self) -> String {
        self.out
    }

    pub(super) fn document(&mut self, root: &Node) {
        let path = Path::root();
        if let Some(comment) = self.comment(&path) {
            self.out.push_str(&leading_lines(comment, MARKER, 0));
        }
        self.node(root, &path, 0);
        self.out.push('\n');
    }

    fn node(&mut self, node: &Node, path: &Path, indent: usize) {
        match node {
            Node::Scalar(scalar) => self.out.push_str(&scalar_text(scalar)),
            Node::Sequence(items) if items.is_empty() => self.out.push_str("[]"),
            Node::Mapping(map) if map.is_empty() => self.out.push_str("{}"),
            Node::Sequence(items) => {
                self.out.push_str("[\n");
                for (i, item) in items.iter().enumerate() {
                    let child = path.index(i);
                    self.member(None, item, &child, indent + 2, i + 1 == items.len());
                }
                self.pad(indent);
                self.out.push(']');
            }
            Node::Mapping(map) => {
                self.out.push_str("{\n");
                let keys = self.ordering.keys(path, map.keys().map(String::as_str));
                let count = keys.len();
                for (i, key) in keys.into_iter().enumerate() {
                    let child = path.key(key);
                    self.member(Some(key), &map[key], &child, indent + 2, i + 1 == count);
                }
                self.pad(indent);
                self.out.push('}');
            }
        }
    }

    /// One array element or object member, through its line break.
    fn member(&mut self, key: Option<&str>, value: &Node, path: &Path, indent: usize, last: bool) {
        let inline = matches!(value, Node::Scalar(_)) || value.is_empty_collection();
        let comment = self.comment(path);
        if let Some(comment) = comment
            && !inline
        {
            self.out.push_str(&leading_lines(comment, MARKER, indent));
        }

        self.pad(indent);
        if let Some(key) = key {
            self.out.push_str(&quote(key));
            self.out.push_str(": ");
        }
        self.node(value, path, indent);
        if !last {
            self.out.push(',');
        }
        if let Some(comment) = comment
            && inline
        {
            self.out.push_str(&trailing(comment, MARKER));
        }
        self.out.push('\n');
    }

    fn pad(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat_n(' ', indent));
    }

    fn comment(&self, path: &Path) -> Option<&'a str> {
        self.comments.and_then(|store| store.get(path))
    }
}

fn quote(s: &str) -> String {
    // A string always serializes
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s.escape_default()))
}

fn scalar_text(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Null => "null".to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Number(n) => n.to_string(),
        Scalar::String(s) => quote(s),
    }
}
