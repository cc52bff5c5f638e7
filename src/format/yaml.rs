//! Block-style writer.

use super::comments::{leading_lines, trailing};
use super::order::Ordering;
use super::quote::{
    StringStyle, double_quoted, key_needs_explicit, key_needs_quotes, literal_lines, string_style,
};
use super::CommentStore;
use crate::constants::{OUTPUTS_KEY, PARAMETERS_KEY, RESOURCES_KEY};
use crate::template::{Intrinsic, Mapping, Node, Path, Scalar};

const MARKER: &str = "#";

pub(super) struct YamlWriter<'a> {
    ordering: &'a Ordering,
    comments: Option<&'a CommentStore>,
    compact: bool,
    out: String,
    /// The last thing written was a `|+` literal, whose trailing blank lines are content
    trailing_keep: bool,
}

impl<'a> YamlWriter<'a> {
    pub(super) fn new(ordering: &'a Ordering, comments: Option<&'a CommentStore>, compact: bool) -> Self {
        Self {
            ordering,
            comments,
            compact,
            out: String::new(),
            trailing_keep: false,
        }
    }

    pub(super) fn finish(self) -> String {
        self.out
    }

    /// Write a whole document rooted at `root`.
    pub(super) fn document(&mut self, root: &Node) {
        let path = Path::root();
        if let Some(comment) = self.comment(&path) {
            self.out.push_str(&leading_lines(comment, MARKER, 0));
        }
        self.node(root, &path, 0);
    }

    /// Write `node` as a standalone block at `indent`.
    pub(super) fn node(&mut self, node: &Node, path: &Path, indent: usize) {
        match node {
            Node::Mapping(map) if !map.is_empty() => self.mapping(map, path, indent),
            Node::Sequence(items) if !items.is_empty() => self.sequence(items, path, indent),
            other => {
                self.pad(indent);
                // Drop the leading space `value` writes after a marker
                let start = self.out.len();
                self.value(other, path, indent, None, true);
                if self.out[start..].starts_with(' ') {
                    self.out.remove(start);
                }
            }
        }
    }

    fn mapping(&mut self, map: &Mapping, path: &Path, indent: usize) {
        let keys = self.ordering.keys(path, map.keys().map(String::as_str));
        let separated = self.separates(path);
        for (i, key) in keys.into_iter().enumerate() {
            if i > 0 && separated && !self.trailing_keep {
                self.out.push('\n');
            }
            self.entry(key, &map[key], &path.key(key), indent);
        }
    }

    fn sequence(&mut self, items: &[Node], path: &Path, indent: usize) {
        for (i, item) in items.iter().enumerate() {
            self.item(item, &path.index(i), indent);
        }
    }

    /// `key: value` at `indent`; `path` is the path of the value.
    pub(super) fn entry(&mut self, key: &str, value: &Node, path: &Path, indent: usize) {
        let inline = is_scalar_like(value);
        let comment = self.comment(path);
        if let Some(comment) = comment
            && !inline
        {
            self.out.push_str(&leading_lines(comment, MARKER, indent));
        }
        self.pad(indent);
        let repr = key_repr(key);
        if key_needs_explicit(&repr) {
            self.out.push_str("? ");
            self.out.push_str(&repr);
            self.out.push('\n');
            self.pad(indent);
        } else {
            self.out.push_str(&repr);
        }
        self.out.push(':');
        self.value(value, path, indent, comment.filter(|_| inline), true);
    }

    /// `- value` at `indent`; `path` is the path of the item.
    pub(super) fn item(&mut self, value: &Node, path: &Path, indent: usize) {
        let inline = is_scalar_like(value);
        let comment = self.comment(path);
        if let Some(comment) = comment
            && !inline
        {
            self.out.push_str(&leading_lines(comment, MARKER, indent));
        }

        let nested = match value {
            Node::Mapping(map) if short_form(value).is_none() => Some(map.is_empty()),
            Node::Sequence(items) => Some(items.is_empty()),
            _ => None,
        };
        if nested == Some(false) {
            // Render the block one level in, then put the dash on its first line
            let start = self.out.len();
            match value {
                Node::Mapping(map) => self.mapping(map, path, indent + 2),
                Node::Sequence(items) => self.sequence(items, path, indent + 2),
                Node::Scalar(_) => unreachable!("only collections nest"),
            }
            self.out.replace_range(start + indent..start + indent + 2, "- ");
            return;
        }

        self.pad(indent);
        self.out.push('-');
        self.value(value, path, indent, comment.filter(|_| inline), true);
    }

    /// Everything after a `key:` or `-` marker, through the end of the node.
    fn value(&mut self, node: &Node, path: &Path, indent: usize, comment: Option<&str>, allow_short: bool) {
        if allow_short && let Some(intrinsic) = short_form(node) {
            self.intrinsic(intrinsic, path, indent, comment);
            return;
        }

        match node {
            Node::Scalar(scalar) => {
                self.out.push(' ');
                self.scalar(scalar, indent, comment);
            }
            Node::Mapping(map) if map.is_empty() => self.inline_text(" {}", comment),
            Node::Sequence(items) if items.is_empty() => self.inline_text(" []", comment),
            Node::Mapping(map) => {
                self.out.push('\n');
                self.mapping(map, path, indent + 2);
            }
            Node::Sequence(items) => {
                self.out.push('\n');
                self.sequence(items, path, indent + 2);
            }
        }
    }

    fn intrinsic(&mut self, intrinsic: Intrinsic<'_>, path: &Path, indent: usize, comment: Option<&str>) {
        self.out.push_str(" !");
        self.out.push_str(intrinsic.name);

        if let Some(dotted) = dotted_get_att(&intrinsic) {
            self.out.push(' ');
            self.scalar(&Scalar::String(dotted), indent, comment);
            return;
        }

        // A node carries one tag, so a nested call keeps its explicit key
        let body = path.key(&intrinsic.key());
        self.value(intrinsic.value, &body, indent, comment, false);
    }

    fn scalar(&mut self, scalar: &Scalar, indent: usize, comment: Option<&str>) {
        let text = match scalar {
            Scalar::Null => "null".to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::String(s) => match string_style(s) {
                StringStyle::Plain => s.clone(),
                StringStyle::DoubleQuoted => double_quoted(s),
                StringStyle::Literal(chomping) => {
                    self.literal(s, chomping, indent, comment);
                    return;
                }
            },
        };
        self.inline_text(&text, comment);
    }

    fn literal(&mut self, s: &str, chomping: &'static str, indent: usize, comment: Option<&str>) {
        self.out.push('|');
        self.out.push_str(chomping);
        if let Some(comment) = comment {
            self.out.push_str(&trailing(comment, MARKER));
        }
        self.out.push('\n');
        for line in literal_lines(s) {
            if !line.is_empty() {
                self.pad(indent + 2);
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
        self.trailing_keep = chomping == "+";
    }

    fn inline_text(&mut self, text: &str, comment: Option<&str>) {
        self.out.push_str(text);
        if let Some(comment) = comment {
            self.out.push_str(&trailing(comment, MARKER));
        }
        self.out.push('\n');
        self.trailing_keep = false;
    }

    fn pad(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat_n(' ', indent));
    }

    fn comment(&self, path: &Path) -> Option<&'a str> {
        self.comments.and_then(|store| store.get(path))
    }

    /// Top-level sections and the entries of Parameters, Resources and Outputs
    /// are separated by a blank line.
    fn separates(&self, path: &Path) -> bool {
        if self.compact {
            return false;
        }
        path.is_empty()
            || (path.len() == 1
                && matches!(path.key_at(0), Some(PARAMETERS_KEY | RESOURCES_KEY | OUTPUTS_KEY)))
    }
}

/// The key as written before `:`.
pub(super) fn key_repr(key: &str) -> String {
    if key_needs_quotes(key) { double_quoted(key) } else { key.to_string() }
}

/// The intrinsic `node` renders as a short tag, if any.
///
/// `Fn::GetAtt` with a scalar argument stays explicit: the short tag would
/// read back as the two-element sequence form.
fn short_form(node: &Node) -> Option<Intrinsic<'_>> {
    node.as_intrinsic().filter(|intrinsic| !(intrinsic.name == "GetAtt" && intrinsic.value.as_scalar().is_some()))
}

/// `Resource.Attribute` for a `Fn::GetAtt: [Resource, Attribute]` call that can use the dotted form.
fn dotted_get_att(intrinsic: &Intrinsic<'_>) -> Option<String> {
    if intrinsic.name != "GetAtt" {
        return None;
    }
    match intrinsic.value.as_sequence()? {
        [resource, attribute] => {
            let (resource, attribute) = (resource.as_str()?, attribute.as_str()?);
            (!resource.contains('.')).then(|| format!("{resource}.{attribute}"))
        }
        _ => None,
    }
}

/// Whether `node` renders on the same line as its key or dash.
fn is_scalar_like(node: &Node) -> bool {
    match node {
        Node::Scalar(_) => true,
        _ if node.is_empty_collection() => true,
        _ => short_form(node).is_some_and(|intrinsic| {
            dotted_get_att(&intrinsic).is_some()
                || matches!(intrinsic.value, Node::Scalar(_))
                || (intrinsic.value.is_empty_collection() && intrinsic.value.as_intrinsic().is_none())
        }),
    }
}
