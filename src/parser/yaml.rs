//! YAML decoding on top of the `saphyr-parser` event stream.
//!
//! The event stream keeps scalar styles and tags, so typing of plain scalars
//! and the rewrite of short-form intrinsic tags (`!Ref`, `!GetAtt`, ...) into
//! explicit single-key mappings both happen here.

use saphyr_parser::{Event, Parser, ScalarStyle, Span, StrInput, Tag};
use std::borrow::Borrow;
use std::collections::HashMap;
use tracing::{trace, warn};

use super::scalar::resolve_plain;
use crate::core::{CfnError, CfnResult};
use crate::template::intrinsic::{explicit_key, is_short_tag};
use crate::template::{Mapping, Node, Scalar};

/// Core-schema handle as the scanner resolves `!!`.
const CORE_SCHEMA_PREFIX: &str = "tag:yaml.org,2002:";

/// Decode the first YAML document of `text` into a node tree.
pub(super) fn decode(text: &str) -> CfnResult<Node> {
    Decoder::new(text).document()
}

/// How a node's tag affects decoding.
#[derive(Debug, PartialEq, Eq)]
enum TagKind {
    /// Untagged, or a tag with no effect on the tree
    None,
    /// `!!str`
    ForceString,
    /// A recognized intrinsic short tag, by name
    Intrinsic(String),
}

struct Decoder<'a> {
    parser: Parser<'a, StrInput<'a>>,
    anchors: HashMap<usize, Node>,
}

impl<'a> Decoder<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            parser: Parser::new_from_str(text),
            anchors: HashMap::new(),
        }
    }

    /// Next meaningful event; end of input here means a truncated stream.
    fn next(&mut self) -> CfnResult<(Event<'a>, Span)> {
        loop {
            match self.parser.next_event() {
                Some(Ok((Event::Nothing, _))) => {}
                Some(Ok(event)) => return Ok(event),
                Some(Err(e)) => {
                    return Err(CfnError::Syntax {
                        message: e.to_string(),
                    });
                }
                None => {
                    return Err(CfnError::Syntax {
                        message: "unexpected end of input".to_string(),
                    });
                }
            }
        }
    }

    /// Decode the root node of the first document.
    ///
    /// The rest of the stream is still scanned so that malformed trailing text
    /// is a syntax error; well-formed later documents are discarded.
    fn document(&mut self) -> CfnResult<Node> {
        let root = loop {
            let (event, span) = self.next()?;
            match event {
                Event::StreamStart | Event::DocumentStart(_) => {}
                Event::StreamEnd | Event::DocumentEnd => {
                    return Err(CfnError::Structure {
                        reason: "template is empty".to_string(),
                    });
                }
                event => break self.node(event, span)?,
            }
        };
        self.drain()?;
        Ok(root)
    }

    /// Consume events through `StreamEnd`.
    fn drain(&mut self) -> CfnResult<()> {
        let mut skipped = 0usize;
        loop {
            let (event, _) = self.next()?;
            match event {
                Event::StreamEnd => break,
                Event::DocumentStart(_) => skipped += 1,
                _ => {}
            }
        }
        if skipped > 0 {
            trace!("Ignored {skipped} documents after the first");
        }
        Ok(())
    }

    fn node(&mut self, event: Event<'a>, span: Span) -> CfnResult<Node> {
        match event {
            Event::Scalar(value, style, anchor, tag) => {
                let node = scalar_node(&value, style, tag_kind(tag.as_ref(), span));
                self.remember(anchor, &node);
                Ok(node)
            }
            Event::SequenceStart(anchor, tag) => {
                let kind = tag_kind(tag.as_ref(), span);
                let mut items = Vec::new();
                loop {
                    let (event, span) = self.next()?;
                    if matches!(event, Event::SequenceEnd) {
                        break;
                    }
                    items.push(self.node(event, span)?);
                }
                let node = wrap(Node::Sequence(items), kind);
                self.remember(anchor, &node);
                Ok(node)
            }
            Event::MappingStart(anchor, tag) => {
                let kind = tag_kind(tag.as_ref(), span);
                let map = self.mapping()?;
                let node = wrap(Node::Mapping(map), kind);
                self.remember(anchor, &node);
                Ok(node)
            }
            Event::Alias(id) => self.anchors.get(&id).cloned().ok_or_else(|| CfnError::Syntax {
                message: format!("unknown alias at {}", position(span)),
            }),
            other => Err(CfnError::Syntax {
                message: format!("unexpected {other:?} at {}", position(span)),
            }),
        }
    }

    /// Entries up to the matching `MappingEnd`.
    fn mapping(&mut self) -> CfnResult<Mapping> {
        let mut map = Mapping::new();
        loop {
            let (event, key_span) = self.next()?;
            let key = match event {
                Event::MappingEnd => return Ok(map),
                Event::Scalar(value, _, anchor, _) => {
                    let key = value.into_owned();
                    self.remember(anchor, &Node::string(key.clone()));
                    key
                }
                Event::Alias(id) => match self.anchors.get(&id) {
                    Some(Node::Scalar(Scalar::String(s))) => s.clone(),
                    Some(Node::Scalar(other)) => other.to_string(),
                    _ => return Err(non_scalar_key(key_span)),
                },
                Event::SequenceStart(..) | Event::MappingStart(..) => {
                    return Err(non_scalar_key(key_span));
                }
                other => {
                    return Err(CfnError::Syntax {
                        message: format!("unexpected {other:?} at {}", position(key_span)),
                    });
                }
            };

            if map.contains_key(&key) {
                return Err(CfnError::Syntax {
                    message: format!("duplicate key '{key}' at {}", position(key_span)),
                });
            }

            let (event, span) = self.next()?;
            let value = self.node(event, span)?;
            map.insert(key, value);
        }
    }

    fn remember(&mut self, anchor: usize, node: &Node) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
    }
}

fn scalar_node(value: &str, style: ScalarStyle, kind: TagKind) -> Node {
    let scalar = match (&kind, style) {
        (TagKind::ForceString, _) => Scalar::String(value.to_string()),
        (_, ScalarStyle::Plain) => resolve_plain(value),
        _ => Scalar::String(value.to_string()),
    };

    // `!GetAtt Resource.Attribute` splits on the first dot
    if let TagKind::Intrinsic(name) = &kind
        && name == "GetAtt"
        && let Scalar::String(s) = &scalar
        && let Some((resource, attribute)) = s.split_once('.')
    {
        let parts = vec![Node::string(resource), Node::string(attribute)];
        return wrap(Node::Sequence(parts), kind);
    }

    wrap(Node::Scalar(scalar), kind)
}

fn wrap(node: Node, kind: TagKind) -> Node {
    match kind {
        TagKind::Intrinsic(name) => {
            let mut map = Mapping::new();
            map.insert(explicit_key(&name), node);
            Node::Mapping(map)
        }
        TagKind::None | TagKind::ForceString => node,
    }
}

fn tag_kind<T: Borrow<Tag>>(tag: Option<&T>, span: Span) -> TagKind {
    let Some(tag) = tag else {
        return TagKind::None;
    };
    let tag: &Tag = tag.borrow();
    let full = format!("{}{}", tag.handle, tag.suffix);

    if full == "!!str" || full == format!("{CORE_SCHEMA_PREFIX}str") {
        return TagKind::ForceString;
    }
    if full.starts_with("!!") || full.starts_with(CORE_SCHEMA_PREFIX) {
        trace!("Ignoring core schema tag {full}");
        return TagKind::None;
    }

    let name = full.strip_prefix('!').unwrap_or(&full);
    if is_short_tag(name) {
        TagKind::Intrinsic(name.to_string())
    } else {
        warn!("Dropping unknown tag '{full}' at {}", position(span));
        TagKind::None
    }
}

fn non_scalar_key(span: Span) -> CfnError {
    CfnError::Structure {
        reason: format!("mapping key at {} is not a scalar", position(span)),
    }
}

fn position(span: Span) -> String {
    format!("line {} column {}", span.start.line(), span.start.col() + 1)
}
