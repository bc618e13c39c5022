//! ProseMirror-style document nodes.
//!
//! Trees arrive as loosely-typed JSON (`{"type": ..., "content": [...],
//! "attrs": {...}, "text": ..., "marks": [...]}`). Conversion from
//! [`serde_json::Value`] never fails: every missing or mistyped field falls
//! back to an empty default, and unknown node or mark types are kept verbatim
//! so they can still be rendered (transparently) or matched by custom rules.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Upper limit on heading levels. Larger levels are treated like a missing
/// level, which keeps a bogus attribute from allocating a huge prefix.
pub const MAX_HEADING_LEVEL: usize = u16::MAX as usize;

/// Node kinds, keyed by the `type` field of the JSON node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root document container (`doc`)
    Doc,
    Heading,
    Paragraph,
    BulletList,
    OrderedList,
    ListItem,
    Text,
    HardBreak,
    CodeBlock,
    Blockquote,
    /// Any other `type` value, including the empty string when absent
    Other(String),
}

impl NodeKind {
    /// Map a JSON `type` name to a kind
    pub fn from_name(name: &str) -> Self {
        match name {
            "doc" => NodeKind::Doc,
            "heading" => NodeKind::Heading,
            "paragraph" => NodeKind::Paragraph,
            "bulletList" => NodeKind::BulletList,
            "orderedList" => NodeKind::OrderedList,
            "listItem" => NodeKind::ListItem,
            "text" => NodeKind::Text,
            "hardBreak" => NodeKind::HardBreak,
            "codeBlock" => NodeKind::CodeBlock,
            "blockquote" => NodeKind::Blockquote,
            other => NodeKind::Other(other.to_string()),
        }
    }

    /// The JSON `type` name of this kind
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Doc => "doc",
            NodeKind::Heading => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::BulletList => "bulletList",
            NodeKind::OrderedList => "orderedList",
            NodeKind::ListItem => "listItem",
            NodeKind::Text => "text",
            NodeKind::HardBreak => "hardBreak",
            NodeKind::CodeBlock => "codeBlock",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Other(name) => name,
        }
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Other(String::new())
    }
}

/// An inline style annotation on a text node
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum Mark {
    Bold,
    Italic,
    Code,
    /// Link to `target` (the mark's `attrs.href`)
    Link { target: String },
    /// Unrecognized mark type, rendered as identity
    Other(String),
}

impl From<&Value> for Mark {
    fn from(value: &Value) -> Self {
        let name = value.get("type").and_then(Value::as_str).unwrap_or("");
        match name {
            "bold" => Mark::Bold,
            "italic" => Mark::Italic,
            "code" => Mark::Code,
            "link" => Mark::Link {
                target: value
                    .get("attrs")
                    .and_then(|attrs| attrs.get("href"))
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
            },
            other => Mark::Other(other.to_string()),
        }
    }
}

impl From<Value> for Mark {
    fn from(value: Value) -> Self {
        Mark::from(&value)
    }
}

/// A node of the document tree.
///
/// Which fields are meaningful depends on [`NodeKind`]: `text` and `marks`
/// only matter for [`NodeKind::Text`], `children` for containers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct Node {
    pub kind: NodeKind,

    /// Child nodes (`content`)
    pub children: Vec<Node>,

    /// Kind-specific attributes (`attrs`), in source order
    pub attrs: IndexMap<String, Value>,

    /// Literal text payload
    pub text: String,

    /// Marks in stored order; each wraps the previous result, so the last
    /// mark ends up outermost
    pub marks: Vec<Mark>,
}

impl Node {
    /// Create an empty node of the given kind
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Create a `doc` node with the given children
    pub fn doc(children: Vec<Node>) -> Self {
        let mut node = Self::new(NodeKind::Doc);
        node.children = children;
        node
    }

    /// Create a text node
    pub fn text(content: &str) -> Self {
        Self {
            kind: NodeKind::Text,
            text: content.to_string(),
            ..Default::default()
        }
    }

    /// Create a heading node of the given level
    pub fn heading(level: usize) -> Self {
        Self::new(NodeKind::Heading).with_attr("level", Value::from(level))
    }

    /// Builder: add a child node
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: add a mark
    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }

    /// Builder: set an attribute
    pub fn with_attr(mut self, name: &str, value: Value) -> Self {
        self.attrs.insert(name.to_string(), value);
        self
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn is(&self, kind: &NodeKind) -> bool {
        &self.kind == kind
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Get a string attribute by name
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(Value::as_str)
    }

    /// Heading level: a positive integer, 1 when absent or unusable.
    ///
    /// Integral numbers, floats (truncated) and numeric strings are accepted.
    /// Levels above 6 are kept as-is up to [`MAX_HEADING_LEVEL`]; anything
    /// larger falls back to 1.
    pub fn heading_level(&self) -> usize {
        let level = match self.attr("level") {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 1.0).map(|f| f as u64)),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            _ => None,
        };

        level
            .and_then(|l| usize::try_from(l).ok())
            .filter(|l| (1..=MAX_HEADING_LEVEL).contains(l))
            .unwrap_or(1)
    }

    /// Code block language tag, empty when absent
    pub fn language(&self) -> &str {
        self.attr_str("language").unwrap_or("")
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Node::default();
        };

        let kind = object
            .get("type")
            .and_then(Value::as_str)
            .map(NodeKind::from_name)
            .unwrap_or_default();

        let children = object
            .get("content")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Node::from).collect())
            .unwrap_or_default();

        let attrs = object
            .get("attrs")
            .and_then(Value::as_object)
            .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();

        let text = object
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        let marks = object
            .get("marks")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Mark::from).collect())
            .unwrap_or_default();

        Node {
            kind,
            children,
            attrs,
            text,
            marks,
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::from(&value)
    }
}
