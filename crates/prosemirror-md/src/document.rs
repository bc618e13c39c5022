//! Document envelopes as returned by note-taking APIs.
//!
//! An envelope carries metadata plus up to two ProseMirror trees: the
//! last viewed panel and the raw notes. Only `doc` roots are rendered.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::node::{Node, NodeKind};
use crate::service::MarkdownService;
use crate::utilities::is_blank;

/// Title used when a document has none
pub const UNTITLED: &str = "Untitled";

/// Strings and numbers are kept (numbers as their JSON text); anything
/// else reads as absent
fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A tree field is only present when it holds an object
fn node_field(object: &Map<String, Value>, key: &str) -> Option<Node> {
    object.get(key).filter(|v| v.is_object()).map(Node::from)
}

/// The panel a document was last viewed in
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct Panel {
    pub heading: Option<String>,
    pub content: Option<Node>,
}

impl From<&Value> for Panel {
    fn from(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Panel::default();
        };

        Panel {
            heading: string_field(object, "heading"),
            content: node_field(object, "content"),
        }
    }
}

impl From<Value> for Panel {
    fn from(value: Value) -> Self {
        Panel::from(&value)
    }
}

/// A document envelope.
///
/// Decoding never fails: unknown fields are ignored and mistyped ones read as
/// absent, so a broken panel still leaves the notes renderable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct Document {
    pub id: Option<String>,
    pub title: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// The envelope's `type`
    pub kind: Option<String>,
    pub notes: Option<Node>,
    pub last_viewed_panel: Option<Panel>,
}

impl From<&Value> for Document {
    fn from(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Document::default();
        };

        Document {
            id: string_field(object, "id"),
            title: string_field(object, "title"),
            created_at: string_field(object, "created_at"),
            updated_at: string_field(object, "updated_at"),
            kind: string_field(object, "type"),
            notes: node_field(object, "notes"),
            last_viewed_panel: object
                .get("last_viewed_panel")
                .filter(|v| v.is_object())
                .map(Panel::from),
        }
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Document::from(&value)
    }
}

/// A rendered document, ready to be serialized for output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedDocument {
    pub id: Option<String>,
    pub title: String,
    pub markdown: String,
    pub has_content: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn doc_root(node: Option<&Node>) -> Option<&Node> {
    node.filter(|n| n.is(&NodeKind::Doc))
}

impl Document {
    /// The tree to render: the last viewed panel's content when it is a
    /// `doc`, else the notes when they are a `doc`
    pub fn content_tree(&self) -> Option<&Node> {
        let panel = self
            .last_viewed_panel
            .as_ref()
            .and_then(|p| p.content.as_ref());

        doc_root(panel).or_else(|| doc_root(self.notes.as_ref()))
    }

    /// The title, or [`UNTITLED`] when it is absent or empty
    pub fn title_or_default(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
    }

    /// Markdown for the content tree, empty when there is none
    pub fn to_markdown(&self, service: &MarkdownService) -> String {
        self.content_tree()
            .map(|root| service.convert(root))
            .unwrap_or_default()
    }

    pub fn render(&self, service: &MarkdownService) -> RenderedDocument {
        let markdown = self.to_markdown(service);
        RenderedDocument {
            id: self.id.clone(),
            title: self.title_or_default().to_string(),
            has_content: !is_blank(&markdown),
            markdown,
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}
