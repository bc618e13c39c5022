//! # prosemirror-md
//!
//! Convert ProseMirror JSON document trees to Markdown.
//!
//! ## Design
//!
//! The input is the loosely-typed JSON a rich-text editor stores: a `doc`
//! node with nested block nodes, and text nodes carrying stacked marks.
//! Conversion is total:
//!
//! - **No schema validation**: missing or mistyped fields fall back to empty
//!   defaults
//! - **Forward compatible**: unknown node types render their children,
//!   unknown marks are ignored
//! - **Pure**: every call is a single read-only walk returning a fresh string
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//!
//! let tree = json!({
//!     "type": "doc",
//!     "content": [
//!         {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Hi"}]},
//!         {"type": "paragraph", "content": [
//!             {"type": "text", "text": "bold", "marks": [{"type": "bold"}]}
//!         ]}
//!     ]
//! });
//!
//! assert_eq!(prosemirror_md::convert(&tree), "## Hi\n\n**bold**");
//! ```
//!
//! Use [`MarkdownService`] to change delimiters or to override how
//! particular node types render:
//!
//! ```rust
//! use prosemirror_md::{MarkdownService, NodeKind, Rule};
//! use serde_json::json;
//!
//! let mut service = MarkdownService::new();
//! service.add_rule("mention", Rule::new(NodeKind::from_name("mention"), |node, _, _| {
//!     format!("@{}", node.attr_str("label").unwrap_or(""))
//! }));
//!
//! let tree = json!({"type": "doc", "content": [
//!     {"type": "paragraph", "content": [{"type": "mention", "attrs": {"label": "ada"}}]}
//! ]});
//! assert_eq!(service.convert_value(&tree), "@ada");
//! ```

pub mod document;
pub mod node;
mod options;
mod render;
mod rules;
mod service;
mod utilities;

pub use document::{Document, Panel, RenderedDocument};
pub use node::{Mark, Node, NodeKind};
pub use options::Options;
pub use rules::{Filter, ReplacementFn, Rule};
pub use service::MarkdownService;
pub use utilities::{is_blank, preview, trim_whitespace};

/// Error type for prosemirror-md operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Convert a JSON document tree to Markdown with default options.
///
/// Returns an empty string for `null`, non-object values and roots without
/// children. Never fails.
pub fn convert(root: &serde_json::Value) -> String {
    MarkdownService::new().convert_value(root)
}
