//! MarkdownService - the main entry point for tree to Markdown conversion.

use serde_json::Value;
use tracing::debug_span;

use crate::node::Node;
use crate::options::Options;
use crate::render::Renderer;
use crate::rules::{Filter, Rule, Rules};
use crate::Result;

/// The main service for converting ProseMirror trees to Markdown
#[derive(Default)]
pub struct MarkdownService {
    options: Options,
    rules: Rules,
}

impl MarkdownService {
    /// Create a new MarkdownService with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MarkdownService with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Convert a node tree to Markdown.
    ///
    /// A root without children yields an empty string; otherwise the rendered
    /// tree is trimmed.
    pub fn convert(&self, root: &Node) -> String {
        let _span = debug_span!("convert", kind = root.kind.as_str()).entered();
        Renderer::new(&self.options, &self.rules).render_root(root)
    }

    /// Convert a JSON tree to Markdown. Never fails: values that are not
    /// objects convert to an empty string.
    pub fn convert_value(&self, root: &Value) -> String {
        self.convert(&Node::from(root))
    }

    /// Parse JSON text and convert it to Markdown
    pub fn convert_str(&self, json: &str) -> Result<String> {
        let root: Value = serde_json::from_str(json)?;
        Ok(self.convert_value(&root))
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Add a custom rule, replacing any rule stored under the same key
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Drop nodes matching the filter from the output
    pub fn remove(&mut self, filter: impl Into<Filter>) -> &mut Self {
        self.rules.remove(filter);
        self
    }
}
