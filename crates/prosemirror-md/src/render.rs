//! Render a ProseMirror node tree to Markdown
//!
//! Each node renders to an owned string built from the rendered strings of
//! its children. Block rules append their own trailing blank line; the
//! caller trims the final result once at the top level.

use tracing::trace;

use crate::node::{Mark, Node, NodeKind};
use crate::options::Options;
use crate::rules::{Override, Rules};
use crate::utilities::trim_whitespace;

/// Tree walker carrying the active options and rule table
pub(crate) struct Renderer<'a> {
    options: &'a Options,
    rules: &'a Rules,
}

impl<'a> Renderer<'a> {
    pub(crate) fn new(options: &'a Options, rules: &'a Rules) -> Self {
        Self { options, rules }
    }

    /// Render a root node: empty for a root without children, trimmed
    /// otherwise
    pub(crate) fn render_root(&self, root: &Node) -> String {
        if root.children.is_empty() {
            return String::new();
        }

        trim_whitespace(&self.render(root)).to_string()
    }

    /// Render a single node
    pub(crate) fn render(&self, node: &Node) -> String {
        if !self.rules.is_empty() {
            match self.rules.override_for(node) {
                Some(Override::Render(rule)) => {
                    trace!(kind = node.kind.as_str(), "applying custom rule");
                    let children = self.render_children(node);
                    return rule.render(node, &children, self.options);
                }
                Some(Override::Remove) => {
                    trace!(kind = node.kind.as_str(), "removing node");
                    return String::new();
                }
                None => {}
            }
        }

        match &node.kind {
            NodeKind::Heading => self.render_heading(node),
            NodeKind::Paragraph => {
                let content = self.render_children(node);
                if content.is_empty() {
                    "\n".to_string()
                } else {
                    content + "\n\n"
                }
            }
            NodeKind::BulletList => self.render_list(node, false),
            NodeKind::OrderedList => self.render_list(node, true),
            NodeKind::ListItem | NodeKind::Doc => self.render_children(node),
            NodeKind::Text => self.apply_marks(node),
            NodeKind::HardBreak => "\n".to_string(),
            NodeKind::CodeBlock => {
                let fence = &self.options.fence;
                format!(
                    "{fence}{}\n{}\n{fence}\n\n",
                    node.language(),
                    self.render_children(node)
                )
            }
            NodeKind::Blockquote => {
                let content = self.render_children(node);
                let quoted = trim_whitespace(&content)
                    .split('\n')
                    .map(|line| format!("> {line}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                quoted + "\n\n"
            }
            NodeKind::Other(name) => {
                // Unknown kinds are transparent
                trace!(kind = %name, "rendering children of unrecognized node");
                self.render_children(node)
            }
        }
    }

    fn render_children(&self, node: &Node) -> String {
        node.children.iter().map(|child| self.render(child)).collect()
    }

    fn render_heading(&self, node: &Node) -> String {
        let content = self.render_children(node);
        format!(
            "{} {}\n\n",
            "#".repeat(node.heading_level()),
            trim_whitespace(&content)
        )
    }

    /// Render a bullet or ordered list.
    ///
    /// Only `listItem` children produce lines; blank items are dropped. The
    /// ordinal is the child's position among all children, so skipped
    /// children still advance the numbering.
    fn render_list(&self, node: &Node, ordered: bool) -> String {
        let mut lines = Vec::new();

        for (i, item) in node.children.iter().enumerate() {
            if !item.is(&NodeKind::ListItem) {
                continue;
            }

            let rendered = self.render(item);
            let content = trim_whitespace(&rendered);
            if content.is_empty() {
                continue;
            }

            if ordered {
                lines.push(format!("{}. {}", i + 1, content));
            } else {
                lines.push(format!("{} {}", self.options.bullet_list_marker, content));
            }
        }

        if lines.is_empty() {
            String::new()
        } else {
            lines.join("\n") + "\n\n"
        }
    }

    /// Wrap a text node's payload in its marks, in stored order
    fn apply_marks(&self, node: &Node) -> String {
        let options = self.options;
        node.marks
            .iter()
            .fold(node.text.clone(), |text, mark| match mark {
                Mark::Bold => {
                    let strong = &options.strong_delimiter;
                    format!("{strong}{text}{strong}")
                }
                Mark::Italic => {
                    let em = options.em_delimiter;
                    format!("{em}{text}{em}")
                }
                Mark::Code => {
                    let tick = options.code_delimiter;
                    format!("{tick}{text}{tick}")
                }
                Mark::Link { target } => format!("[{text}]({target})"),
                Mark::Other(_) => text,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn render(value: Value) -> String {
        let options = Options::default();
        let rules = Rules::new();
        Renderer::new(&options, &rules).render(&Node::from(value))
    }

    fn text(s: &str) -> Value {
        json!({"type": "text", "text": s})
    }

    fn item(s: &str) -> Value {
        json!({"type": "listItem", "content": [{"type": "paragraph", "content": [text(s)]}]})
    }

    #[test]
    fn test_heading() {
        let result = render(json!({
            "type": "heading",
            "attrs": {"level": 2},
            "content": [text("Hi")]
        }));
        assert_eq!(result, "## Hi\n\n");
    }

    #[test]
    fn test_heading_defaults_and_trims() {
        let result = render(json!({"type": "heading", "content": [text("  Title ")]}));
        assert_eq!(result, "# Title\n\n");
    }

    #[test]
    fn test_heading_unclamped() {
        let result = render(json!({"type": "heading", "attrs": {"level": 8}, "content": [text("Deep")]}));
        assert_eq!(result, "######## Deep\n\n");
    }

    #[test]
    fn test_empty_heading() {
        assert_eq!(render(json!({"type": "heading"})), "# \n\n");
    }

    #[test]
    fn test_paragraph() {
        let result = render(json!({"type": "paragraph", "content": [text("a"), text("b")]}));
        assert_eq!(result, "ab\n\n");
    }

    #[test]
    fn test_empty_paragraph() {
        assert_eq!(render(json!({"type": "paragraph"})), "\n");
        assert_eq!(render(json!({"type": "paragraph", "content": []})), "\n");
    }

    #[test]
    fn test_whitespace_paragraph_is_kept() {
        assert_eq!(
            render(json!({"type": "paragraph", "content": [text(" ")]})),
            " \n\n"
        );
    }

    #[test]
    fn test_bullet_list() {
        let result = render(json!({"type": "bulletList", "content": [item("One"), item("Two")]}));
        assert_eq!(result, "- One\n- Two\n\n");
    }

    #[test]
    fn test_ordered_list() {
        let result = render(json!({
            "type": "orderedList",
            "content": [
                {"type": "listItem", "content": [text("a")]},
                {"type": "listItem", "content": [text("b")]}
            ]
        }));
        assert_eq!(result, "1. a\n2. b\n\n");
    }

    #[test]
    fn test_ordered_list_counts_positions() {
        let result = render(json!({
            "type": "orderedList",
            "content": [item("a"), {"type": "paragraph", "content": [text("skip")]}, item(""), item("d")]
        }));
        assert_eq!(result, "1. a\n4. d\n\n");
    }

    #[test]
    fn test_list_skips_non_items() {
        let result = render(json!({
            "type": "bulletList",
            "content": [text("loose"), null, item("kept")]
        }));
        assert_eq!(result, "- kept\n\n");
    }

    #[test]
    fn test_list_without_content() {
        assert_eq!(render(json!({"type": "bulletList"})), "");
        assert_eq!(
            render(json!({"type": "orderedList", "content": [item("  ")]})),
            ""
        );
    }

    #[test]
    fn test_list_item_not_trimmed() {
        let result = render(json!({"type": "listItem", "content": [text(" a "), text("b")]}));
        assert_eq!(result, " a b");
    }

    #[test]
    fn test_nested_list_item_text() {
        let result = render(json!({
            "type": "bulletList",
            "content": [{
                "type": "listItem",
                "content": [
                    {"type": "paragraph", "content": [text("outer")]},
                    {"type": "bulletList", "content": [item("inner")]}
                ]
            }]
        }));
        assert_eq!(result, "- outer\n\n- inner\n\n");
    }

    #[test]
    fn test_hard_break() {
        let result = render(json!({
            "type": "paragraph",
            "content": [text("a"), {"type": "hardBreak"}, text("b")]
        }));
        assert_eq!(result, "a\nb\n\n");
    }

    #[test]
    fn test_code_block() {
        let result = render(json!({
            "type": "codeBlock",
            "attrs": {"language": "rust"},
            "content": [text("let x = 1;")]
        }));
        assert_eq!(result, "```rust\nlet x = 1;\n```\n\n");
    }

    #[test]
    fn test_code_block_without_language() {
        let result = render(json!({"type": "codeBlock", "content": [text("x")]}));
        assert_eq!(result, "```\nx\n```\n\n");
    }

    #[test]
    fn test_blockquote() {
        let result = render(json!({
            "type": "blockquote",
            "content": [{"type": "paragraph", "content": [text("line1"), {"type": "hardBreak"}, text("line2")]}]
        }));
        assert_eq!(result, "> line1\n> line2\n\n");
    }

    #[test]
    fn test_blockquote_keeps_blank_lines() {
        let result = render(json!({
            "type": "blockquote",
            "content": [
                {"type": "paragraph", "content": [text("a")]},
                {"type": "paragraph", "content": [text("b")]}
            ]
        }));
        assert_eq!(result, "> a\n> \n> b\n\n");
    }

    #[test]
    fn test_empty_blockquote() {
        assert_eq!(render(json!({"type": "blockquote"})), "> \n\n");
    }

    #[test]
    fn test_unknown_kind_is_transparent() {
        assert_eq!(render(json!({"type": "mention", "content": [text("z")]})), "z");
        assert_eq!(render(json!({"content": [text("z")]})), "z");
        assert_eq!(render(json!({"type": "mention"})), "");
    }

    #[test]
    fn test_text_without_payload() {
        assert_eq!(render(json!({"type": "text"})), "");
    }

    #[test]
    fn test_single_marks() {
        let marked = |mark: Value| render(json!({"type": "text", "text": "x", "marks": [mark]}));
        assert_eq!(marked(json!({"type": "bold"})), "**x**");
        assert_eq!(marked(json!({"type": "italic"})), "*x*");
        assert_eq!(marked(json!({"type": "code"})), "`x`");
        assert_eq!(
            marked(json!({"type": "link", "attrs": {"href": "https://a.b"}})),
            "[x](https://a.b)"
        );
        assert_eq!(marked(json!({"type": "link"})), "[x]()");
        assert_eq!(marked(json!({"type": "strike"})), "x");
    }

    #[test]
    fn test_mark_order() {
        let result = render(json!({
            "type": "text",
            "text": "x",
            "marks": [{"type": "bold"}, {"type": "italic"}]
        }));
        assert_eq!(result, "***x***");

        let result = render(json!({
            "type": "text",
            "text": "x",
            "marks": [{"type": "code"}, {"type": "link", "attrs": {"href": "u"}}]
        }));
        assert_eq!(result, "[`x`](u)");
    }

    #[test]
    fn test_repeated_marks_apply_twice() {
        let result = render(json!({
            "type": "text",
            "text": "x",
            "marks": [{"type": "bold"}, {"type": "bold"}]
        }));
        assert_eq!(result, "****x****");
    }

    #[test]
    fn test_custom_delimiters() {
        let options = Options {
            bullet_list_marker: '*',
            em_delimiter: '_',
            strong_delimiter: "__".to_string(),
            fence: "~~~".to_string(),
            ..Default::default()
        };
        let rules = Rules::new();
        let renderer = Renderer::new(&options, &rules);

        let node = Node::text("x").with_mark(Mark::Bold).with_mark(Mark::Italic);
        assert_eq!(renderer.render(&node), "___x___");

        let list = Node::from(json!({"type": "bulletList", "content": [item("a")]}));
        assert_eq!(renderer.render(&list), "* a\n\n");

        let code = Node::new(NodeKind::CodeBlock).with_child(Node::text("x"));
        assert_eq!(renderer.render(&code), "~~~\nx\n~~~\n\n");
    }

    #[test]
    fn test_render_root() {
        let options = Options::default();
        let rules = Rules::new();
        let renderer = Renderer::new(&options, &rules);

        assert_eq!(renderer.render_root(&Node::default()), "");
        assert_eq!(renderer.render_root(&Node::text("orphan")), "");

        let doc = Node::doc(vec![Node::heading(1).with_child(Node::text("T"))]);
        assert_eq!(renderer.render_root(&doc), "# T");
    }
}
