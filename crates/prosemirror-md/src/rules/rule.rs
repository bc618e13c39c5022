//! Node filters and custom rendering rules.

use crate::node::{Node, NodeKind};
use crate::options::Options;

/// Renders a matched node from the node itself, the concatenated Markdown of
/// its children, and the active options
pub type ReplacementFn = Box<dyn Fn(&Node, &str, &Options) -> String + Send + Sync>;

/// Selects the nodes a rule or removal applies to.
///
/// Usually built from kinds: `NodeKind::CodeBlock.into()`, or an array of
/// kinds. Unknown kinds are matched with `NodeKind::from_name("mention")`.
pub enum Filter {
    Kinds(Vec<NodeKind>),
    Predicate(Box<dyn Fn(&Node) -> bool + Send + Sync>),
}

impl Filter {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Node) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Filter::Kinds(kinds) => kinds.contains(&node.kind),
            Filter::Predicate(f) => f(node),
        }
    }
}

impl From<NodeKind> for Filter {
    fn from(kind: NodeKind) -> Self {
        Filter::Kinds(vec![kind])
    }
}

impl<const N: usize> From<[NodeKind; N]> for Filter {
    fn from(kinds: [NodeKind; N]) -> Self {
        Filter::Kinds(kinds.into())
    }
}

/// Overrides the built-in rendering of every node its filter matches
pub struct Rule {
    pub filter: Filter,
    pub replacement: ReplacementFn,
}

impl Rule {
    pub fn new<F>(filter: impl Into<Filter>, replacement: F) -> Self
    where
        F: Fn(&Node, &str, &Options) -> String + Send + Sync + 'static,
    {
        Self {
            filter: filter.into(),
            replacement: Box::new(replacement),
        }
    }

    /// Render `node`, given its already rendered children
    pub fn render(&self, node: &Node, children: &str, options: &Options) -> String {
        (self.replacement)(node, children, options)
    }
}
