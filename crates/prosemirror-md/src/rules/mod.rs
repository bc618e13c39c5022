//! Custom rule table consulted before the built-in node rendering.

mod rule;

pub use rule::{Filter, ReplacementFn, Rule};

use indexmap::IndexMap;

use crate::node::Node;

/// What the rule table says about a node
pub(crate) enum Override<'a> {
    Render(&'a Rule),
    Remove,
}

/// User rules: keyed replacements, checked in insertion order, then removals
#[derive(Default)]
pub struct Rules {
    custom_rules: IndexMap<String, Rule>,
    remove_filters: Vec<Filter>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom rule; a rule already stored under `key` is replaced
    /// in place
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    pub fn remove(&mut self, filter: impl Into<Filter>) {
        self.remove_filters.push(filter.into());
    }

    pub fn is_empty(&self) -> bool {
        self.custom_rules.is_empty() && self.remove_filters.is_empty()
    }

    /// The override for a node, if any. A matching custom rule wins over a
    /// matching removal.
    pub(crate) fn override_for(&self, node: &Node) -> Option<Override<'_>> {
        if let Some(rule) = self.custom_rules.values().find(|r| r.filter.matches(node)) {
            return Some(Override::Render(rule));
        }

        self.remove_filters
            .iter()
            .any(|filter| filter.matches(node))
            .then_some(Override::Remove)
    }
}
