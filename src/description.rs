//! Description tree structures.
//!
//! A [`DescriptionNode`] is the generic test-identity unit handed to a test
//! runner. Suite nodes (stories, scenarios, example rows and composite steps)
//! only group children; test nodes (steps and given stories) are the test
//! cases a runner counts and reports.
//!
//! Labels are sanitised before a node is created and never contain line
//! breaks. When the same label is produced more than once by a generator,
//! later nodes carry a non-zero occurrence index and their
//! [`display_name`](DescriptionNode::display_name) gains a ` [n]` suffix, so
//! every node keeps a distinct display identity.

use serde::Serialize;

/// Role of a node in the description tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// A story; children are scenarios.
    Story,
    /// A scenario; children are given stories, steps or example rows.
    Scenario,
    /// One row of a scenario's examples table; children are steps.
    ExampleRow,
    /// A step that expands to composed steps.
    CompositeStep,
    /// An executable step.
    Step {
        /// Steps type of the matching candidate, if any matched.
        steps_type: Option<String>,
        /// `true` when no candidate matched the step.
        pending: bool,
    },
    /// A story run as setup for a scenario.
    GivenStory {
        /// Path of the given story as declared.
        path: String,
    },
}

impl NodeKind {
    /// Returns `true` for kinds that count as test cases.
    #[must_use]
    pub const fn is_test(&self) -> bool {
        matches!(self, Self::Step { .. } | Self::GivenStory { .. })
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Story => "story",
            Self::Scenario => "scenario",
            Self::ExampleRow => "example row",
            Self::CompositeStep => "composite step",
            Self::Step { .. } => "step",
            Self::GivenStory { .. } => "given story",
        }
    }
}

/// A node of the description tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionNode {
    id: String,
    label: String,
    occurrence: usize,
    #[serde(flatten)]
    kind: NodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<DescriptionNode>,
}

impl DescriptionNode {
    pub(crate) fn new(id: String, label: String, occurrence: usize, kind: NodeKind) -> Self {
        Self {
            id,
            label,
            occurrence,
            kind,
            children: Vec::new(),
        }
    }

    pub(crate) fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Stable identity derived from the node's ancestry and display name.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sanitised label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// How many nodes with the same label the generator created earlier.
    #[must_use]
    pub const fn occurrence(&self) -> usize {
        self.occurrence
    }

    /// Role of the node.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Label with an occurrence suffix when the label was seen before.
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(&self.label, self.occurrence)
    }

    /// Children in creation order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    /// Returns `true` for grouping nodes.
    #[must_use]
    pub const fn is_suite(&self) -> bool {
        !self.kind.is_test()
    }

    /// Returns `true` for nodes counted as test cases.
    #[must_use]
    pub const fn is_test(&self) -> bool {
        self.kind.is_test()
    }

    /// Number of test nodes in this subtree, including this node.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|node| node.is_test()).count()
    }

    /// Depth-first, pre-order traversal starting at this node.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// First node in this subtree whose display name equals `display_name`.
    #[must_use]
    pub fn find(&self, display_name: &str) -> Option<&Self> {
        self.iter().find(|node| node.display_name() == display_name)
    }
}

impl<'a> IntoIterator for &'a DescriptionNode {
    type Item = &'a DescriptionNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over a description subtree.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a DescriptionNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a DescriptionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Remove every newline and carriage return from `text`.
///
/// ```rust
/// use storytree::description::sanitize;
///
/// assert_eq!(sanitize("Scenario with\r\nbreaks"), "Scenario withbreaks");
/// ```
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|ch| !matches!(ch, '\n' | '\r')).collect()
}

/// Display identity of a label at a given occurrence.
pub(crate) fn display_name(label: &str, occurrence: usize) -> String {
    if occurrence == 0 {
        label.to_owned()
    } else {
        format!("{label} [{}]", occurrence + 1)
    }
}
