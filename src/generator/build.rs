//! Recursive construction of a single description tree.

use std::sync::Arc;

use camino::Utf8Path;
use tracing::trace;

use crate::description::{DescriptionNode, NodeKind, display_name, sanitize};
use crate::error::DescriptionError;
use crate::hasher::NodeHasher;
use crate::keywords::Keywords;
use crate::model::{Scenario, Story};
use crate::steps::{StepCandidate, StepRegistry};
use crate::uniquefier::Transaction;

/// Composite steps nested deeper than this are kept as plain steps.
const MAX_COMPOSITE_DEPTH: usize = 8;

/// Working state for one generator call.
///
/// Display identities are claimed through a uniquefier transaction; they and
/// the test case count are kept by [`Build::settle`] only when the call
/// succeeds.
pub(super) struct Build<'a> {
    registry: &'a StepRegistry,
    keywords: &'a Keywords,
    claims: Transaction<'a>,
    test_cases: usize,
}

impl<'a> Build<'a> {
    pub(super) fn new(
        registry: &'a StepRegistry,
        keywords: &'a Keywords,
        claims: Transaction<'a>,
    ) -> Self {
        Self {
            registry,
            keywords,
            claims,
            test_cases: 0,
        }
    }

    /// Commit the claims of a successful call and return its test case count.
    /// A failed call's claims are rolled back.
    pub(super) fn settle(
        self,
        outcome: Result<DescriptionNode, DescriptionError>,
    ) -> Result<(DescriptionNode, usize), DescriptionError> {
        let node = outcome?;
        self.claims.commit();
        Ok((node, self.test_cases))
    }

    pub(super) fn story(&mut self, story: &Story) -> Result<DescriptionNode, DescriptionError> {
        let mut node = self.node(NodeKind::Story, &story.name, None)?;
        let id = node.id().to_owned();
        for scenario in &story.scenarios {
            let child = self.scenario(scenario, Some(&id))?;
            node.push_child(child);
        }
        Ok(node)
    }

    pub(super) fn scenario(
        &mut self,
        scenario: &Scenario,
        parent: Option<&str>,
    ) -> Result<DescriptionNode, DescriptionError> {
        let title = prefixed(&self.keywords.scenario, &scenario.title);
        let mut node = self.node(NodeKind::Scenario, &title, parent)?;
        let id = node.id().to_owned();

        for path in scenario.given_story_paths() {
            if let Some(child) = self.given_story(path, &id)? {
                node.push_child(child);
            }
        }

        match scenario.populated_examples() {
            Some(table) => {
                for row in table.rows() {
                    let label = prefixed(&self.keywords.examples_table_row, &row.to_string());
                    let mut row_node = self.node(NodeKind::ExampleRow, &label, Some(&id))?;
                    self.steps(&scenario.steps, &mut row_node, 0)?;
                    node.push_child(row_node);
                }
            }
            None => self.steps(&scenario.steps, &mut node, 0)?,
        }
        Ok(node)
    }

    fn given_story(
        &mut self,
        path: &str,
        parent: &str,
    ) -> Result<Option<DescriptionNode>, DescriptionError> {
        if path.trim().is_empty() {
            trace!("skipping blank given story path");
            return Ok(None);
        }
        let name = Utf8Path::new(path).file_name().unwrap_or(path);
        let kind = NodeKind::GivenStory {
            path: path.to_owned(),
        };
        self.node(kind, name, Some(parent)).map(Some)
    }

    /// Append a node for each non-ignorable step to `parent`.
    fn steps(
        &mut self,
        steps: &[String],
        parent: &mut DescriptionNode,
        depth: usize,
    ) -> Result<(), DescriptionError> {
        let keywords: &'a Keywords = self.keywords;
        let parent_id = parent.id().to_owned();
        let mut previous_start: Option<&'a str> = None;
        for step in steps {
            if keywords.is_ignorable(step) {
                trace!(step = %step, "dropping ignorable step");
                continue;
            }
            if sanitize(first_line(step)).is_empty() {
                trace!("dropping step with a blank first line");
                continue;
            }
            let child = self.step(step, &parent_id, previous_start, depth)?;
            parent.push_child(child);
            if let Some(word) = keywords.start_word(step) {
                previous_start = Some(word);
            }
        }
        Ok(())
    }

    fn step(
        &mut self,
        step: &str,
        parent: &str,
        previous_start: Option<&str>,
        depth: usize,
    ) -> Result<DescriptionNode, DescriptionError> {
        let label = first_line(step);
        let Some(candidate) = self.resolve(step, previous_start) else {
            trace!(step = %label, "no candidate matches step; marking it pending");
            let kind = NodeKind::Step {
                steps_type: None,
                pending: true,
            };
            return self.node(kind, label, Some(parent));
        };

        let composed = candidate.composed_steps();
        if composed.is_empty() || depth >= MAX_COMPOSITE_DEPTH {
            let kind = NodeKind::Step {
                steps_type: Some(candidate.steps_type().to_owned()),
                pending: false,
            };
            return self.node(kind, label, Some(parent));
        }

        let mut node = self.node(NodeKind::CompositeStep, label, Some(parent))?;
        self.steps(composed, &mut node, depth + 1)?;
        Ok(node)
    }

    /// Find the candidate for `step`, letting an unmatched `And` step inherit
    /// the start word of the step before it.
    fn resolve(
        &self,
        step: &str,
        previous_start: Option<&str>,
    ) -> Option<&'a Arc<dyn StepCandidate>> {
        let registry: &'a StepRegistry = self.registry;
        registry.find(step).or_else(|| {
            let continued = self.keywords.continue_with(step, previous_start?)?;
            registry.find(&continued)
        })
    }

    /// Node factory shared by every node kind.
    fn node(
        &mut self,
        kind: NodeKind,
        text: &str,
        parent: Option<&str>,
    ) -> Result<DescriptionNode, DescriptionError> {
        let label = sanitize(text);
        if label.is_empty() {
            return Err(DescriptionError::EmptyLabel { kind: kind.name() });
        }
        let occurrence = self.claims.claim(&label);
        let id = NodeHasher::hash(parent, &kind, &display_name(&label, occurrence));
        if kind.is_test() {
            self.test_cases += 1;
        }
        Ok(DescriptionNode::new(id, label, occurrence, kind))
    }
}

fn first_line(step: &str) -> &str {
    step.lines().next().unwrap_or_default()
}

/// Join a keyword prefix and text, leaving out the separator when the prefix
/// is empty.
fn prefixed(prefix: &str, text: &str) -> String {
    if prefix.is_empty() {
        text.to_owned()
    } else {
        format!("{prefix} {text}")
    }
}
