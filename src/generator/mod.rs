//! Story-to-description conversion.
//!
//! [`DescriptionGenerator`] walks a [`Story`] or a single [`Scenario`] and
//! builds the matching [`DescriptionNode`] tree:
//!
//! ```text
//! Story
//! └── Scenario: <title>
//!     ├── <given story file name>        (test)
//!     ├── <step first line>              (test)
//!     └── Example: {col=value, ...}      (one per examples row)
//!         └── <step first line>          (test)
//! ```
//!
//! The generator keeps a cumulative count of test nodes across calls and a
//! registry of issued display identities, so repeated calls never produce two
//! nodes with the same display identity. A call that fails leaves both
//! untouched.

mod build;

use tracing::debug;

use crate::description::DescriptionNode;
use crate::error::DescriptionError;
use crate::keywords::Keywords;
use crate::model::{Scenario, Story};
use crate::steps::StepRegistry;
use crate::uniquefier::Uniquefier;

use self::build::Build;

/// Builds description trees for stories and scenarios.
#[derive(Debug, Clone)]
pub struct DescriptionGenerator {
    registry: StepRegistry,
    keywords: Keywords,
    uniquefier: Uniquefier,
    test_cases: usize,
}

impl DescriptionGenerator {
    /// Create a generator using the default keywords.
    #[must_use]
    pub fn new(registry: StepRegistry) -> Self {
        Self::with_keywords(registry, Keywords::default())
    }

    /// Create a generator with custom keywords.
    #[must_use]
    pub fn with_keywords(registry: StepRegistry, keywords: Keywords) -> Self {
        Self {
            registry,
            keywords,
            uniquefier: Uniquefier::default(),
            test_cases: 0,
        }
    }

    /// Keywords in use.
    #[must_use]
    pub const fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    /// Test nodes created since the generator was constructed.
    #[must_use]
    pub const fn test_cases(&self) -> usize {
        self.test_cases
    }

    /// Build the description of a story.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::EmptyLabel`] when the story name is empty
    /// once line breaks are removed.
    pub fn description_for_story(
        &mut self,
        story: &Story,
    ) -> Result<DescriptionNode, DescriptionError> {
        let mut build = Build::new(
            &self.registry,
            &self.keywords,
            self.uniquefier.transaction(),
        );
        let outcome = build.story(story);
        let (node, added) = build.settle(outcome)?;
        self.test_cases += added;
        debug!(
            story = %node.label(),
            path = story.path.as_deref().unwrap_or_default(),
            scenarios = node.children().len(),
            test_cases = added,
            "built story description"
        );
        Ok(node)
    }

    /// Build the description of a single scenario.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::EmptyLabel`] when the scenario keyword is
    /// configured empty and the title is empty too.
    pub fn description_for_scenario(
        &mut self,
        scenario: &Scenario,
    ) -> Result<DescriptionNode, DescriptionError> {
        let mut build = Build::new(
            &self.registry,
            &self.keywords,
            self.uniquefier.transaction(),
        );
        let outcome = build.scenario(scenario, None);
        let (node, added) = build.settle(outcome)?;
        self.test_cases += added;
        debug!(
            scenario = %node.label(),
            test_cases = added,
            "built scenario description"
        );
        Ok(node)
    }
}
