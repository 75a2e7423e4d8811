//! Step candidates with fixed answers.
//!
//! Real steps classes match by pattern; these doubles match everything or an
//! explicit list of step texts so tests can control which steps resolve.

use std::collections::HashSet;
use std::sync::Arc;

use storytree::steps::{StepCandidate, StepRegistry};

/// Steps type reported by the doubles.
pub const STEPS_TYPE: &str = "TestSteps";

/// Candidate that claims every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl StepCandidate for AcceptAll {
    fn matches(&self, _step: &str) -> bool {
        true
    }

    fn steps_type(&self) -> &str {
        STEPS_TYPE
    }
}

/// Candidate that claims only the listed step texts.
#[derive(Debug, Default, Clone)]
pub struct AcceptListed {
    steps: HashSet<String>,
}

impl AcceptListed {
    /// Accept exactly `steps`.
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }
}

impl StepCandidate for AcceptListed {
    fn matches(&self, step: &str) -> bool {
        self.steps.contains(step)
    }

    fn steps_type(&self) -> &str {
        STEPS_TYPE
    }
}

/// Registry whose single candidate matches every step.
pub fn accept_all() -> StepRegistry {
    StepRegistry::default().with_candidate(Arc::new(AcceptAll))
}

/// Registry whose single candidate matches only `steps`.
pub fn accept_only<I, S>(steps: I) -> StepRegistry
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    StepRegistry::default().with_candidate(Arc::new(AcceptListed::new(steps)))
}
