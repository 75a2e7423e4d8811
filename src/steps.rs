//! Step candidate registry.
//!
//! A [`StepCandidate`] recognises raw step text as executable. Candidates are
//! grouped by [`CandidateSteps`] providers, usually one per steps type, and
//! flattened into a [`StepRegistry`] that the generator consults to flag
//! pending steps and expand composite ones.
//!
//! ```rust
//! use storytree::steps::{Steps, StepRegistry};
//!
//! let login = Steps::new("LoginSteps")
//!     .given("a user named $name")
//!     .when("$name logs in");
//! let registry = StepRegistry::from_providers(&[&login]);
//! assert!(registry.find("Given a user named Ann").is_some());
//! assert!(registry.find("Then nothing matches").is_none());
//! ```

use std::fmt;
use std::iter;
use std::sync::Arc;

use crate::keywords::strip_word;

/// Recognises raw step text.
pub trait StepCandidate: fmt::Debug + Send + Sync {
    /// Returns `true` when the candidate claims `step`.
    fn matches(&self, step: &str) -> bool;

    /// Name of the steps type that implements the candidate.
    fn steps_type(&self) -> &str;

    /// Steps the candidate expands to when it is a composite step.
    fn composed_steps(&self) -> &[String] {
        &[]
    }
}

/// A source of step candidates.
pub trait CandidateSteps {
    /// Candidates provided by this source, in priority order.
    fn list_candidates(&self) -> Vec<Arc<dyn StepCandidate>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Parameter,
}

/// Matches steps of the form `<start word> <pattern>`.
///
/// `$name` placeholders in the pattern match any non-empty text. Only the
/// first line of a step takes part in matching so tabular parameters do not
/// affect the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternCandidate {
    start_word: String,
    pattern: String,
    segments: Vec<Segment>,
    steps_type: String,
    composed: Vec<String>,
}

impl PatternCandidate {
    /// Create a candidate owned by `steps_type`.
    #[must_use]
    pub fn new(
        steps_type: impl Into<String>,
        start_word: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        let pattern_text = pattern.into();
        Self {
            start_word: start_word.into(),
            segments: parse_segments(&pattern_text),
            pattern: pattern_text,
            steps_type: steps_type.into(),
            composed: Vec::new(),
        }
    }

    /// Turn the candidate into a composite of `steps`.
    #[must_use]
    pub fn composed_of<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.composed = steps.into_iter().map(Into::into).collect();
        self
    }

    /// The pattern text without the start word.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl StepCandidate for PatternCandidate {
    fn matches(&self, step: &str) -> bool {
        let first_line = step.lines().next().unwrap_or_default().trim_end();
        strip_word(first_line, &self.start_word)
            .map(str::trim_start)
            .is_some_and(|rest| match_segments(&self.segments, rest))
    }

    fn steps_type(&self) -> &str {
        &self.steps_type
    }

    fn composed_steps(&self) -> &[String] {
        &self.composed
    }
}

fn parse_segments(pattern: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        let starts_parameter = ch == '$'
            && chars
                .peek()
                .is_some_and(|next| next.is_alphanumeric() || *next == '_');
        if !starts_parameter {
            literal.push(ch);
            continue;
        }
        while chars
            .peek()
            .is_some_and(|next| next.is_alphanumeric() || *next == '_')
        {
            chars.next();
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Parameter);
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

fn match_segments(segments: &[Segment], text: &str) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return text.is_empty();
    };
    match first {
        Segment::Literal(literal) => text
            .strip_prefix(literal.as_str())
            .is_some_and(|remaining| match_segments(rest, remaining)),
        Segment::Parameter => text
            .char_indices()
            .skip(1)
            .map(|(index, _)| index)
            .chain(iter::once(text.len()))
            .filter(|_| !text.is_empty())
            .filter_map(|index| text.get(index..))
            .any(|remaining| match_segments(rest, remaining)),
    }
}

/// A named group of pattern candidates.
#[derive(Debug, Clone, Default)]
pub struct Steps {
    name: String,
    candidates: Vec<PatternCandidate>,
}

impl Steps {
    /// Create an empty group owned by the steps type `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            candidates: Vec::new(),
        }
    }

    /// Add a `Given` pattern.
    #[must_use]
    pub fn given(self, pattern: &str) -> Self {
        self.step("Given", pattern)
    }

    /// Add a `When` pattern.
    #[must_use]
    pub fn when(self, pattern: &str) -> Self {
        self.step("When", pattern)
    }

    /// Add a `Then` pattern.
    #[must_use]
    pub fn then(self, pattern: &str) -> Self {
        self.step("Then", pattern)
    }

    /// Add a pattern with an arbitrary start word.
    #[must_use]
    pub fn step(mut self, start_word: &str, pattern: &str) -> Self {
        let candidate = PatternCandidate::new(self.name.as_str(), start_word, pattern);
        self.candidates.push(candidate);
        self
    }

    /// Add a composite pattern expanding to `composed`.
    #[must_use]
    pub fn composite<I, S>(mut self, start_word: &str, pattern: &str, composed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidate =
            PatternCandidate::new(self.name.as_str(), start_word, pattern).composed_of(composed);
        self.candidates.push(candidate);
        self
    }
}

impl CandidateSteps for Steps {
    fn list_candidates(&self) -> Vec<Arc<dyn StepCandidate>> {
        self.candidates
            .iter()
            .map(|candidate| Arc::new(candidate.clone()) as Arc<dyn StepCandidate>)
            .collect()
    }
}

/// Flattened candidates from every registered provider.
#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    candidates: Vec<Arc<dyn StepCandidate>>,
}

impl StepRegistry {
    /// Collect the candidates of each provider in order.
    #[must_use]
    pub fn from_providers(providers: &[&dyn CandidateSteps]) -> Self {
        Self {
            candidates: providers
                .iter()
                .flat_map(|provider| provider.list_candidates())
                .collect(),
        }
    }

    /// Register one more candidate after the existing ones.
    #[must_use]
    pub fn with_candidate(mut self, candidate: Arc<dyn StepCandidate>) -> Self {
        self.candidates.push(candidate);
        self
    }

    /// First candidate that matches `step`.
    #[must_use]
    pub fn find(&self, step: &str) -> Option<&Arc<dyn StepCandidate>> {
        self.candidates.iter().find(|candidate| candidate.matches(step))
    }

    /// Number of registered candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` when no candidates are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a user named $name", "Given a user named Ann", true)]
    #[case("a user named $name", "Given a user named ", false)]
    #[case("$count items in $place", "Given 3 items in the basket", true)]
    #[case("$count items in $place", "Given 3 items", false)]
    #[case("a plain step", "Given a plain step", true)]
    #[case("a plain step", "When a plain step", false)]
    #[case("a plain step", "Given a plain step too", false)]
    #[case("costs $$amount", "Given costs $5", true)]
    fn pattern_matching(#[case] pattern: &str, #[case] step: &str, #[case] expected: bool) {
        let candidate = PatternCandidate::new("S", "Given", pattern);
        assert_eq!(candidate.matches(step), expected);
    }

    #[rstest]
    fn only_first_line_is_matched() {
        let candidate = PatternCandidate::new("S", "Given", "a table:");
        assert!(candidate.matches("Given a table:\n|Head|\n|Value|"));
    }

    #[rstest]
    fn registry_keeps_provider_order() {
        let first = Steps::new("First").given("$anything");
        let second = Steps::new("Second").given("a user");
        let registry = StepRegistry::from_providers(&[&first, &second]);
        assert_eq!(registry.len(), 2);
        let found = registry.find("Given a user").map(|c| c.steps_type().to_owned());
        assert_eq!(found.as_deref(), Some("First"));
    }

    #[rstest]
    fn composite_candidates_expose_their_steps() {
        let steps = Steps::new("S").composite(
            "Given",
            "a logged in user",
            ["Given a user", "When they log in"],
        );
        let registry = StepRegistry::from_providers(&[&steps]);
        let composed = registry
            .find("Given a logged in user")
            .map(|c| c.composed_steps().len());
        assert_eq!(composed, Some(2));
    }
}
