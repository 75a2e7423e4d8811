//! Keyword configuration.
//!
//! [`Keywords`] collects every textual convention the generator relies on:
//! the prefixes used for scenario and example-row labels, the marker that
//! flags a step as ignorable, and the start words used to resolve `And`
//! continuation steps. The defaults are the English keywords; a YAML document
//! can override any subset of them.
//!
//! ```rust
//! use storytree::keywords::Keywords;
//!
//! let keywords = Keywords::from_yaml("scenario: \"Szenario:\"")?;
//! assert_eq!(keywords.scenario, "Szenario:");
//! assert_eq!(keywords.ignorable, "!--");
//! # Ok::<(), storytree::error::ModelError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Textual conventions used when building descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Keywords {
    /// Prefix for scenario labels.
    pub scenario: String,
    /// Prefix for example-row labels.
    pub examples_table_row: String,
    /// Marker that flags a step as ignorable.
    pub ignorable: String,
    /// Start word of continuation steps.
    pub and: String,
    /// Start words a continuation step may inherit.
    pub start_words: Vec<String>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            scenario: "Scenario:".to_owned(),
            examples_table_row: "Example:".to_owned(),
            ignorable: "!--".to_owned(),
            and: "And".to_owned(),
            start_words: vec!["Given".to_owned(), "When".to_owned(), "Then".to_owned()],
        }
    }
}

impl Keywords {
    /// Read keywords from YAML; omitted fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Keywords`] when the document has unknown fields
    /// or values of the wrong type.
    pub fn from_yaml(yaml: &str) -> Result<Self, ModelError> {
        serde_saphyr::from_str(yaml).map_err(|err| ModelError::Keywords {
            message: err.to_string(),
        })
    }

    /// Returns `true` when the step starts with the ignorable marker.
    #[must_use]
    pub fn is_ignorable(&self, step: &str) -> bool {
        !self.ignorable.is_empty() && step.starts_with(self.ignorable.as_str())
    }

    /// Returns `true` when the step is an `And` continuation.
    #[must_use]
    pub fn is_and_step(&self, step: &str) -> bool {
        strip_word(step, &self.and).is_some()
    }

    /// The start word the step begins with, if any.
    #[must_use]
    pub fn start_word(&self, step: &str) -> Option<&str> {
        self.start_words
            .iter()
            .map(String::as_str)
            .find(|word| strip_word(step, word).is_some())
    }

    /// Rewrite an `And` step to begin with `start_word` instead.
    ///
    /// Returns `None` when the step is not an `And` step.
    #[must_use]
    pub fn continue_with(&self, step: &str, start_word: &str) -> Option<String> {
        strip_word(step, &self.and).map(|rest| format!("{start_word}{rest}"))
    }
}

/// Strip `word` from the start of `text` when it is followed by whitespace or
/// the end of the text.
pub(crate) fn strip_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    if word.is_empty() {
        return None;
    }
    text.strip_prefix(word)
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}
