//! Behavioural story model.
//!
//! These structures describe the input a description tree is built from: a
//! [`Story`] holds ordered [`Scenario`]s, each with raw step text, optional
//! [`GivenStories`] and an optional [`ExamplesTable`]. They mirror the YAML
//! schema read by [`from_str`] and are never mutated by the generator.
//!
//! ```rust
//! use storytree::model;
//!
//! let yaml = "name: Login\nscenarios:\n  - title: Valid user\n    steps:\n      - Given a user";
//! let story = model::from_str(yaml)?;
//! assert_eq!(story.scenarios.len(), 1);
//! # Ok::<(), storytree::error::ModelError>(())
//! ```

use std::fmt;
use std::fs;

use anyhow::{Context, Result};
use camino::Utf8Path;
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Top-level behavioural test unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Story {
    /// Display name of the story.
    pub name: String,

    /// Location the story was read from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Scenarios in source order.
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl Story {
    /// Create a story with no scenarios.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            scenarios: Vec::new(),
        }
    }

    /// Append a scenario.
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    /// Record the location the story came from.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// A named sequence of steps, optionally parameterised by an examples table
/// and preceded by given stories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Scenario title. May span several lines.
    #[serde(default)]
    pub title: String,

    /// Raw step text in source order. Tabular parameters follow the first
    /// line of a step.
    #[serde(default)]
    pub steps: Vec<String>,

    /// Examples table; one run of the steps per row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<ExamplesTable>,

    /// Stories run as setup before this scenario.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_stories: Option<GivenStories>,
}

impl Scenario {
    /// Create a scenario with no steps.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Append steps in order.
    #[must_use]
    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.extend(steps.into_iter().map(Into::into));
        self
    }

    /// Attach an examples table.
    #[must_use]
    pub fn with_examples(mut self, examples: ExamplesTable) -> Self {
        self.examples = Some(examples);
        self
    }

    /// Attach given stories by path.
    #[must_use]
    pub fn with_given_stories<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.given_stories = Some(GivenStories::new(paths));
        self
    }

    /// Paths of the given stories, empty when none are declared.
    #[must_use]
    pub fn given_story_paths(&self) -> &[String] {
        match &self.given_stories {
            Some(given) => &given.paths,
            None => &[],
        }
    }

    /// The examples table, if it has at least one row.
    #[must_use]
    pub fn populated_examples(&self) -> Option<&ExamplesTable> {
        self.examples.as_ref().filter(|table| table.row_count() > 0)
    }
}

/// References to stories that act as setup for a scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct GivenStories {
    /// Story paths in declaration order.
    pub paths: Vec<String>,
}

impl GivenStories {
    /// Collect the given paths.
    #[must_use]
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

/// One row of an examples table, mapping column names to values.
///
/// Columns keep their table order, which is also the order used when the row
/// is displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ExampleRow(IndexMap<String, String>);

impl ExampleRow {
    /// Look up the value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Number of columns in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ExampleRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl fmt::Display for ExampleRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self
            .0
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .join(", ");
        write!(f, "{{{cells}}}")
    }
}

/// Named-column values whose rows each instantiate one run of a scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ExamplesTable {
    rows: Vec<ExampleRow>,
}

impl ExamplesTable {
    /// Build a table from rows.
    #[must_use]
    pub fn new(rows: Vec<ExampleRow>) -> Self {
        Self { rows }
    }

    /// Parse a pipe-delimited table.
    ///
    /// The first non-blank line holds the column names. Lines starting with
    /// `|--` are comments and skipped along with blank lines.
    ///
    /// ```rust
    /// use storytree::model::ExamplesTable;
    ///
    /// let table = ExamplesTable::parse("|name|age|\n|Ann|31|\n|--|--|\n|Bo|7|")?;
    /// assert_eq!(table.row_count(), 2);
    /// assert_eq!(table.row(1).and_then(|row| row.get("name")), Some("Bo"));
    /// # Ok::<(), storytree::error::ModelError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateColumn`] when a header names a column
    /// twice and [`ModelError::RaggedTable`] when a row and the header differ
    /// in width.
    pub fn parse(text: &str) -> Result<Self, ModelError> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("|--"));
        let Some(header_line) = lines.next() else {
            return Ok(Self::default());
        };
        let headers = split_cells(header_line);
        if let Some(column) = headers.iter().duplicates().next() {
            return Err(ModelError::DuplicateColumn {
                column: column.clone(),
            });
        }
        let mut rows = Vec::new();
        for (index, line) in lines.enumerate() {
            let cells = split_cells(line);
            if cells.len() != headers.len() {
                return Err(ModelError::RaggedTable {
                    row: index + 1,
                    expected: headers.len(),
                    found: cells.len(),
                });
            }
            rows.push(headers.iter().cloned().zip(cells).collect());
        }
        Ok(Self { rows })
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Row at `index`, counted from zero.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&ExampleRow> {
        self.rows.get(index)
    }

    /// Rows in table order.
    #[must_use]
    pub fn rows(&self) -> &[ExampleRow] {
        &self.rows
    }
}

fn split_cells(line: &str) -> Vec<String> {
    let without_lead = line.strip_prefix('|').unwrap_or(line);
    let inner = without_lead.strip_suffix('|').unwrap_or(without_lead);
    inner.split('|').map(|cell| cell.trim().to_owned()).collect()
}

/// Parse a story from YAML.
///
/// # Errors
///
/// Returns [`ModelError::Parse`] when the document is not a valid story.
pub fn from_str(yaml: &str) -> Result<Story, ModelError> {
    serde_saphyr::from_str(yaml).map_err(|err| ModelError::Parse {
        message: err.to_string(),
    })
}

/// Load a story from a YAML file.
///
/// The story's `path` is set to `path` unless the document already names
/// one.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn from_path(path: impl AsRef<Utf8Path>) -> Result<Story> {
    let story_path = path.as_ref();
    let text = fs::read_to_string(story_path)
        .with_context(|| format!("failed to read story {story_path}"))?;
    let mut story =
        from_str(&text).with_context(|| format!("failed to load story {story_path}"))?;
    if story.path.is_none() {
        story.path = Some(story_path.to_string());
    }
    Ok(story)
}
