//! Helpers for constructing story fixtures in tests.

use storytree::model::{ExampleRow, ExamplesTable, Scenario, Story};

/// Name used by [`default_story`].
pub const DEFAULT_STORY_NAME: &str = "Default Story Name";

/// Title used by [`default_scenario`].
pub const DEFAULT_SCENARIO_TITLE: &str = "Default Scenario Title";

/// A story with no scenarios named [`DEFAULT_STORY_NAME`].
pub fn default_story() -> Story {
    Story::new(DEFAULT_STORY_NAME)
}

/// A scenario with no steps titled [`DEFAULT_SCENARIO_TITLE`].
pub fn default_scenario() -> Scenario {
    Scenario::new(DEFAULT_SCENARIO_TITLE)
}

/// A table of `rows` identical rows with columns `key1..=keyN`.
///
/// Returns the table and the shared row.
pub fn repeated_row_table(rows: usize, columns: usize) -> (ExamplesTable, ExampleRow) {
    let row: ExampleRow = (1..=columns)
        .map(|index| (format!("key{index}"), format!("value{index}")))
        .collect();
    (ExamplesTable::new(vec![row.clone(); rows]), row)
}

/// Prefix a YAML scenario list with a story name header.
pub fn story_yaml(name: &str, scenarios: &str) -> String {
    format!("name: {name}\nscenarios:\n{scenarios}")
}
