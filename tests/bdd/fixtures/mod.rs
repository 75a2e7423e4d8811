//! Fixture state for BDD scenarios.
//!
//! Since the `scenarios!` macro doesn't support fixture injection into steps,
//! the world lives in thread-local storage. A fresh world is created whenever
//! a step runs on a thread whose test name differs from the last one seen.

// The `#[fixture]` macro generates types that cannot have doc comments attached
#![allow(
    missing_docs,
    reason = "Generated fixture types cannot have doc comments attached"
)]

use rstest::fixture;
use rstest_bdd::Slot;
use std::cell::RefCell;
use storytree::description::DescriptionNode;
use storytree::model::{Scenario, Story};

thread_local! {
    static WORLD: RefCell<Option<TestWorld>> = const { RefCell::new(None) };
    static CURRENT_SCENARIO: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn current_scenario_name() -> Option<String> {
    std::thread::current().name().map(String::from)
}

/// Access the current scenario's world, creating a fresh one when the
/// scenario changed.
pub fn with_world<R>(f: impl FnOnce(&TestWorld) -> R) -> R {
    let current = current_scenario_name();
    let changed = CURRENT_SCENARIO.with(|stored| {
        let mut stored_name = stored.borrow_mut();
        let is_new = stored_name.is_none() || *stored_name != current;
        if is_new {
            stored_name.clone_from(&current);
        }
        is_new
    });
    WORLD.with(|w| {
        if changed || w.borrow().is_none() {
            *w.borrow_mut() = Some(TestWorld::default());
        }
        let guard = w.borrow();
        match guard.as_ref() {
            Some(world) => f(world),
            None => f(&TestWorld::default()),
        }
    })
}

/// Combined test world for all BDD scenarios.
#[derive(Default)]
pub struct TestWorld {
    /// Story under construction.
    pub story: Slot<Story>,
    /// Scenario under construction.
    pub scenario: Slot<Scenario>,
    /// Description produced by the last generation step.
    pub description: Slot<DescriptionNode>,
    /// Test cases counted by the generator after the last generation step.
    pub test_cases: Slot<usize>,
    /// Error text captured when generation fails.
    pub generation_error: Slot<String>,
}

/// Fixture providing a fresh `TestWorld` for each scenario.
#[fixture]
pub fn world() -> TestWorld {
    TestWorld::default()
}

/// Strip surrounding double quotes from a string parameter.
///
/// rstest-bdd captures quoted strings including the quotes, so they are
/// stripped when processing step parameters.
#[must_use]
pub fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|stripped| stripped.strip_suffix('"'))
        .unwrap_or(s)
}
