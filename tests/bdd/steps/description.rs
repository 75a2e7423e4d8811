//! Step definitions for description generation scenarios.

use crate::bdd::fixtures::{strip_quotes, with_world};
use anyhow::{Context, Result, ensure};
use rstest_bdd_macros::{given, then, when};
use storytree::description::DescriptionNode;
use storytree::error::DescriptionError;
use storytree::generator::DescriptionGenerator;
use storytree::model::{Scenario, Story};
use test_support::story::repeated_row_table;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn update_scenario(f: impl FnOnce(Scenario) -> Scenario) -> Result<()> {
    with_world(|world| {
        let scenario = world
            .scenario
            .get()
            .context("a scenario must be declared first")?;
        world.scenario.set(f(scenario));
        Ok(())
    })
}

fn store_result(result: Result<DescriptionNode, DescriptionError>, test_cases: usize) {
    with_world(|world| {
        world.test_cases.set(test_cases);
        match result {
            Ok(node) => {
                world.description.set(node);
                world.generation_error.clear();
            }
            Err(err) => {
                world.description.clear();
                world.generation_error.set(err.to_string());
            }
        }
    });
}

fn description() -> Result<DescriptionNode> {
    with_world(|world| world.description.get()).context("no description was generated")
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("a scenario titled {title}")]
fn scenario_titled(title: String) -> Result<()> {
    with_world(|world| world.scenario.set(Scenario::new(strip_quotes(&title))));
    Ok(())
}

#[given("the scenario has the step {step}")]
fn scenario_step(step: String) -> Result<()> {
    update_scenario(|scenario| scenario.with_steps([strip_quotes(&step)]))
}

#[given("the scenario has the given story {path}")]
fn scenario_given_story(path: String) -> Result<()> {
    update_scenario(|scenario| scenario.with_given_stories([strip_quotes(&path)]))
}

#[given("the scenario has {rows:usize} identical example rows")]
fn scenario_example_rows(rows: usize) -> Result<()> {
    let (table, _) = repeated_row_table(rows, 2);
    update_scenario(|scenario| scenario.with_examples(table))
}

#[given("a story named {name}")]
fn story_named(name: String) -> Result<()> {
    with_world(|world| world.story.set(Story::new(strip_quotes(&name))));
    Ok(())
}

#[given("the story contains the scenario {times:usize} times")]
fn story_repeats_scenario(times: usize) -> Result<()> {
    with_world(|world| {
        let scenario = world
            .scenario
            .get()
            .context("a scenario must be declared first")?;
        let story = world.story.get().context("a story must be declared first")?;
        let repeated = (0..times).fold(story, |acc, _| acc.with_scenario(scenario.clone()));
        world.story.set(repeated);
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the scenario description is generated")]
fn generate_scenario() -> Result<()> {
    let scenario = with_world(|world| world.scenario.get()).context("no scenario declared")?;
    let mut generator = DescriptionGenerator::new(test_support::accept_all());
    let result = generator.description_for_scenario(&scenario);
    store_result(result, generator.test_cases());
    Ok(())
}

#[when("the story description is generated")]
fn generate_story() -> Result<()> {
    let story = with_world(|world| world.story.get()).context("no story declared")?;
    let mut generator = DescriptionGenerator::new(test_support::accept_all());
    let result = generator.description_for_story(&story);
    store_result(result, generator.test_cases());
    Ok(())
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the description is named {name}")]
fn description_named(name: String) -> Result<()> {
    let node = description()?;
    let expected = strip_quotes(&name);
    ensure!(
        node.display_name() == expected,
        "expected {expected:?}, found {:?}",
        node.display_name()
    );
    Ok(())
}

#[then("the description has {count:usize} children")]
fn description_children(count: usize) -> Result<()> {
    let found = description()?.children().len();
    ensure!(found == count, "expected {count} children, found {found}");
    Ok(())
}

#[then("child {index:usize} is named {name}")]
fn child_named(index: usize, name: String) -> Result<()> {
    let node = description()?;
    let child = node
        .child(index.saturating_sub(1))
        .with_context(|| format!("no child {index}"))?;
    let expected = strip_quotes(&name);
    ensure!(
        child.display_name() == expected,
        "expected {expected:?}, found {:?}",
        child.display_name()
    );
    Ok(())
}

#[then("every child holds a step named {name}")]
fn every_child_holds_step(name: String) -> Result<()> {
    let node = description()?;
    let expected = strip_quotes(&name);
    for child in node.children() {
        ensure!(
            child
                .children()
                .iter()
                .any(|step| step.display_name().starts_with(expected)),
            "{} lacks {expected:?}",
            child.display_name()
        );
    }
    Ok(())
}

#[then("the first given stories of the scenarios have distinct names")]
fn given_stories_distinct() -> Result<()> {
    let node = description()?;
    let names: Vec<String> = node
        .children()
        .iter()
        .filter_map(|scenario| scenario.child(0))
        .map(DescriptionNode::display_name)
        .collect();
    let mut unique = names.clone();
    unique.sort();
    unique.dedup();
    ensure!(names.len() > 1, "expected several scenarios");
    ensure!(unique.len() == names.len(), "names collide: {names:?}");
    Ok(())
}

#[then("the generator counted {count:usize} test cases")]
fn counted_test_cases(count: usize) -> Result<()> {
    let found = with_world(|world| world.test_cases.get()).context("nothing was generated")?;
    ensure!(found == count, "expected {count} test cases, found {found}");
    Ok(())
}

#[then("generation fails")]
fn generation_fails() -> Result<()> {
    with_world(|world| {
        ensure!(
            world.generation_error.is_filled(),
            "expected a generation error, but none present"
        );
        Ok(())
    })
}
