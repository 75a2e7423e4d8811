//! Test utilities for description generation.
//!
//! This crate provides story fixtures, step candidates that stand in for real
//! steps classes, and logging helpers shared by the unit, integration and
//! behavioural tests.

pub mod candidates;
pub mod logging;
pub mod story;

pub use candidates::{AcceptAll, AcceptListed, accept_all, accept_only};
pub use story::{DEFAULT_SCENARIO_TITLE, DEFAULT_STORY_NAME, default_scenario, default_story};
