//! Storytree core library.
//!
//! This library turns behavioural story models (stories, scenarios, steps,
//! examples tables and given stories) into description trees that a test
//! runner can use to register and report test cases.
//!
//! ```
//! use storytree::generator::DescriptionGenerator;
//! use storytree::model::{Scenario, Story};
//! use storytree::steps::StepRegistry;
//!
//! let story = Story::new("Login").with_scenario(
//!     Scenario::new("Valid user").with_steps(["Given a user", "When they log in"]),
//! );
//! let mut generator = DescriptionGenerator::new(StepRegistry::default());
//! let description = generator.description_for_story(&story)?;
//! assert_eq!(description.label(), "Login");
//! assert_eq!(generator.test_cases(), 2);
//! # Ok::<(), storytree::error::DescriptionError>(())
//! ```

pub mod description;
pub mod error;
pub mod generator;
pub mod hasher;
pub mod keywords;
pub mod model;
pub mod steps;
pub mod uniquefier;
