//! Step definition modules for BDD scenarios.
//!
//! The `rstest-bdd` macros generate wrapper code for each step function that
//! triggers Clippy lints the generated code cannot be annotated for, so the
//! suppressions below apply file-wide.

#![expect(
    clippy::unnecessary_wraps,
    reason = "rstest-bdd macros require Result returns for step functions"
)]
#![expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd step signatures prioritise ergonomics"
)]

mod description;
