//! Error types raised while loading story models and building descriptions.
//!
//! Both enums derive [`miette::Diagnostic`] so hosts can render them with
//! codes and help text during test discovery.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the description node factories.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum DescriptionError {
    /// A node label was empty once line breaks were removed.
    #[error("cannot create a {kind} description with an empty label")]
    #[diagnostic(
        code(storytree::description::empty_label),
        help("give every story a name")
    )]
    EmptyLabel {
        /// Kind of node that was being created.
        kind: &'static str,
    },
}

/// Errors raised while reading a story model from YAML.
#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    /// The YAML document could not be deserialised into a story.
    #[error("failed to parse story model: {message}")]
    #[diagnostic(code(storytree::model::parse))]
    Parse {
        /// Parser message.
        message: String,
    },

    /// The keyword configuration could not be deserialised.
    #[error("failed to parse keyword configuration: {message}")]
    #[diagnostic(code(storytree::keywords::parse))]
    Keywords {
        /// Parser message.
        message: String,
    },

    /// A pipe-delimited examples table row had a different number of cells
    /// from its header.
    #[error("examples table row {row} has {found} cells but the header has {expected}")]
    #[diagnostic(
        code(storytree::model::ragged_table),
        help("every row must have one value per header column")
    )]
    RaggedTable {
        /// One-based row number, not counting the header.
        row: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of cells found on the row.
        found: usize,
    },

    /// A pipe-delimited examples table header named the same column twice.
    #[error("examples table header repeats column `{column}`")]
    #[diagnostic(
        code(storytree::model::duplicate_column),
        help("give every header column a distinct name")
    )]
    DuplicateColumn {
        /// The repeated column name.
        column: String,
    },
}
