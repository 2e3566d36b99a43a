#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared building blocks for the MolViewTree tooling.
//!
//! - [`grammar`]: the tree-sitter `grammar.json` model the parser is generated from
//! - [`colors`]: ANSI palette used by CLI output

pub mod colors;
pub mod grammar;

pub use colors::Colors;
pub use grammar::{Grammar, GrammarError, Precedence, Rule};
