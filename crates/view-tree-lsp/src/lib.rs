//! Language server for `$mol` view.tree files.
//!
//! Indexes the workspace for components (`$my_app`, `$mol_page`) and the
//! properties each view.tree declares, then offers them as completions.
//!
//! - [`project`]: workspace scan and the component/property index
//! - [`completion`]: cursor context detection and completion items
//! - [`config`]: `viewTree` settings from the editor
//! - [`server`]: the `tower-lsp` service tying it together

pub mod completion;
pub mod config;
pub mod project;
pub mod server;

pub use config::ViewTreeSettings;
pub use server::{LspClient, ViewTreeLanguageServer};

#[cfg(test)]
mod completion_tests;
