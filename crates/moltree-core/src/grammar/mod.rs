//! Model of tree-sitter's `grammar.json`.
//!
//! Only decoding is supported: the JSON is the source of truth the parser
//! is generated from, and this model is how tools inspect it afterwards.

mod types;


pub use types::{Grammar, GrammarError, Precedence, Rule};
