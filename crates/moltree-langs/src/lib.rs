use std::num::NonZeroU16;
use std::sync::Arc;

use tree_sitter::{Language, Tree};

use moltree_core::grammar::{Grammar, GrammarError};

pub mod builtin;
pub mod verify;

pub use builtin::*;
pub use verify::{GrammarLoadError, verify_can_load_grammar};


/// Numeric node kind as assigned by the generated parser.
pub type NodeKindId = u16;

/// User-facing language type.
pub type Lang = Arc<dyn LangImpl>;

/// Failure to produce a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("tree-sitter rejected the language: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("parser produced no tree")]
    NoTree,
}

/// Facade over tree-sitter's `Language` plus the grammar it was generated from.
pub trait LangImpl: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;
    fn language(&self) -> &Language;

    fn parse(&self, source: &str) -> Result<Tree, ParseError>;

    /// Decode the `grammar.json` the parser was generated from.
    fn grammar(&self) -> Result<Grammar, GrammarError>;

    fn resolve_named_node(&self, kind: &str) -> Option<NodeKindId>;
    fn resolve_anonymous_node(&self, kind: &str) -> Option<NodeKindId>;
    fn resolve_field(&self, name: &str) -> Option<NonZeroU16>;

    /// Visible named kinds, sorted.
    fn all_named_node_kinds(&self) -> Vec<&'static str>;
    /// Field names in id order.
    fn all_field_names(&self) -> Vec<&'static str>;
}

#[derive(Debug)]
pub struct LangInner {
    name: &'static str,
    ts_lang: Language,
    grammar_json: &'static str,
}

impl LangInner {
    pub fn new(name: &'static str, ts_lang: Language, grammar_json: &'static str) -> Self {
        Self {
            name,
            ts_lang,
            grammar_json,
        }
    }
}

impl LangImpl for LangInner {
    fn name(&self) -> &str {
        self.name
    }

    fn language(&self) -> &Language {
        &self.ts_lang
    }

    fn parse(&self, source: &str) -> Result<Tree, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&self.ts_lang)?;
        parser.parse(source, None).ok_or(ParseError::NoTree)
    }

    fn grammar(&self) -> Result<Grammar, GrammarError> {
        Grammar::from_json(self.grammar_json)
    }

    fn resolve_named_node(&self, kind: &str) -> Option<NodeKindId> {
        let id = self.ts_lang.id_for_node_kind(kind, true);
        // 0 is "not found" for named kinds
        (id != 0).then_some(id)
    }

    fn resolve_anonymous_node(&self, kind: &str) -> Option<NodeKindId> {
        let id = self.ts_lang.id_for_node_kind(kind, false);
        if id != 0 {
            return Some(id);
        }
        // 0 is also the builtin "end" kind, tell the two apart by name
        (self.ts_lang.node_kind_for_id(0) == Some(kind)).then_some(0)
    }

    fn resolve_field(&self, name: &str) -> Option<NonZeroU16> {
        self.ts_lang.field_id_for_name(name)
    }

    fn all_named_node_kinds(&self) -> Vec<&'static str> {
        let count = self.ts_lang.node_kind_count();
        let mut kinds: Vec<_> = (0..count as u16)
            .filter(|&id| {
                self.ts_lang.node_kind_is_named(id) && self.ts_lang.node_kind_is_visible(id)
            })
            .filter_map(|id| self.ts_lang.node_kind_for_id(id))
            .collect();
        kinds.sort_unstable();
        kinds.dedup();
        kinds
    }

    fn all_field_names(&self) -> Vec<&'static str> {
        let count = self.ts_lang.field_count();
        (1..=count as u16)
            .filter_map(|id| self.ts_lang.field_name_for_id(id))
            .collect()
    }
}
