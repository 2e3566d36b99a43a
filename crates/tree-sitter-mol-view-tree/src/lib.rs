//! Tree-sitter grammar for `$mol` view.tree files ("MolViewTree").
//!
//! The parser is generated at build time from `grammar.json` and linked
//! statically. Use [`LANGUAGE`] with a `tree_sitter::Parser`:
//!
//! ```
//! let language = tree_sitter_mol_view_tree::LANGUAGE;
//! let mut parser = tree_sitter::Parser::new();
//! parser
//!     .set_language(&language.into())
//!     .expect("Error loading MolViewTree grammar");
//! ```

use tree_sitter_language::LanguageFn;

unsafe extern "C" {
    fn tree_sitter_mol_view_tree() -> *const ();
}

/// The tree-sitter [`LanguageFn`] for MolViewTree.
pub const LANGUAGE: LanguageFn = unsafe { LanguageFn::from_raw(tree_sitter_mol_view_tree) };

/// Grammar description the parser was generated from.
pub const GRAMMAR_JSON: &str = include_str!("../grammar.json");

/// Syntax highlighting query.
pub const HIGHLIGHTS_QUERY: &str = include_str!("../queries/highlights.scm");

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> tree_sitter::Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&LANGUAGE.into())
            .expect("Error loading MolViewTree grammar");
        parser.parse(source, None).expect("parse returned no tree")
    }

    #[test]
    fn test_can_load_grammar() {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&LANGUAGE.into())
            .expect("Error loading MolViewTree grammar");
    }

    #[test]
    fn parses_definition_with_body() {
        let tree = parse(r#"$my_app $mol_page { <= title "Hello" ? count 5 }"#);
        let root = tree.root_node();
        assert_eq!(root.kind(), "source_file");
        assert!(!root.has_error(), "{}", root.to_sexp());

        let definition = root.named_child(0).and_then(|s| s.named_child(0)).unwrap();
        assert_eq!(definition.kind(), "definition");
        assert_eq!(
            definition.child_by_field_name("name").unwrap().kind(),
            "identifier"
        );
    }

    #[test]
    fn comments_are_extras() {
        let tree = parse("# header\n$a $mol_view # trailing\n");
        let root = tree.root_node();
        let sexp = root.to_sexp();
        assert!(!root.has_error(), "{sexp}");
        assert_eq!(sexp.matches("(comment)").count(), 2, "{sexp}");
    }

    #[test]
    fn unterminated_body_is_an_error() {
        let tree = parse("$a $mol_view { <= title");
        assert!(tree.root_node().has_error());
    }

    #[test]
    fn highlights_query_compiles() {
        let language: tree_sitter::Language = LANGUAGE.into();
        let query = tree_sitter::Query::new(&language, HIGHLIGHTS_QUERY);
        assert!(query.is_ok(), "{:?}", query.err());
    }
}
