use indoc::indoc;

use moltree_core::Colors;
use moltree_core::grammar::Grammar;

use super::lang::{GrammarRenderer, render_kinds, render_list};
use super::lang_resolver::{ResolveError, resolve_lang, suggest_language};

#[test]
fn grammar_dump_mol_view_tree() {
    let grammar = moltree_langs::mol_view_tree().grammar().unwrap();
    let output = GrammarRenderer::new(&grammar, Colors::OFF).render();

    insta::assert_snapshot!(output, @r##"
    source_file = statement*
    statement = definition | property
    definition = name:identifier type:identifier ("{" statement* "}")?
    property = prec.left(0, ("<=" | "<=>" | "=>" | "?") prop:identifier value:(identifier | string | number)?)
    identifier = /\$?[a-zA-Z_][a-zA-Z0-9_]*/
    string = /"([^"\\]|\\.)*"/
    number = /\d+/
    comment = token("#" /.*/)

    extras = /\s/, comment
    "##);
}

#[test]
fn grammar_dump_trailer_sections() {
    let json = indoc! {r#"
        {
          "name": "t",
          "word": "ident",
          "rules": {
            "doc": { "type": "REPEAT1", "content": { "type": "SYMBOL", "name": "_item" } },
            "_item": {
              "type": "ALIAS",
              "content": { "type": "SYMBOL", "name": "ident" },
              "value": "name",
              "named": true
            },
            "ident": { "type": "IMMEDIATE_TOKEN", "content": { "type": "PATTERN", "value": "[a-z]+", "flags": "i" } }
          },
          "inline": ["_item"],
          "conflicts": [["doc", "_item"]]
        }
    "#};
    let grammar = Grammar::from_json(json).unwrap();

    insta::assert_snapshot!(GrammarRenderer::new(&grammar, Colors::OFF).render(), @r"
    doc = _item+
    _item = alias(ident, name)
    ident = token.immediate(/[a-z]+/i)

    inline = _item
    word = ident
    conflicts = [doc, _item]
    ");
}

/// Entries of one `render_kinds` section as `(label, id)`.
fn section<'a>(output: &'a str, header: &str) -> Vec<(&'a str, u16)> {
    output
        .lines()
        .skip_while(|line| *line != header)
        .skip(1)
        .take_while(|line| !line.is_empty())
        .map(|line| {
            let (label, id) = line.trim().rsplit_once(" #").unwrap();
            (label, id.parse().unwrap())
        })
        .collect()
}

#[test]
fn kinds_tables_match_parser_ids() {
    let lang = moltree_langs::mol_view_tree();
    let grammar = lang.grammar().unwrap();
    let output = render_kinds(lang.as_ref(), &grammar, Colors::OFF);

    assert!(output.starts_with("start = source_file\n"), "{output}");

    let named = section(&output, "named:");
    let names: Vec<_> = named.iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        [
            "comment",
            "definition",
            "identifier",
            "number",
            "property",
            "source_file",
            "statement",
            "string",
        ]
    );
    for (name, id) in named {
        assert_eq!(lang.resolve_named_node(name), Some(id), "{name}");
    }

    let anonymous = section(&output, "anonymous:");
    let literals: Vec<_> = anonymous.iter().map(|(literal, _)| *literal).collect();
    assert_eq!(
        literals,
        [r#""<=""#, r#""<=>""#, r#""=>""#, r#""?""#, r#""{""#, r#""}""#]
    );
    for (literal, id) in anonymous {
        let bare = literal.trim_matches('"');
        assert_eq!(lang.resolve_anonymous_node(bare), Some(id), "{literal}");
    }

    let fields = section(&output, "fields:");
    for (field, id) in &fields {
        assert_eq!(lang.resolve_field(field).map(|id| id.get()), Some(*id), "{field}");
    }
    let mut field_names: Vec<_> = fields.iter().map(|(field, _)| *field).collect();
    field_names.sort_unstable();
    assert_eq!(field_names, ["name", "prop", "type", "value"]);
}

#[test]
fn list_shows_aliases_and_extensions() {
    insta::assert_snapshot!(
        render_list(&moltree_langs::all_info()),
        @"mol_view_tree (view.tree, viewtree, moltree, tree) [.tree]"
    );
}

#[test]
fn lang_from_name_aliases() {
    for info in moltree_langs::all_info() {
        for alias in info.aliases {
            let lang = moltree_langs::from_name(alias);
            assert!(lang.is_some(), "alias '{alias}' should resolve");
        }
    }
}

#[test]
fn resolve_defaults_to_mol_view_tree() {
    let lang = resolve_lang(None, None).unwrap();
    assert_eq!(lang.name(), "mol_view_tree");

    let from_stdin = resolve_lang(None, Some("-".as_ref())).unwrap();
    assert_eq!(from_stdin.name(), "mol_view_tree");
}

#[test]
fn resolve_by_extension() {
    let lang = resolve_lang(None, Some("app/app.view.tree".as_ref())).unwrap();
    assert_eq!(lang.name(), "mol_view_tree");

    let err = resolve_lang(None, Some("app/app.ts".as_ref())).unwrap_err();
    assert!(matches!(err, ResolveError::UnknownExtension { ref ext } if ext == "ts"));
    assert_eq!(
        err.to_string(),
        "cannot infer language from extension '.ts', use -l/--lang"
    );
}

#[test]
fn explicit_name_wins_over_extension() {
    let lang = resolve_lang(Some("viewtree"), Some("app.ts".as_ref())).unwrap();
    assert_eq!(lang.name(), "mol_view_tree");
}

#[test]
fn unknown_name_carries_suggestion() {
    let err = resolve_lang(Some("moltre"), None).unwrap_err();

    assert_eq!(err.to_string(), "unknown language: 'moltre'");
    assert!(matches!(
        err,
        ResolveError::UnknownName { suggestion: Some("moltree"), .. }
    ));
}

#[test]
fn suggestion_requires_close_match() {
    assert_eq!(suggest_language("VIEWTRE"), Some("viewtree"));
    assert_eq!(suggest_language("typescript"), None);
}
