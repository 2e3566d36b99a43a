use std::fs;
use std::path::PathBuf;

const GRAMMAR_NAME: &str = "mol_view_tree";

fn main() {
    let manifest_dir =
        PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR not set"));
    let grammar_path = manifest_dir.join("grammar.json");

    let grammar_json = fs::read_to_string(&grammar_path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", grammar_path.display()));

    let (name, parser_source) = tree_sitter_generate::generate_parser_for_grammar(&grammar_json)
        .unwrap_or_else(|err| panic!("failed to generate parser from grammar.json: {err}"));
    assert_eq!(
        name, GRAMMAR_NAME,
        "grammar.json must be named '{GRAMMAR_NAME}' to export tree_sitter_{GRAMMAR_NAME}"
    );

    // Generated parsers include "tree_sitter/parser.h" relative to the source dir.
    let src_dir = out_dir.join("grammar");
    let header_dir = src_dir.join("tree_sitter");
    fs::create_dir_all(&header_dir).expect("failed to create generated source dir");
    fs::write(header_dir.join("parser.h"), tree_sitter::PARSER_HEADER)
        .expect("failed to write parser.h");

    let parser_path = src_dir.join("parser.c");
    fs::write(&parser_path, parser_source).expect("failed to write parser.c");

    let mut build = cc::Build::new();
    build
        .std("c11")
        .include(&src_dir)
        .file(&parser_path)
        .warnings(false)
        .flag_if_supported("-Wno-unused-parameter")
        .flag_if_supported("-Wno-unused-but-set-variable")
        .flag_if_supported("-Wno-trigraphs");

    if std::env::var("CARGO_CFG_TARGET_ENV").as_deref() == Ok("msvc") {
        build.flag("-utf-8");
    }

    build.compile("tree-sitter-mol_view_tree");

    println!("cargo::rerun-if-changed=grammar.json");
    println!("cargo::rerun-if-changed=build.rs");
}
