use moltree_core::Colors;
use moltree_langs::verify::{
    BoxError, GrammarModule, LanguageHandle, MolViewTreeGrammar, ParsingRuntime, verify_grammar,
};

use super::verify::{render_failure, render_success};

struct OutdatedRuntime;

#[derive(Debug, thiserror::Error)]
#[error("ABI version 99 is not supported")]
struct AbiError;

#[derive(Debug, thiserror::Error)]
#[error("runtime refused the language")]
struct Refused(#[source] AbiError);

impl ParsingRuntime for OutdatedRuntime {
    type Language = ();

    fn construct(&self, _handle: LanguageHandle) -> Result<(), BoxError> {
        Err(Box::new(Refused(AbiError)))
    }
}

struct MissingModule;

impl GrammarModule for MissingModule {
    fn language(&self) -> Result<LanguageHandle, BoxError> {
        Err("grammar module not linked".into())
    }
}

#[test]
fn success_line() {
    insta::assert_snapshot!(render_success(Colors::OFF), @"ok: MolViewTree grammar loaded");
}

#[test]
fn failure_is_one_line_by_default() {
    let err = verify_grammar(&MolViewTreeGrammar, &OutdatedRuntime).unwrap_err();

    assert_eq!(
        render_failure(&err, false, Colors::OFF),
        "error: Error loading MolViewTree grammar\n"
    );
}

#[test]
fn verbose_failure_prints_cause_chain() {
    let err = verify_grammar(&MolViewTreeGrammar, &OutdatedRuntime).unwrap_err();

    insta::assert_snapshot!(render_failure(&err, true, Colors::OFF), @r"
    error: Error loading MolViewTree grammar
      caused by: runtime refused the language
      caused by: ABI version 99 is not supported
    ");
}

#[test]
fn first_line_ignores_cause() {
    let a = verify_grammar(&MolViewTreeGrammar, &OutdatedRuntime).unwrap_err();
    let b = verify_grammar(&MissingModule, &OutdatedRuntime).unwrap_err();

    let first = |s: String| s.lines().next().map(str::to_owned);
    assert_eq!(
        first(render_failure(&a, true, Colors::OFF)),
        first(render_failure(&b, true, Colors::OFF))
    );
}

#[test]
fn colored_failure_wraps_label() {
    let err = verify_grammar(&MissingModule, &OutdatedRuntime).unwrap_err();

    let out = render_failure(&err, false, Colors::ON);
    assert!(out.starts_with("\x1b[1;31merror\x1b[0m: "), "{out:?}");
}
