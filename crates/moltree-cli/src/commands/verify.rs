use std::error::Error;
use std::fmt::Write as _;
use std::process::exit;

use moltree_core::Colors;
use moltree_langs::{GrammarLoadError, verify_can_load_grammar};

pub struct VerifyArgs {
    pub verbose: bool,
    pub color: bool,
}

pub fn run(args: VerifyArgs) {
    let colors = Colors::new(args.color);
    match verify_can_load_grammar() {
        Ok(()) => println!("{}", render_success(colors)),
        Err(err) => {
            eprint!("{}", render_failure(&err, args.verbose, colors));
            exit(1);
        }
    }
}

pub fn render_success(colors: Colors) -> String {
    format!("{}: MolViewTree grammar loaded", colors.paint(colors.ok, "ok"))
}

/// `error: <message>`, then one `caused by:` line per source when verbose.
pub fn render_failure(err: &GrammarLoadError, verbose: bool, colors: Colors) -> String {
    let mut out = format!("{}: {err}\n", colors.paint(colors.error, "error"));
    if !verbose {
        return out;
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(out, "  {}caused by:{} {cause}", colors.dim, colors.reset);
        source = cause.source();
    }
    out
}
