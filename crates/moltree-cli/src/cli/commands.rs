//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("moltree")
        .about("Tools for the MolViewTree ($mol view.tree) tree-sitter grammar")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(verify_command())
        .subcommand(tree_command())
        .subcommand(lang_command())
}

/// Check that the grammar loads into the tree-sitter runtime.
pub fn verify_command() -> Command {
    Command::new("verify")
        .about("Check that the MolViewTree grammar loads")
        .after_help(
            r#"EXAMPLES:
  moltree verify              # exit 0 when the grammar loads
  moltree verify --verbose    # on failure, print the underlying cause"#,
        )
        .arg(verbose_arg())
        .arg(color_arg())
}

/// Show the syntax tree of a source file.
pub fn tree_command() -> Command {
    Command::new("tree")
        .about("Show the syntax tree of a source file")
        .override_usage(
            "\
  moltree tree <SOURCE>
  moltree tree -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  moltree tree app.view.tree                  # named nodes only
  moltree tree app.view.tree --raw            # include operators and braces
  moltree tree -s '$app $mol_page' --spans    # inline source with positions
  cat app.view.tree | moltree tree -          # read stdin"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(lang_arg())
        .arg(raw_arg())
        .arg(spans_arg())
        .arg(color_arg())
}

/// Language information commands.
pub fn lang_command() -> Command {
    Command::new("lang")
        .about("Language information")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List supported languages with aliases"))
        .subcommand(
            Command::new("dump")
                .about("Render the grammar rules of a language")
                .arg(lang_name_arg())
                .arg(color_arg()),
        )
        .subcommand(
            Command::new("kinds")
                .about("List node kinds and fields with their parser ids")
                .arg(lang_name_arg())
                .arg(color_arg()),
        )
}
