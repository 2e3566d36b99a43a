use clap::{Arg, ArgAction, Command};
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

use view_tree_lsp::ViewTreeLanguageServer;

fn cli() -> Command {
    Command::new("view-tree-lsp")
        .about("Language server for $mol view.tree files")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("stdio")
                .long("stdio")
                .action(ArgAction::SetTrue)
                .help("Communicate over stdin/stdout (the default and only transport)"),
        )
        .after_help(
            r#"EXAMPLES:
  view-tree-lsp --stdio
  RUST_LOG=debug view-tree-lsp    # verbose diagnostics on stderr"#,
        )
}

#[tokio::main]
async fn main() {
    let _ = cli().get_matches();

    // stdout carries JSON-RPC, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting view-tree-lsp on stdio");

    let (service, socket) = LspService::new(ViewTreeLanguageServer::new);
    Server::new(stdin(), stdout(), socket).serve(service).await;

    tracing::info!("view-tree-lsp terminated");
}
