mod cli;
mod commands;

use tracing_subscriber::EnvFilter;

use cli::{LangDumpParams, TreeParams, VerifyParams, build_cli};

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("verify", m)) => {
            let params = VerifyParams::from_matches(m);
            commands::verify::run(params.into());
        }
        Some(("tree", m)) => {
            let params = TreeParams::from_matches(m);
            commands::tree::run(params.into());
        }
        Some(("lang", m)) => match m.subcommand() {
            Some(("list", _)) => commands::lang::run_list(),
            Some(("dump", m)) => {
                let params = LangDumpParams::from_matches(m);
                commands::lang::run_dump(params.into());
            }
            Some(("kinds", m)) => {
                let params = LangDumpParams::from_matches(m);
                commands::lang::run_kinds(params.into());
            }
            _ => unreachable!("clap should have caught this"),
        },
        _ => unreachable!("clap should have caught this"),
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // a second init can only happen in tests, where it is harmless to skip
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
