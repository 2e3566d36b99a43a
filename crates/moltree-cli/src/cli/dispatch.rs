//! Pull command parameters out of `ArgMatches` and hand them to command handlers.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::lang::LangDumpArgs;
use crate::commands::tree::TreeArgs;
use crate::commands::verify::VerifyArgs;

pub struct VerifyParams {
    pub verbose: bool,
    pub color: ColorChoice,
}

impl VerifyParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            verbose: m.get_flag("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<VerifyParams> for VerifyArgs {
    fn from(p: VerifyParams) -> Self {
        Self {
            verbose: p.verbose,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TreeParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub raw: bool,
    pub spans: bool,
    pub color: ColorChoice,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
            color: parse_color(m),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            lang: p.lang,
            raw: p.raw,
            spans: p.spans,
            color: p.color.should_colorize(),
        }
    }
}

pub struct LangDumpParams {
    pub lang: Option<String>,
    pub color: ColorChoice,
}

impl LangDumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            lang: m.get_one::<String>("lang").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<LangDumpParams> for LangDumpArgs {
    fn from(p: LangDumpParams) -> Self {
        Self {
            lang: p.lang,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
