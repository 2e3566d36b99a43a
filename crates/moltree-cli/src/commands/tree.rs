use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::exit;

use moltree_core::Colors;

use super::lang_resolver::require_lang;

pub struct TreeArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub raw: bool,
    pub spans: bool,
    pub color: bool,
}

pub fn run(args: TreeArgs) {
    let source = match (&args.source_text, &args.source_path) {
        (Some(text), None) => text.clone(),
        (None, Some(path)) => load_source(path).unwrap_or_else(|err| {
            eprintln!("error: cannot read {}: {err}", path.display());
            exit(1);
        }),
        (Some(_), Some(_)) => {
            eprintln!("error: cannot use both --source and positional SOURCE");
            exit(1);
        }
        (None, None) => {
            eprintln!("error: source required (positional or --source)");
            exit(1);
        }
    };

    let lang = require_lang(args.lang.as_deref(), args.source_path.as_deref());
    let tree = lang.parse(&source).unwrap_or_else(|err| {
        eprintln!("error: {err}");
        exit(1);
    });

    let options = TreeOptions {
        raw: args.raw,
        spans: args.spans,
        colors: Colors::new(args.color),
    };
    print!("{}", dump_tree(&tree, &source, options));
    if tree.root_node().has_error() {
        tracing::warn!("source contains syntax errors");
    }
}

fn load_source(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    fs::read_to_string(path)
}

#[derive(Clone, Copy, Default)]
pub struct TreeOptions {
    /// Include anonymous nodes.
    pub raw: bool,
    pub spans: bool,
    pub colors: Colors,
}

pub fn dump_tree(tree: &tree_sitter::Tree, source: &str, options: TreeOptions) -> String {
    let mut out = String::new();
    format_node(tree.root_node(), None, source, 0, options, &mut out);
    out.push('\n');
    out
}

fn format_node(
    node: tree_sitter::Node,
    field_name: Option<&str>,
    source: &str,
    depth: usize,
    options: TreeOptions,
    out: &mut String,
) {
    let c = options.colors;
    let indent = "  ".repeat(depth);
    let kind = node.kind();
    let field_prefix = field_name
        .map(|f| format!("{}{f}:{} ", c.dim, c.reset))
        .unwrap_or_default();
    let span_suffix = if options.spans {
        let start = node.start_position();
        let end = node.end_position();
        let span = format!("[{}:{}-{}:{}]", start.row, start.column, end.row, end.column);
        format!(" {}", c.paint(c.dim, &span))
    } else {
        String::new()
    };

    let mut children = Vec::new();
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if options.raw || child.is_named() {
                children.push((child, cursor.field_name()));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    out.push_str(&indent);
    out.push_str(&field_prefix);

    if children.is_empty() {
        let text = node
            .utf8_text(source.as_bytes())
            .unwrap_or("<invalid utf8>");
        let quoted = format!("\"{}\"", escape_string(text));
        if node.is_named() {
            out.push_str(&format!(
                "({} {}){span_suffix}",
                c.paint(c.kind, kind),
                c.paint(c.text, &quoted)
            ));
        } else {
            out.push_str(&format!("({}){span_suffix}", c.paint(c.text, &quoted)));
        }
        return;
    }

    out.push('(');
    out.push_str(&c.paint(c.kind, kind));
    out.push_str(&span_suffix);
    for (child, child_field) in children {
        out.push('\n');
        format_node(child, child_field, source, depth + 1, options, out);
    }
    out.push(')');
}

/// Debug-style escaping, leaving single quotes alone.
fn escape_string(s: &str) -> String {
    s.chars().fold(String::with_capacity(s.len()), |mut out, c| {
        match c {
            '\'' => out.push(c),
            c => out.extend(c.escape_debug()),
        }
        out
    })
}
