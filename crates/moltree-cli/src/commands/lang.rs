use std::fmt::Write as _;
use std::process::exit;

use moltree_core::Colors;
use moltree_core::grammar::{Grammar, Rule};
use moltree_langs::{LangImpl, LangInfo};

use super::lang_resolver::require_lang;

pub struct LangDumpArgs {
    pub lang: Option<String>,
    pub color: bool,
}

/// List all supported languages with aliases.
pub fn run_list() {
    print!("{}", render_list(&moltree_langs::all_info()));
}

pub fn render_list(infos: &[LangInfo]) -> String {
    let mut out = String::new();
    for info in infos {
        out.push_str(info.name);
        let aliases: Vec<_> = info.aliases.iter().skip(1).copied().collect();
        if !aliases.is_empty() {
            let _ = write!(out, " ({})", aliases.join(", "));
        }
        let exts: Vec<_> = info.extensions.iter().map(|e| format!(".{e}")).collect();
        if !exts.is_empty() {
            let _ = write!(out, " [{}]", exts.join(", "));
        }
        out.push('\n');
    }
    out
}

/// Dump grammar rules for a language.
pub fn run_dump(args: LangDumpArgs) {
    let lang = require_lang(args.lang.as_deref(), None);
    let grammar = lang.grammar().unwrap_or_else(|err| {
        eprintln!("error: {err}");
        exit(1);
    });

    let renderer = GrammarRenderer::new(&grammar, Colors::new(args.color));
    print!("{}", renderer.render());
}

/// List node kinds and fields with the ids the parser assigns them.
pub fn run_kinds(args: LangDumpArgs) {
    let lang = require_lang(args.lang.as_deref(), None);
    let grammar = lang.grammar().unwrap_or_else(|err| {
        eprintln!("error: {err}");
        exit(1);
    });

    print!("{}", render_kinds(lang.as_ref(), &grammar, Colors::new(args.color)));
}

/// Renders the parser's kind and field tables, checked against the grammar.
///
/// Grammar rules or fields the parser does not know are logged as warnings
/// and left out of the tables.
pub fn render_kinds(lang: &dyn LangImpl, grammar: &Grammar, colors: Colors) -> String {
    let c = colors;
    let id = |id: &dyn std::fmt::Display| c.paint(c.dim, &format!("#{id}"));
    let mut out = String::new();

    if let Some((start, _)) = grammar.start_rule() {
        let _ = writeln!(out, "start = {}", c.paint(c.kind, start));
    }

    out.push_str("\nnamed:\n");
    for kind in lang.all_named_node_kinds() {
        if let Some(kind_id) = lang.resolve_named_node(kind) {
            let _ = writeln!(out, "  {} {}", c.paint(c.kind, kind), id(&kind_id));
        }
    }

    out.push_str("\nanonymous:\n");
    for literal in grammar.literals() {
        match lang.resolve_anonymous_node(literal) {
            Some(kind_id) => {
                let _ = writeln!(out, "  {} {}", c.paint(c.text, &quote(literal)), id(&kind_id));
            }
            None => tracing::warn!(literal, "grammar literal has no node kind in the parser"),
        }
    }

    out.push_str("\nfields:\n");
    for field in lang.all_field_names() {
        if let Some(field_id) = lang.resolve_field(field) {
            let _ = writeln!(out, "  {} {}", c.paint(c.dim, field), id(&field_id));
        }
    }

    for rule in grammar.visible_rules() {
        if lang.resolve_named_node(rule).is_none() {
            tracing::warn!(rule, "grammar rule has no node kind in the parser");
        }
    }
    for field in grammar.field_names() {
        if lang.resolve_field(field).is_none() {
            tracing::warn!(field, "grammar field is unknown to the parser");
        }
    }
    out
}

/// Where a rule is rendered; decides whether it needs parentheses.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Right-hand side of a rule, or a function argument.
    Top,
    /// Member of a sequence or alternation.
    Seq,
    /// Operand of a postfix operator or field.
    Atom,
}

/// Renders a grammar as one EBNF-like line per rule:
///
/// - `a b` sequence, `a | b` alternation, `x?` `x*` `x+` quantifiers
/// - `name:x` field, `"lit"` string, `/re/` pattern
/// - `token(...)`, `prec.left(n, ...)` and friends as in `grammar.js`
pub struct GrammarRenderer<'a> {
    grammar: &'a Grammar,
    colors: Colors,
}

impl<'a> GrammarRenderer<'a> {
    pub fn new(grammar: &'a Grammar, colors: Colors) -> Self {
        Self { grammar, colors }
    }

    pub fn render(&self) -> String {
        let c = self.colors;
        let mut out = String::new();

        for (name, rule) in &self.grammar.rules {
            let _ = writeln!(out, "{} = {}", c.paint(c.kind, name), self.rule(rule, Slot::Top));
        }

        let mut trailer = Vec::new();
        if !self.grammar.extras.is_empty() {
            trailer.push(format!("extras = {}", self.rule_list(&self.grammar.extras)));
        }
        if !self.grammar.externals.is_empty() {
            trailer.push(format!("externals = {}", self.rule_list(&self.grammar.externals)));
        }
        if !self.grammar.supertypes.is_empty() {
            trailer.push(format!("supertypes = {}", self.grammar.supertypes.join(", ")));
        }
        if !self.grammar.inline.is_empty() {
            trailer.push(format!("inline = {}", self.grammar.inline.join(", ")));
        }
        if let Some(word) = &self.grammar.word {
            trailer.push(format!("word = {word}"));
        }
        if !self.grammar.conflicts.is_empty() {
            let groups: Vec<_> = self
                .grammar
                .conflicts
                .iter()
                .map(|group| format!("[{}]", group.join(", ")))
                .collect();
            trailer.push(format!("conflicts = {}", groups.join(", ")));
        }

        if !trailer.is_empty() {
            out.push('\n');
            for line in trailer {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }

    fn rule_list(&self, rules: &[Rule]) -> String {
        let rendered: Vec<_> = rules.iter().map(|r| self.rule(r, Slot::Top)).collect();
        rendered.join(", ")
    }

    fn rule(&self, rule: &Rule, slot: Slot) -> String {
        let c = self.colors;
        match rule {
            Rule::Blank => "()".to_owned(),
            Rule::String { value } => c.paint(c.text, &quote(value)),
            Rule::Pattern { value, flags } => {
                let flags = flags.as_deref().unwrap_or_default();
                c.paint(c.text, &format!("/{value}/{flags}"))
            }
            Rule::Symbol { name } => name.clone(),
            Rule::Seq { members } => {
                let body = self.join(members, " ");
                parenthesize(body, slot == Slot::Atom)
            }
            Rule::Choice { members } => match rule.as_optional() {
                Some(inner) => format!("{}?", self.rule(inner, Slot::Atom)),
                None => parenthesize(self.join(members, " | "), slot != Slot::Top),
            },
            Rule::Repeat { content } => format!("{}*", self.rule(content, Slot::Atom)),
            Rule::Repeat1 { content } => format!("{}+", self.rule(content, Slot::Atom)),
            Rule::Field { name, content } => {
                let label = format!("{name}:");
                format!("{}{}", c.paint(c.dim, &label), self.rule(content, Slot::Atom))
            }
            Rule::Alias {
                content,
                value,
                named,
            } => {
                let target = if *named { value.clone() } else { quote(value) };
                format!("alias({}, {target})", self.rule(content, Slot::Top))
            }
            Rule::Token { content } => format!("token({})", self.rule(content, Slot::Top)),
            Rule::ImmediateToken { content } => {
                format!("token.immediate({})", self.rule(content, Slot::Top))
            }
            Rule::Prec { value, content } => self.call("prec", value, content),
            Rule::PrecLeft { value, content } => self.call("prec.left", value, content),
            Rule::PrecRight { value, content } => self.call("prec.right", value, content),
            Rule::PrecDynamic { value, content } => self.call("prec.dynamic", value, content),
            Rule::Reserved {
                context_name,
                content,
            } => self.call("reserved", &quote(context_name), content),
        }
    }

    fn call(&self, func: &str, arg: &dyn std::fmt::Display, content: &Rule) -> String {
        format!("{func}({arg}, {})", self.rule(content, Slot::Top))
    }

    fn join(&self, members: &[Rule], sep: &str) -> String {
        let parts: Vec<_> = members.iter().map(|m| self.rule(m, Slot::Seq)).collect();
        parts.join(sep)
    }
}

fn parenthesize(body: String, wrap: bool) -> String {
    if wrap { format!("({body})") } else { body }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
