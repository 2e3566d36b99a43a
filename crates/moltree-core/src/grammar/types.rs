use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Deserialize;

/// Error while decoding a `grammar.json` document.
#[derive(Debug)]
pub enum GrammarError {
    Json(serde_json::Error),
    /// Decoded fine, but there is no start rule.
    NoRules { grammar: String },
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "invalid grammar.json: {e}"),
            Self::NoRules { grammar } => write!(f, "grammar '{grammar}' defines no rules"),
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::NoRules { .. } => None,
        }
    }
}

/// A tree-sitter grammar as written to `grammar.json`.
///
/// `rules` keeps definition order; the first entry is the start rule.
#[derive(Debug, Clone, Deserialize)]
pub struct Grammar {
    pub name: String,
    pub rules: IndexMap<String, Rule>,
    #[serde(default)]
    pub extras: Vec<Rule>,
    #[serde(default)]
    pub conflicts: Vec<Vec<String>>,
    #[serde(default)]
    pub externals: Vec<Rule>,
    #[serde(default)]
    pub inline: Vec<String>,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub word: Option<String>,
}

/// One grammar rule, tagged by its `type` field in the JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rule {
    Blank,
    String {
        value: String,
    },
    Pattern {
        value: String,
        #[serde(default)]
        flags: Option<String>,
    },
    Symbol {
        name: String,
    },
    Seq {
        members: Vec<Rule>,
    },
    Choice {
        members: Vec<Rule>,
    },
    Repeat {
        content: Box<Rule>,
    },
    Repeat1 {
        content: Box<Rule>,
    },
    Field {
        name: String,
        content: Box<Rule>,
    },
    Alias {
        content: Box<Rule>,
        value: String,
        named: bool,
    },
    Token {
        content: Box<Rule>,
    },
    ImmediateToken {
        content: Box<Rule>,
    },
    Prec {
        value: Precedence,
        content: Box<Rule>,
    },
    PrecLeft {
        value: Precedence,
        content: Box<Rule>,
    },
    PrecRight {
        value: Precedence,
        content: Box<Rule>,
    },
    PrecDynamic {
        value: i32,
        content: Box<Rule>,
    },
    Reserved {
        context_name: String,
        content: Box<Rule>,
    },
}

/// Precedence level: numeric, or a name declared in `precedences`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Precedence {
    Integer(i32),
    Name(String),
}

impl std::fmt::Display for Precedence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

impl Grammar {
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let grammar: Grammar = serde_json::from_str(json).map_err(GrammarError::Json)?;
        if grammar.rules.is_empty() {
            return Err(GrammarError::NoRules {
                grammar: grammar.name,
            });
        }
        Ok(grammar)
    }

    /// The first rule; tree-sitter uses it as the root node kind.
    ///
    /// Always `Some` for grammars decoded with [`Grammar::from_json`].
    pub fn start_rule(&self) -> Option<(&str, &Rule)> {
        self.rules.first().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Every field name used anywhere in the rules, sorted.
    pub fn field_names(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        for rule in self.rules.values() {
            rule.walk(&mut |r| {
                if let Rule::Field { name, .. } = r {
                    names.insert(name.as_str());
                }
            });
        }
        names
    }

    /// Rules that produce visible named nodes: everything not hidden
    /// with a leading underscore and not listed in `inline`.
    pub fn visible_rules(&self) -> impl Iterator<Item = &str> {
        self.rules
            .keys()
            .map(String::as_str)
            .filter(|name| !name.starts_with('_') && !self.inline.iter().any(|i| i == name))
    }

    /// String literals that surface as anonymous node kinds, sorted.
    ///
    /// Strings inside `token(...)` are part of a larger token and are skipped;
    /// unnamed aliases contribute their alias value instead of their content.
    pub fn literals(&self) -> BTreeSet<&str> {
        let mut literals = BTreeSet::new();
        for rule in self.rules.values().chain(&self.extras) {
            rule.collect_literals(&mut literals);
        }
        literals
    }
}

impl Rule {
    /// Nested rules, in source order.
    pub fn children(&self) -> &[Rule] {
        match self {
            Self::Seq { members } | Self::Choice { members } => members,
            Self::Repeat { content }
            | Self::Repeat1 { content }
            | Self::Field { content, .. }
            | Self::Alias { content, .. }
            | Self::Token { content }
            | Self::ImmediateToken { content }
            | Self::Prec { content, .. }
            | Self::PrecLeft { content, .. }
            | Self::PrecRight { content, .. }
            | Self::PrecDynamic { content, .. }
            | Self::Reserved { content, .. } => std::slice::from_ref(content.as_ref()),
            Self::Blank | Self::String { .. } | Self::Pattern { .. } | Self::Symbol { .. } => &[],
        }
    }

    /// Pre-order traversal.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Rule)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    fn collect_literals<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Self::String { value } => {
                out.insert(value.as_str());
            }
            Self::Token { .. } | Self::ImmediateToken { .. } => {}
            Self::Alias {
                content,
                value,
                named,
            } => {
                if !*named {
                    out.insert(value.as_str());
                }
                if !matches!(content.as_ref(), Self::String { .. }) {
                    content.collect_literals(out);
                }
            }
            _ => {
                for child in self.children() {
                    child.collect_literals(out);
                }
            }
        }
    }

    /// `CHOICE(x, BLANK)`, which is how `optional(x)` is serialized.
    pub fn as_optional(&self) -> Option<&Rule> {
        match self {
            Self::Choice { members } if members.len() == 2 && members[1] == Rule::Blank => {
                Some(&members[0])
            }
            _ => None,
        }
    }
}
