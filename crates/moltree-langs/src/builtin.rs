use std::sync::{Arc, LazyLock};

use crate::{Lang, LangInner};

/// Static description of a registered language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LangInfo {
    pub name: &'static str,
    /// Accepted names, canonical name first.
    pub aliases: &'static [&'static str],
    pub extensions: &'static [&'static str],
}

macro_rules! define_langs {
    (
        $(
            $fn_name:ident => {
                name: $name:literal,
                ts_lang: $ts_lang:expr,
                grammar_json: $grammar_json:expr,
                names: [$($alias:literal),* $(,)?],
                extensions: [$($ext:literal),* $(,)?] $(,)?
            }
        ),* $(,)?
    ) => {
        $(
            pub fn $fn_name() -> Lang {
                static LANG: LazyLock<Lang> = LazyLock::new(|| {
                    Arc::new(LangInner::new($name, $ts_lang.into(), $grammar_json))
                });
                Arc::clone(&LANG)
            }
        )*

        pub fn from_name(s: &str) -> Option<Lang> {
            match s.to_ascii_lowercase().as_str() {
                $(
                    $($alias)|* => Some($fn_name()),
                )*
                _ => None,
            }
        }

        pub fn from_ext(ext: &str) -> Option<Lang> {
            match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
                $(
                    $($ext)|* => Some($fn_name()),
                )*
                _ => None,
            }
        }

        pub fn all() -> Vec<Lang> {
            vec![$($fn_name(),)*]
        }

        pub fn all_info() -> Vec<LangInfo> {
            vec![
                $(
                    LangInfo {
                        name: $name,
                        aliases: &[$($alias),*],
                        extensions: &[$($ext),*],
                    },
                )*
            ]
        }
    };
}

define_langs! {
    mol_view_tree => {
        name: "mol_view_tree",
        ts_lang: tree_sitter_mol_view_tree::LANGUAGE,
        grammar_json: tree_sitter_mol_view_tree::GRAMMAR_JSON,
        names: ["mol_view_tree", "view.tree", "viewtree", "moltree", "tree"],
        extensions: ["tree"],
    },
}
