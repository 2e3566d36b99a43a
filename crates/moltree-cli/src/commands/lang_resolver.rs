use std::path::Path;
use std::process::exit;

use moltree_langs::Lang;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown language: '{name}'")]
    UnknownName {
        name: String,
        suggestion: Option<&'static str>,
    },
    #[error("cannot infer language from extension '.{ext}', use -l/--lang")]
    UnknownExtension { ext: String },
}

/// Pick a language: explicit name, then source extension, then the default grammar.
///
/// Stdin (`-`) and inline sources carry no extension and get the default.
pub fn resolve_lang(
    explicit: Option<&str>,
    source_path: Option<&Path>,
) -> Result<Lang, ResolveError> {
    if let Some(name) = explicit {
        return moltree_langs::from_name(name).ok_or_else(|| ResolveError::UnknownName {
            name: name.to_owned(),
            suggestion: suggest_language(name),
        });
    }

    if let Some(path) = source_path
        && path.as_os_str() != "-"
        && let Some(ext) = path.extension().and_then(|e| e.to_str())
    {
        return moltree_langs::from_ext(ext).ok_or_else(|| ResolveError::UnknownExtension {
            ext: ext.to_owned(),
        });
    }

    Ok(moltree_langs::mol_view_tree())
}

/// [`resolve_lang`], exiting with a diagnostic on failure.
pub fn require_lang(explicit: Option<&str>, source_path: Option<&Path>) -> Lang {
    match resolve_lang(explicit, source_path) {
        Ok(lang) => lang,
        Err(err) => {
            eprintln!("error: {err}");
            if let ResolveError::UnknownName {
                suggestion: Some(suggestion),
                ..
            } = &err
            {
                eprintln!();
                eprintln!("Did you mean '{suggestion}'?");
            }
            eprintln!();
            eprintln!("Run 'moltree lang list' for the full list.");
            exit(1);
        }
    }
}

/// Closest known name or alias, if within two edits.
pub fn suggest_language(input: &str) -> Option<&'static str> {
    let input_lower = input.to_lowercase();
    moltree_langs::all_info()
        .into_iter()
        .flat_map(|info| info.aliases.iter().copied())
        .map(|alias| (alias, edit_distance(alias, &input_lower)))
        .filter(|&(_, distance)| distance <= 2)
        .min_by_key(|&(_, distance)| distance)
        .map(|(alias, _)| alias)
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = (above + 1)
                .min(row[j] + 1)
                .min(diagonal + usize::from(ca != cb));
            diagonal = above;
        }
    }

    row[b.len()]
}
