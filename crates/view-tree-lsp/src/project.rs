//! Workspace index of components and their properties.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use crate::config::ViewTreeSettings;

/// Leading identifier of an indented line.
static PROPERTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+([a-zA-Z_][a-zA-Z0-9_?*]*)").expect("valid regex"));

/// Target of a one-way binding: `<= title`.
static BINDING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<=\s+([a-zA-Z_][a-zA-Z0-9_?*]*)").expect("valid regex"));

/// Component reference in TypeScript: `$mol_page`.
static TS_COMPONENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\w+").expect("valid regex"));

const RESERVED_VALUES: [&str; 3] = ["null", "true", "false"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectData {
    pub components: BTreeSet<String>,
    pub component_properties: BTreeMap<String, BTreeSet<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("workspace root is not a directory: {}", .0.display())]
    MissingRoot(PathBuf),
    #[error("scan task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ProjectData {
    /// Record the components declared in a view.tree source and their properties.
    ///
    /// Unindented lines starting with `$` open a component; indented lines
    /// contribute their leading identifier (unless they bind with `<=`), and
    /// `<= name` contributes the bound property.
    pub fn index_view_tree(&mut self, content: &str) {
        let mut current: Option<String> = None;

        for line in content.lines() {
            let trimmed = line.trim();

            if is_component_line(line)
                && let Some(name) = trimmed.split_whitespace().next()
            {
                self.components.insert(name.to_owned());
                self.component_properties.entry(name.to_owned()).or_default();
                current = Some(name.to_owned());
            }

            let Some(component) = &current else {
                continue;
            };
            let Some(properties) = self.component_properties.get_mut(component) else {
                continue;
            };

            if !trimmed.contains("<=")
                && let Some(caps) = PROPERTY_RE.captures(line)
            {
                let property = &caps[1];
                if !RESERVED_VALUES.contains(&property) {
                    properties.insert(property.to_owned());
                }
            }

            if let Some(caps) = BINDING_RE.captures(trimmed) {
                properties.insert(caps[1].to_owned());
            }
        }
    }

    /// Record `$component` references found in TypeScript source.
    pub fn index_ts(&mut self, content: &str) {
        for found in TS_COMPONENT_RE.find_iter(content) {
            self.components.insert(found.as_str().to_owned());
        }
    }

    /// Add every component and property `other` knows about.
    pub fn merge(&mut self, other: &ProjectData) {
        self.components.extend(other.components.iter().cloned());
        for (component, properties) in &other.component_properties {
            self.component_properties
                .entry(component.clone())
                .or_default()
                .extend(properties.iter().cloned());
        }
    }

    pub fn properties_of(&self, component: &str) -> Option<&BTreeSet<String>> {
        self.component_properties.get(component)
    }

    /// Union of every component's properties.
    pub fn all_properties(&self) -> BTreeSet<&str> {
        self.component_properties
            .values()
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

/// Unindented line whose first word is a `$component`.
pub fn is_component_line(line: &str) -> bool {
    !line.starts_with([' ', '\t']) && line.trim_start().starts_with('$')
}

/// Walk `root` and index every `*.view.tree` file plus up to
/// `settings.max_ts_files` TypeScript sources (declaration files excluded).
///
/// Blocking; run it off the async executor.
pub fn scan_project(root: &Path, settings: &ViewTreeSettings) -> Result<ProjectData, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }

    let mut data = ProjectData::default();
    let mut ts_files = 0usize;

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        match source_kind(path) {
            Some(SourceKind::ViewTree) => {
                if let Some(content) = read(path) {
                    data.index_view_tree(&content);
                }
            }
            Some(SourceKind::TypeScript) => {
                if ts_files >= settings.max_ts_files {
                    continue;
                }
                ts_files += 1;
                if let Some(content) = read(path) {
                    data.index_ts(&content);
                }
            }
            None => {}
        }
    }

    if ts_files >= settings.max_ts_files {
        tracing::debug!(limit = settings.max_ts_files, "TypeScript file limit reached");
    }
    Ok(data)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    ViewTree,
    TypeScript,
}

/// A `.tree` file anywhere under a `.view.tree` path is view.tree source,
/// so `app.view.tree` and `app.view.tree/card.tree` both count.
pub fn source_kind(path: &Path) -> Option<SourceKind> {
    match path.extension()?.to_str()? {
        "tree" if path.to_string_lossy().contains(".view.tree") => Some(SourceKind::ViewTree),
        "ts" if !path.to_string_lossy().ends_with(".d.ts") => Some(SourceKind::TypeScript),
        _ => None,
    }
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || name == "node_modules")
}

fn read(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .inspect_err(|err| tracing::debug!(path = %path.display(), error = %err, "cannot read file"))
        .ok()
}
