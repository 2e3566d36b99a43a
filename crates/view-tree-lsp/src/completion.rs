//! Completion context detection and item construction.

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};

use crate::project::{ProjectData, is_component_line};

/// What the text before the cursor is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionContext {
    /// `$my_` at the start of a line, or a bare unindented word.
    ComponentName,
    /// Unindented line past its first word.
    ComponentExtends,
    /// Line containing a binding arrow.
    PropertyBinding,
    /// First word of an indented line.
    PropertyName,
    /// Indented line past the property name.
    Value,
}

impl CompletionContext {
    pub fn detect(line: &str, character: u32) -> Self {
        let before = prefix_utf16(line, character);
        let trimmed = before.trim();
        let body = before.trim_start();
        let indent = before.len() - body.len();

        if trimmed.starts_with('$') {
            return Self::ComponentName;
        }
        if indent == 0 {
            return if trimmed.contains(' ') {
                Self::ComponentExtends
            } else {
                Self::ComponentName
            };
        }
        if trimmed.contains("<=") {
            return Self::PropertyBinding;
        }
        if body.contains(char::is_whitespace) {
            return Self::Value;
        }
        Self::PropertyName
    }
}

/// Slice of `line` up to a UTF-16 column, clamped to the line end.
fn prefix_utf16(line: &str, character: u32) -> &str {
    let mut units = 0u32;
    for (idx, ch) in line.char_indices() {
        if units >= character {
            return &line[..idx];
        }
        units += ch.len_utf16() as u32;
    }
    line
}

/// Nearest component declared at or above `line`.
pub fn current_component<'a>(lines: &[&'a str], line: usize) -> Option<&'a str> {
    let last = line.min(lines.len().checked_sub(1)?);
    lines[..=last]
        .iter()
        .rev()
        .copied()
        .find(|l| is_component_line(l))
        .and_then(|l| l.split_whitespace().next())
}

const BINDING_OPERATORS: [(&str, &str); 4] = [
    ("<=", "One-way binding"),
    ("<=>", "Two-way binding"),
    ("^", "Override"),
    ("*", "Multi-property marker"),
];

/// Label, detail, insert text.
const SPECIAL_VALUES: [(&str, &str, &str); 6] = [
    ("null", "Null value", "null"),
    ("true", "Boolean true", "true"),
    ("false", "Boolean false", "false"),
    ("\\", "String literal", "\\\n\t\\"),
    ("@\\", "Localized string", "@\\\n\t\\"),
    ("*", "Dictionary marker", "*"),
];

pub fn completion_items(
    context: CompletionContext,
    component: Option<&str>,
    data: &ProjectData,
) -> Vec<CompletionItem> {
    match context {
        CompletionContext::ComponentName | CompletionContext::ComponentExtends => {
            component_items(data, '1')
        }
        CompletionContext::PropertyName => property_items(component, data),
        CompletionContext::PropertyBinding => BINDING_OPERATORS
            .iter()
            .map(|(op, detail)| CompletionItem {
                label: (*op).to_owned(),
                kind: Some(CompletionItemKind::OPERATOR),
                detail: Some((*detail).to_owned()),
                insert_text: Some((*op).to_owned()),
                ..Default::default()
            })
            .collect(),
        CompletionContext::Value => {
            let mut items: Vec<_> = SPECIAL_VALUES
                .iter()
                .map(|(label, detail, insert)| CompletionItem {
                    label: (*label).to_owned(),
                    kind: Some(CompletionItemKind::VALUE),
                    detail: Some((*detail).to_owned()),
                    insert_text: Some((*insert).to_owned()),
                    ..Default::default()
                })
                .collect();
            items.extend(component_items(data, '3'));
            items
        }
    }
}

fn component_items(data: &ProjectData, rank: char) -> Vec<CompletionItem> {
    data.components
        .iter()
        .map(|name| CompletionItem {
            label: name.clone(),
            kind: Some(CompletionItemKind::CLASS),
            insert_text: Some(name.clone()),
            sort_text: Some(format!("{rank}{name}")),
            ..Default::default()
        })
        .collect()
}

fn property_items(component: Option<&str>, data: &ProjectData) -> Vec<CompletionItem> {
    let mut items = Vec::new();

    match component {
        Some(component) => {
            for property in data.properties_of(component).into_iter().flatten() {
                items.push(CompletionItem {
                    label: property.clone(),
                    kind: Some(CompletionItemKind::PROPERTY),
                    detail: Some(format!("Property of {component}")),
                    insert_text: Some(property.clone()),
                    sort_text: Some(format!("1{property}")),
                    ..Default::default()
                });
            }
        }
        None => {
            for property in data.all_properties() {
                items.push(CompletionItem {
                    label: property.to_owned(),
                    kind: Some(CompletionItemKind::PROPERTY),
                    insert_text: Some(property.to_owned()),
                    sort_text: Some(format!("2{property}")),
                    ..Default::default()
                });
            }
        }
    }

    items.push(CompletionItem {
        label: "/".to_owned(),
        kind: Some(CompletionItemKind::OPERATOR),
        detail: Some("Empty list".to_owned()),
        insert_text: Some("/".to_owned()),
        sort_text: Some("0/".to_owned()),
        ..Default::default()
    });
    items
}
