use indoc::indoc;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};

use crate::completion::{CompletionContext, completion_items, current_component};
use crate::project::ProjectData;

fn sample_project() -> ProjectData {
    let mut data = ProjectData::default();
    data.index_view_tree(indoc! {"
        $my_app $mol_page
        	title \\Hello
        	<= Body $mol_view
        $my_card $mol_view
        	label \\
    "});
    data
}

fn labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|item| item.label.as_str()).collect()
}

#[test]
fn detects_component_contexts() {
    assert_eq!(CompletionContext::detect("$my_", 4), CompletionContext::ComponentName);
    assert_eq!(CompletionContext::detect("$my_app $mol_", 13), CompletionContext::ComponentName);
    assert_eq!(CompletionContext::detect("", 0), CompletionContext::ComponentName);
    assert_eq!(CompletionContext::detect("my", 2), CompletionContext::ComponentName);
    assert_eq!(CompletionContext::detect("my app", 6), CompletionContext::ComponentExtends);
}

#[test]
fn detects_property_contexts() {
    assert_eq!(CompletionContext::detect("\t", 1), CompletionContext::PropertyName);
    assert_eq!(CompletionContext::detect("\tti", 3), CompletionContext::PropertyName);
    assert_eq!(CompletionContext::detect("\t\t<= ", 5), CompletionContext::PropertyBinding);
    assert_eq!(CompletionContext::detect("\ttitle ", 7), CompletionContext::Value);
    assert_eq!(CompletionContext::detect("\tsub /", 6), CompletionContext::Value);
}

#[test]
fn cursor_column_limits_the_prefix() {
    // only "\tti" is before the cursor
    assert_eq!(CompletionContext::detect("\ttitle \\x", 3), CompletionContext::PropertyName);
    // past the end clamps to the whole line
    assert_eq!(CompletionContext::detect("\ttitle \\x", 99), CompletionContext::Value);
}

#[test]
fn columns_count_utf16_units() {
    // "😀" is two UTF-16 units; column 3 ends right after it
    assert_eq!(CompletionContext::detect("\t😀 x", 3), CompletionContext::PropertyName);
    assert_eq!(CompletionContext::detect("\t😀 x", 4), CompletionContext::Value);
    // a column inside the surrogate pair must not split the char
    assert_eq!(CompletionContext::detect("\t😀", 2), CompletionContext::PropertyName);
}

#[test]
fn finds_enclosing_component() {
    let lines = ["$my_app $mol_page", "\ttitle \\Hi", "", "$my_card $mol_view", "\tlabel"];

    assert_eq!(current_component(&lines, 0), Some("$my_app"));
    assert_eq!(current_component(&lines, 2), Some("$my_app"));
    assert_eq!(current_component(&lines, 4), Some("$my_card"));
    assert_eq!(current_component(&lines, 40), Some("$my_card"));
    assert_eq!(current_component(&["\torphan"], 0), None);
    assert_eq!(current_component(&[], 0), None);
}

#[test]
fn component_items_rank_first() {
    let items = completion_items(CompletionContext::ComponentName, None, &sample_project());

    assert_eq!(labels(&items), ["$my_app", "$my_card"]);
    assert_eq!(items[0].kind, Some(CompletionItemKind::CLASS));
    assert_eq!(items[0].sort_text.as_deref(), Some("1$my_app"));
    assert_eq!(items[0].insert_text.as_deref(), Some("$my_app"));
}

#[test]
fn properties_of_current_component() {
    let items = completion_items(
        CompletionContext::PropertyName,
        Some("$my_app"),
        &sample_project(),
    );

    assert_eq!(labels(&items), ["Body", "title", "/"]);
    assert_eq!(items[0].detail.as_deref(), Some("Property of $my_app"));
    assert_eq!(items[0].sort_text.as_deref(), Some("1Body"));

    let marker = items.last().unwrap();
    assert_eq!(marker.kind, Some(CompletionItemKind::OPERATOR));
    assert_eq!(marker.detail.as_deref(), Some("Empty list"));
    assert_eq!(marker.sort_text.as_deref(), Some("0/"));
}

#[test]
fn properties_of_unknown_component_is_just_the_marker() {
    let items = completion_items(
        CompletionContext::PropertyName,
        Some("$elsewhere"),
        &sample_project(),
    );

    assert_eq!(labels(&items), ["/"]);
}

#[test]
fn all_properties_without_component() {
    let items = completion_items(CompletionContext::PropertyName, None, &sample_project());

    assert_eq!(labels(&items), ["Body", "label", "title", "/"]);
    assert_eq!(items[1].sort_text.as_deref(), Some("2label"));
    assert_eq!(items[1].detail, None);
}

#[test]
fn binding_operators() {
    let items = completion_items(CompletionContext::PropertyBinding, None, &ProjectData::default());

    assert_eq!(labels(&items), ["<=", "<=>", "^", "*"]);
    assert_eq!(items[1].detail.as_deref(), Some("Two-way binding"));
    assert!(items.iter().all(|i| i.kind == Some(CompletionItemKind::OPERATOR)));
}

#[test]
fn value_items_then_components() {
    let items = completion_items(CompletionContext::Value, Some("$my_app"), &sample_project());

    assert_eq!(
        labels(&items),
        ["null", "true", "false", "\\", "@\\", "*", "$my_app", "$my_card"]
    );
    assert_eq!(items[3].insert_text.as_deref(), Some("\\\n\t\\"));
    assert_eq!(items[4].detail.as_deref(), Some("Localized string"));
    assert_eq!(items[6].sort_text.as_deref(), Some("3$my_app"));
}
