use super::kind::{ControlKind, control_kind};
use crate::control::{
    Control, ControlCollection, SelectControl, SelectOption, SubmitButton, TextControl,
};
use dom::{Id, Node, attr, collect_text, has_attr, remove_attr, set_attr};
use std::collections::HashMap;

pub(super) const BUSY_ATTR: &str = "aria-busy";

/// The DOM stores the busy-marker as `aria-busy="true"`.
fn has_marker(node: &Node) -> bool {
    attr(node, BUSY_ATTR).is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Author `aria-busy` values displaced by the marker, keyed by node.
pub(super) type AuthorValues = HashMap<Id, Option<String>>;

fn write_marker(node: &mut Node, busy: bool, author: &mut AuthorValues) {
    if busy {
        if has_marker(node) {
            return;
        }
        if has_attr(node, BUSY_ATTR) {
            author.insert(node.id(), attr(node, BUSY_ATTR).map(str::to_string));
        }
        set_attr(node, BUSY_ATTR, Some("true"));
    } else if has_marker(node) {
        match author.remove(&node.id()) {
            Some(value) => set_attr(node, BUSY_ATTR, value.as_deref()),
            None => remove_attr(node, BUSY_ATTR),
        };
    }
}

fn write_flag(node: &mut Node, name: &str, on: bool) {
    if on {
        if !has_attr(node, name) {
            set_attr(node, name, None);
        }
    } else {
        remove_attr(node, name);
    }
}

/// Lists the controls of `form` in document order.
pub(super) fn collect_controls(form: &Node) -> ControlCollection {
    fn walk(node: &Node, out: &mut ControlCollection) {
        for child in node.children() {
            // Nested forms own their own controls.
            if child.is_element("form") {
                continue;
            }
            match control_kind(child) {
                Some(kind) => {
                    out.push(control_from_node(child, kind));
                    // fieldset lists its descendants as well
                    if child.is_element("fieldset") {
                        walk(child, out);
                    }
                }
                None => walk(child, out),
            }
        }
    }

    let mut out = ControlCollection::default();
    walk(form, &mut out);
    out
}

fn control_from_node(node: &Node, kind: ControlKind) -> Control {
    let id = node.id();
    match kind {
        ControlKind::TextLike => Control::TextLike(TextControl {
            id,
            read_only: has_attr(node, "readonly"),
            busy: has_marker(node),
        }),
        ControlKind::SubmitButton => Control::SubmitButton(SubmitButton {
            id,
            busy: has_marker(node),
        }),
        ControlKind::Select => Control::Select(select_from_node(node)),
        ControlKind::Other => Control::Other(id),
    }
}

fn select_from_node(node: &Node) -> SelectControl {
    fn options(node: &Node, out: &mut Vec<(SelectOption, bool)>) {
        for child in node.children() {
            if child.is_element("option") {
                let option = SelectOption {
                    id: child.id(),
                    value: option_value(child),
                    disabled: has_attr(child, "disabled"),
                    busy: has_marker(child),
                };
                out.push((option, has_attr(child, "selected")));
            } else if child.is_element("optgroup") {
                options(child, out);
            }
        }
    }

    let mut found = Vec::new();
    options(node, &mut found);

    // Last explicitly selected option wins, otherwise the first enabled one.
    let value = found
        .iter()
        .rev()
        .find(|(_, selected)| *selected)
        .or_else(|| found.iter().find(|(o, _)| !o.disabled))
        .or_else(|| found.first())
        .map(|(o, _)| o.value.clone())
        .unwrap_or_default();

    SelectControl {
        id: node.id(),
        value,
        options: found.into_iter().map(|(o, _)| o).collect(),
        busy: has_marker(node),
    }
}

fn option_value(option: &Node) -> String {
    if let Some(v) = attr(option, "value") {
        return v.to_string();
    }
    let mut text = String::new();
    collect_text(option.children(), &mut text);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Writes the presentation flags of `controls` back onto their elements.
pub(super) fn write_controls(
    form: &mut Node,
    controls: &ControlCollection,
    author: &mut AuthorValues,
) {
    for control in controls.iter() {
        match control {
            Control::TextLike(text) => {
                if let Some(node) = dom::find_node_by_id_mut(form, text.id) {
                    write_flag(node, "readonly", text.read_only);
                    write_marker(node, text.busy, author);
                }
            }
            Control::SubmitButton(button) => {
                if let Some(node) = dom::find_node_by_id_mut(form, button.id) {
                    write_marker(node, button.busy, author);
                }
            }
            Control::Select(select) => {
                for option in &select.options {
                    if let Some(node) = dom::find_node_by_id_mut(form, option.id) {
                        write_flag(node, "disabled", option.disabled);
                        write_marker(node, option.busy, author);
                    }
                }
                if let Some(node) = dom::find_node_by_id_mut(form, select.id) {
                    write_marker(node, select.busy, author);
                }
            }
            Control::Other(_) => {}
        }
    }
}
