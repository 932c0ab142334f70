//! The busy toggler.
//!
//! Text controls become read-only, selects disable every option other than
//! the selected one, submit buttons only get the busy-marker. Toggle-off only
//! undoes what carries the marker, so state the author set is never cleared.

use crate::control::{Control, ControlCollection, SelectControl, SubmitButton, TextControl};

/// Puts every control into (`busy == true`) or out of busy state.
///
/// Idempotent. Returns `true` if any flag changed.
pub fn apply(controls: &mut ControlCollection, busy: bool) -> bool {
    let mut changed = false;
    for control in controls.iter_mut() {
        changed |= match control {
            Control::SubmitButton(button) => toggle_submit(button, busy),
            Control::Select(select) => toggle_select(select, busy),
            Control::TextLike(text) => toggle_text(text, busy),
            Control::Other(_) => false,
        };
    }
    log::trace!(target: "busy.toggle", "busy={busy} changed={changed}");
    changed
}

fn toggle_submit(button: &mut SubmitButton, busy: bool) -> bool {
    let changed = button.busy != busy;
    button.busy = busy;
    changed
}

fn toggle_text(text: &mut TextControl, busy: bool) -> bool {
    if busy && !text.read_only {
        text.read_only = true;
        text.busy = true;
        return true;
    }
    if !busy && text.busy {
        text.read_only = false;
        text.busy = false;
        return true;
    }
    false
}

fn toggle_select(select: &mut SelectControl, busy: bool) -> bool {
    let mut changed = false;
    for option in &mut select.options {
        if busy && option.value != select.value && !option.disabled {
            option.disabled = true;
            option.busy = true;
            changed = true;
        } else if !busy && option.busy {
            option.disabled = false;
            option.busy = false;
            changed = true;
        }
    }
    changed |= select.busy != busy;
    select.busy = busy;
    changed
}
