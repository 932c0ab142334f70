//! Element-tree backed control container.
//!
//! The collection is re-derived from the form's children on every access, so
//! controls added or removed between renders are picked up. The busy-marker
//! lives in the `aria-busy` attribute; an author value it displaces is kept
//! aside and written back when the marker is cleared.

mod collect;
mod kind;

pub use kind::{ControlKind, control_kind};

use crate::control::{ControlCollection, ControlContainer};
use dom::{Node, assign_node_ids};

#[derive(Clone, Debug)]
pub struct DomForm {
    form: Node,
    author_busy: collect::AuthorValues,
}

impl DomForm {
    /// Wraps a `<form>` element. Returns `None` for any other node.
    pub fn new(mut form: Node) -> Option<Self> {
        if !form.is_element("form") {
            return None;
        }
        assign_node_ids(&mut form);
        Some(Self {
            form,
            author_busy: collect::AuthorValues::new(),
        })
    }

    pub fn node(&self) -> &Node {
        &self.form
    }

    /// Mutable access for re-rendering children. Ids of new nodes are assigned
    /// on the next access through the container.
    pub fn node_mut(&mut self) -> &mut Node {
        &mut self.form
    }

    /// Current collection without mutating anything.
    pub fn controls(&self) -> ControlCollection {
        collect::collect_controls(&self.form)
    }
}

impl ControlContainer for DomForm {
    fn with_controls(&mut self, f: &mut dyn FnMut(&mut ControlCollection)) {
        assign_node_ids(&mut self.form);
        let mut controls = collect::collect_controls(&self.form);
        let before = controls.clone();
        f(&mut controls);
        if controls != before {
            collect::write_controls(&mut self.form, &controls, &mut self.author_busy);
        }
    }
}
