use dom::Id;

/// Text input or textarea. Busy means read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextControl {
    pub id: Id,
    pub read_only: bool,
    /// Set only when the toggler itself made the control read-only.
    pub busy: bool,
}

impl TextControl {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            read_only: false,
            busy: false,
        }
    }

    /// A control the author already made read-only.
    pub fn read_only(id: Id) -> Self {
        Self {
            read_only: true,
            ..Self::new(id)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub id: Id,
    pub value: String,
    pub disabled: bool,
    pub busy: bool,
}

impl SelectOption {
    pub fn new(id: Id, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
            disabled: false,
            busy: false,
        }
    }

    pub fn disabled(id: Id, value: impl Into<String>) -> Self {
        Self {
            disabled: true,
            ..Self::new(id, value)
        }
    }
}

/// Select element. Selects have no read-only state, so busy disables every
/// option except the selected one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectControl {
    pub id: Id,
    pub value: String,
    pub options: Vec<SelectOption>,
    pub busy: bool,
}

impl SelectControl {
    pub fn new(id: Id, value: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            id,
            value: value.into(),
            options,
            busy: false,
        }
    }

    pub fn option(&self, value: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// Submit button. Never disabled: the click that submitted already happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitButton {
    pub id: Id,
    pub busy: bool,
}

impl SubmitButton {
    pub fn new(id: Id) -> Self {
        Self { id, busy: false }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Control {
    TextLike(TextControl),
    Select(SelectControl),
    SubmitButton(SubmitButton),
    /// Anything else listed by the container (checkboxes, hidden inputs, plain
    /// buttons). Left untouched.
    Other(Id),
}

impl Control {
    pub fn id(&self) -> Id {
        match self {
            Control::TextLike(c) => c.id,
            Control::Select(c) => c.id,
            Control::SubmitButton(c) => c.id,
            Control::Other(id) => *id,
        }
    }

    /// Whether this control carries the busy-marker.
    pub fn is_busy(&self) -> bool {
        match self {
            Control::TextLike(c) => c.busy,
            Control::Select(c) => c.busy,
            Control::SubmitButton(c) => c.busy,
            Control::Other(_) => false,
        }
    }
}

/// Form controls in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlCollection {
    controls: Vec<Control>,
}

impl ControlCollection {
    pub fn new(controls: Vec<Control>) -> Self {
        Self { controls }
    }

    pub fn push(&mut self, control: Control) {
        self.controls.push(control);
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Control> {
        self.controls.iter_mut()
    }

    pub fn get(&self, id: Id) -> Option<&Control> {
        self.controls.iter().find(|c| c.id() == id)
    }

    /// `true` if any control or option still carries the busy-marker.
    pub fn any_busy(&self) -> bool {
        self.controls.iter().any(|c| match c {
            Control::Select(s) => s.busy || s.options.iter().any(|o| o.busy),
            other => other.is_busy(),
        })
    }
}

/// Something that can hand out its live control collection.
///
/// Implementations derive the collection from their current children on every
/// call and persist whatever the callback changed.
pub trait ControlContainer {
    fn with_controls(&mut self, f: &mut dyn FnMut(&mut ControlCollection));
}

impl ControlContainer for ControlCollection {
    fn with_controls(&mut self, f: &mut dyn FnMut(&mut ControlCollection)) {
        f(self);
    }
}
