//! # busy
//!
//! Keeps form controls and links in sync with an asynchronous navigation
//! lifecycle, so an in-flight submission cannot be edited or re-triggered and
//! assistive technology can announce the busy state.
//!
//! - [`toggle::apply`] flips a [`ControlCollection`] into or out of busy state.
//! - [`BusyForm`] calls it on submit and again when its lifecycle goes idle.
//! - [`BusyLink`] derives busy from the navigation target.
//!
//! Busy state is tracked by an explicit marker on every control and option the
//! toggler changed; anything read-only or disabled without that marker belongs
//! to the author and is left alone.

mod class;
mod control;
mod error;
mod form;
mod link;

pub mod dom_form;
pub mod toggle;

pub use class::{BUSY_FORM_CLASS, BUSY_LINK_CLASS, class_list};
pub use control::{
    Control, ControlCollection, ControlContainer, SelectControl, SelectOption, SubmitButton,
    TextControl,
};
pub use dom_form::DomForm;
pub use error::LinkError;
pub use form::{BusyForm, FormPhase, FormProps, LifecycleObserver, SubmitHook};
pub use link::{BusyLink, ClickHook, LinkProps, resolve_destination};
