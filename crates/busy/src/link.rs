//! Links derive busy state instead of mutating it: a link is busy while the
//! navigation machine is pending towards the destination it was last clicked
//! for.

use crate::class::{BUSY_LINK_CLASS, class_list};
use crate::error::LinkError;
use bus::Dispatch;
use core_types::{NavRequest, NavSnapshot};
use url::Url;

pub type ClickHook = Box<dyn FnMut(&str)>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkProps {
    pub to: String,
    /// Author-supplied `aria-busy`. `Some(true)` forces busy on.
    pub busy_override: Option<bool>,
    pub class_name: Option<String>,
}

impl LinkProps {
    pub fn to(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            ..Self::default()
        }
    }
}

pub struct BusyLink {
    props: LinkProps,
    base: Url,
    /// Path recorded on the last click. Never reset; a finished navigation no
    /// longer matches it.
    intent: Option<String>,
    on_click: Option<ClickHook>,
}

impl BusyLink {
    /// `base_url` is the URL of the document the link lives in.
    pub fn new(props: LinkProps, base_url: &str) -> Result<Self, LinkError> {
        let base = Url::parse(base_url).map_err(|reason| LinkError::InvalidBase {
            base: base_url.to_string(),
            reason,
        })?;
        Ok(Self {
            props,
            base,
            intent: None,
            on_click: None,
        })
    }

    pub fn on_click(mut self, hook: impl FnMut(&str) + 'static) -> Self {
        self.on_click = Some(Box::new(hook));
        self
    }

    pub fn props(&self) -> &LinkProps {
        &self.props
    }

    pub fn intent(&self) -> Option<&str> {
        self.intent.as_deref()
    }

    /// Absolute path the link navigates to.
    pub fn destination(&self) -> Result<String, LinkError> {
        resolve_destination(&self.base, &self.props.to)
    }

    /// Records the destination as the pending intent and starts navigation.
    ///
    /// Nothing is dispatched if the destination cannot be resolved. A refused
    /// navigation puts the previous intent back.
    pub fn click<D: Dispatch + ?Sized>(&mut self, dispatch: &mut D) -> Result<(), LinkError> {
        let path = self.destination()?;
        log::debug!(target: "busy.link", "click -> {path}");
        let previous = self.intent.replace(path.clone());
        if let Some(hook) = self.on_click.as_mut() {
            hook(&path);
        }
        if let Err(err) = dispatch.dispatch(NavRequest::Navigate { path }) {
            self.intent = previous;
            return Err(LinkError::Refused(err));
        }
        Ok(())
    }

    pub fn is_busy(&self, navigation: &NavSnapshot) -> bool {
        let navigating_here = self
            .intent
            .as_deref()
            .is_some_and(|target| navigation.targets(target));
        navigating_here || self.props.busy_override == Some(true)
    }

    pub fn class_name(&self) -> String {
        class_list(BUSY_LINK_CLASS, self.props.class_name.as_deref())
    }
}

/// Resolves `href` against `base` and returns its path. Query and fragment do
/// not take part in the comparison against the navigation target.
pub fn resolve_destination(base: &Url, href: &str) -> Result<String, LinkError> {
    let url = base.join(href).map_err(|reason| LinkError::InvalidHref {
        href: href.to_string(),
        reason,
    })?;
    if url.origin() != base.origin() {
        log::warn!(target: "busy.link", "ignoring cross-origin link {url}");
        return Err(LinkError::CrossOrigin {
            href: href.to_string(),
            origin: base.origin().ascii_serialization(),
        });
    }
    Ok(url.path().to_string())
}
