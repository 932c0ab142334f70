//! Form coordinator.
//!
//! Busy is switched on synchronously by [`BusyForm::submit`] before the
//! request is dispatched, and switched off when the lifecycle that governs the
//! form reports idle. Which lifecycle that is (navigation or the form's
//! fetcher) is fixed when the form is mounted.

use crate::class::{BUSY_FORM_CLASS, class_list};
use crate::control::{ControlCollection, ControlContainer};
use crate::toggle;
use bus::{Dispatch, FetcherSource, NavigationSource, Subscription};
use core_types::{FetcherKey, FetcherScope, FormId, NavError, NavRequest, NavSnapshot};

pub type SubmitHook = Box<dyn FnMut(&NavRequest)>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormProps {
    /// Absolute path the form submits to.
    pub action: String,
    /// `false` submits through a fetcher without navigating.
    pub navigate: bool,
    /// Shared fetcher to submit through when `navigate` is `false`.
    pub fetcher_key: Option<FetcherKey>,
    pub class_name: Option<String>,
}

impl FormProps {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            navigate: true,
            fetcher_key: None,
            class_name: None,
        }
    }

    /// Non-navigating submission through `key`'s fetcher, or the form's own
    /// fetcher when `key` is `None`.
    pub fn fetcher(mut self, key: Option<FetcherKey>) -> Self {
        self.navigate = false;
        self.fetcher_key = key;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Busy,
}

/// The one lifecycle a form listens to.
#[derive(Debug)]
pub enum LifecycleObserver {
    Navigation(Subscription),
    Fetcher {
        scope: FetcherScope,
        subscription: Subscription,
    },
}

impl LifecycleObserver {
    fn select<S>(id: FormId, props: &FormProps, sources: &mut S) -> (Self, NavSnapshot)
    where
        S: NavigationSource + FetcherSource + ?Sized,
    {
        if props.navigate {
            let subscription = sources.subscribe_navigation();
            return (
                LifecycleObserver::Navigation(subscription),
                sources.navigation(),
            );
        }

        let scope = match &props.fetcher_key {
            Some(key) => FetcherScope::Keyed(key.clone()),
            None => FetcherScope::Form(id),
        };
        let subscription = sources.subscribe_fetcher(&scope);
        let current = sources.fetcher(&scope);
        (
            LifecycleObserver::Fetcher {
                scope,
                subscription,
            },
            current,
        )
    }

    fn subscription(&self) -> &Subscription {
        match self {
            LifecycleObserver::Navigation(subscription) => subscription,
            LifecycleObserver::Fetcher { subscription, .. } => subscription,
        }
    }

    pub fn fetcher_scope(&self) -> Option<&FetcherScope> {
        match self {
            LifecycleObserver::Navigation(_) => None,
            LifecycleObserver::Fetcher { scope, .. } => Some(scope),
        }
    }
}

pub struct BusyForm<C: ControlContainer> {
    id: FormId,
    props: FormProps,
    container: Option<C>,
    observer: Option<LifecycleObserver>,
    phase: FormPhase,
    on_submit: Option<SubmitHook>,
}

impl<C: ControlContainer> BusyForm<C> {
    /// Mounts `container` and subscribes to the lifecycle `props` selects.
    ///
    /// If that lifecycle is idle the controls are reset to the non-busy
    /// baseline, clearing markers left by a previous render.
    pub fn mount<S>(id: FormId, container: C, props: FormProps, sources: &mut S) -> Self
    where
        S: NavigationSource + FetcherSource + ?Sized,
    {
        let (observer, current) = LifecycleObserver::select(id, &props, sources);
        log::debug!(
            target: "busy.form",
            "form {id} mounted, navigate={} state={:?}",
            props.navigate,
            current.state
        );

        let mut form = Self {
            id,
            props,
            container: Some(container),
            observer: Some(observer),
            phase: FormPhase::Idle,
            on_submit: None,
        };
        if current.state.is_idle() {
            form.toggle(false);
        }
        form
    }

    /// Author callback run after the controls went busy and before dispatch.
    pub fn on_submit(mut self, hook: impl FnMut(&NavRequest) + 'static) -> Self {
        self.on_submit = Some(Box::new(hook));
        self
    }

    pub fn id(&self) -> FormId {
        self.id
    }

    pub fn props(&self) -> &FormProps {
        &self.props
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.container.is_some()
    }

    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    pub fn observer(&self) -> Option<&LifecycleObserver> {
        self.observer.as_ref()
    }

    pub fn class_name(&self) -> String {
        class_list(BUSY_FORM_CLASS, self.props.class_name.as_deref())
    }

    /// The request this form dispatches on submit.
    pub fn request(&self) -> NavRequest {
        NavRequest::Submit {
            form: self.id,
            action: self.props.action.clone(),
            fetcher: self
                .observer
                .as_ref()
                .and_then(|o| o.fetcher_scope().cloned()),
        }
    }

    /// Handles a submit interaction from any submit control in the form.
    ///
    /// Returns `Ok(false)` without dispatching when the form is not mounted.
    /// If the request is refused no idle notification will ever follow, so the
    /// controls are released again before the error is returned.
    pub fn submit<D: Dispatch + ?Sized>(&mut self, dispatch: &mut D) -> Result<bool, NavError> {
        if self.container.is_none() {
            log::debug!(target: "busy.form", "form {} submit ignored, not mounted", self.id);
            return Ok(false);
        }

        // Notifications queued before the click describe the previous request.
        if let Some(observer) = &self.observer {
            let stale = observer.subscription().discard_pending();
            if stale > 0 {
                log::trace!(
                    target: "busy.form",
                    "form {} dropped {stale} stale update(s)",
                    self.id
                );
            }
        }

        self.toggle(true);
        let request = self.request();
        if let Some(hook) = self.on_submit.as_mut() {
            hook(&request);
        }
        if let Err(err) = dispatch.dispatch(request) {
            log::warn!(target: "busy.form", "form {} submission refused: {err}", self.id);
            self.toggle(false);
            return Err(err);
        }
        Ok(true)
    }

    /// Processes lifecycle notifications received since the last call, in
    /// order. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(snapshot) = self
            .observer
            .as_ref()
            .and_then(|o| o.subscription().try_next())
        {
            handled += 1;
            if snapshot.state.is_idle() {
                self.toggle(false);
            }
        }
        handled
    }

    /// Releases the subscription and hands the container back. Nothing is
    /// toggled after this.
    pub fn unmount(&mut self) -> Option<C> {
        self.observer = None;
        self.phase = FormPhase::Idle;
        log::debug!(target: "busy.form", "form {} unmounted", self.id);
        self.container.take()
    }

    fn toggle(&mut self, busy: bool) {
        let Some(container) = self.container.as_mut() else {
            log::debug!(
                target: "busy.form",
                "form {} has no container, skipping toggle",
                self.id
            );
            return;
        };

        let mut changed = false;
        container.with_controls(&mut |controls: &mut ControlCollection| {
            changed = toggle::apply(controls, busy);
        });
        self.phase = if busy { FormPhase::Busy } else { FormPhase::Idle };
        if changed {
            log::debug!(target: "busy.form", "form {} -> {:?}", self.id, self.phase);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Control, SubmitButton, TextControl};
    use core_types::NavState;
    use dom::Id;
    use router::Router;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn basic_controls() -> ControlCollection {
        ControlCollection::new(vec![
            Control::TextLike(TextControl::new(Id(1))),
            Control::SubmitButton(SubmitButton::new(Id(2))),
        ])
    }

    fn text_busy(form: &BusyForm<ControlCollection>) -> (bool, bool) {
        match form.container().and_then(|c| c.get(Id(1))) {
            Some(Control::TextLike(t)) => (t.read_only, t.busy),
            other => panic!("unexpected control {other:?}"),
        }
    }

    fn button_busy(form: &BusyForm<ControlCollection>) -> bool {
        form.container()
            .and_then(|c| c.get(Id(2)))
            .is_some_and(Control::is_busy)
    }

    #[test]
    fn navigating_form_goes_busy_until_navigation_idles() {
        let mut router = Router::default();
        let mut form = BusyForm::mount(1, basic_controls(), FormProps::new("/save"), &mut router);
        assert_eq!(text_busy(&form), (false, false));
        assert!(!button_busy(&form));

        assert!(form.submit(&mut router).unwrap());
        assert_eq!(form.phase(), FormPhase::Busy);
        assert_eq!(text_busy(&form), (true, true));
        assert!(button_busy(&form));

        router.advance().unwrap();
        assert_eq!(form.pump(), 2);
        assert_eq!(text_busy(&form), (true, true));

        router.complete().unwrap();
        assert_eq!(form.pump(), 1);
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(text_busy(&form), (false, false));
        assert!(!button_busy(&form));
    }

    /// Keeps the collection observable while the form owns the container.
    #[derive(Clone)]
    struct SharedControls(Rc<RefCell<ControlCollection>>);

    impl ControlContainer for SharedControls {
        fn with_controls(&mut self, f: &mut dyn FnMut(&mut ControlCollection)) {
            f(&mut *self.0.borrow_mut());
        }
    }

    /// Forwards to the router after noting what the controls looked like.
    struct RecordingDispatch {
        router: Router,
        controls: SharedControls,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl Dispatch for RecordingDispatch {
        fn dispatch(&mut self, request: NavRequest) -> Result<(), NavError> {
            let busy = self.controls.0.borrow().any_busy();
            self.events.borrow_mut().push(format!("dispatch busy={busy}"));
            self.router.dispatch(request)
        }
    }

    #[test]
    fn controls_are_busy_before_the_request_is_dispatched() {
        let controls = SharedControls(Rc::new(RefCell::new(basic_controls())));
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut dispatch = RecordingDispatch {
            router: Router::default(),
            controls: controls.clone(),
            events: Rc::clone(&events),
        };

        let hook_controls = controls.clone();
        let hook_events = Rc::clone(&events);
        let mut form = BusyForm::mount(4, controls, FormProps::new("/save"), &mut dispatch.router)
            .on_submit(move |_| {
                let busy = hook_controls.0.borrow().any_busy();
                hook_events.borrow_mut().push(format!("hook busy={busy}"));
            });
        assert!(events.borrow().is_empty());

        assert!(form.submit(&mut dispatch).unwrap());
        assert_eq!(*events.borrow(), vec!["hook busy=true", "dispatch busy=true"]);
        assert_eq!(dispatch.router.nav_gen(), 1);
    }

    #[test]
    fn refused_submission_releases_the_form() {
        let mut router = Router::default();
        let mut form = BusyForm::mount(1, basic_controls(), FormProps::new("save"), &mut router);

        let refused = form.submit(&mut router);
        assert_eq!(refused, Err(NavError::RelativePath("save".to_string())));
        assert!(router.navigation().state.is_idle());
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(text_busy(&form), (false, false));
        assert!(!button_busy(&form));
        assert_eq!(form.pump(), 0);
    }

    #[test]
    fn refused_fetcher_submission_releases_the_form() {
        let mut router = Router::default();
        let props = FormProps::new("  ").fetcher(Some(FetcherKey::new("todo-list")));
        let mut form = BusyForm::mount(1, basic_controls(), props, &mut router);

        assert_eq!(form.submit(&mut router), Err(NavError::EmptyPath));
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(!button_busy(&form));
    }

    #[test]
    fn submit_dispatches_one_request() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut router = Router::default();
        let mut form = BusyForm::mount(4, basic_controls(), FormProps::new("/save"), &mut router)
            .on_submit(move |request| sink.borrow_mut().push(request.clone()));

        form.submit(&mut router).unwrap();
        assert_eq!(router.nav_gen(), 1);
        assert_eq!(
            *seen.borrow(),
            vec![NavRequest::Submit {
                form: 4,
                action: "/save".to_string(),
                fetcher: None,
            }]
        );
        assert_eq!(router.navigation(), NavSnapshot::pending(NavState::Submitting, "/save"));
    }

    #[test]
    fn fetcher_form_ignores_navigation() {
        let mut router = Router::default();
        let props = FormProps::new("/todos").fetcher(None);
        let mut form = BusyForm::mount(7, basic_controls(), props, &mut router);
        let scope = FetcherScope::Form(7);
        assert_eq!(form.observer().and_then(|o| o.fetcher_scope()), Some(&scope));

        form.submit(&mut router).unwrap();
        assert!(router.navigation().state.is_idle());
        assert_eq!(router.fetcher(&scope).state, NavState::Submitting);

        // an unrelated navigation finishing must not release the form
        router.navigate("/elsewhere").unwrap();
        router.complete().unwrap();
        assert_eq!(form.pump(), 1); // the fetcher's own Submitting
        assert_eq!(text_busy(&form), (true, true));

        router.fetchers().advance(&scope).unwrap();
        router.fetchers().complete(&scope).unwrap();
        assert_eq!(form.pump(), 2);
        assert_eq!(text_busy(&form), (false, false));
    }

    #[test]
    fn keyed_fetcher_form_listens_to_shared_fetcher() {
        let mut router = Router::default();
        let key = FetcherKey::new("todo-list");
        let props = FormProps::new("/todos").fetcher(Some(key.clone()));
        let mut form = BusyForm::mount(2, basic_controls(), props, &mut router);

        form.submit(&mut router).unwrap();
        let scope = FetcherScope::Keyed(key);
        assert_eq!(router.fetcher(&scope).state, NavState::Submitting);

        router.fetchers().complete(&scope).unwrap();
        form.pump();
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(!button_busy(&form));
    }

    #[test]
    fn navigating_form_ignores_fetchers() {
        let mut router = Router::default();
        let mut form = BusyForm::mount(1, basic_controls(), FormProps::new("/save"), &mut router);
        form.submit(&mut router).unwrap();

        let scope = FetcherScope::Form(1);
        router.fetchers().submit(&scope, "/other").unwrap();
        router.fetchers().complete(&scope).unwrap();
        assert_eq!(form.pump(), 1); // only the Submitting notification
        assert_eq!(form.phase(), FormPhase::Busy);
    }

    #[test]
    fn stale_idle_before_submit_does_not_release() {
        let mut router = Router::default();
        let mut form = BusyForm::mount(1, basic_controls(), FormProps::new("/save"), &mut router);

        // a navigation that finished before the click, never pumped
        router.navigate("/a").unwrap();
        router.complete().unwrap();

        form.submit(&mut router).unwrap();
        form.pump();
        assert_eq!(form.phase(), FormPhase::Busy);
        assert_eq!(text_busy(&form), (true, true));
    }

    #[test]
    fn mount_clears_leftover_markers() {
        let mut router = Router::default();
        let mut leftover = basic_controls();
        toggle::apply(&mut leftover, true);

        let form = BusyForm::mount(1, leftover, FormProps::new("/save"), &mut router);
        assert_eq!(text_busy(&form), (false, false));
        assert!(!button_busy(&form));
    }

    #[test]
    fn mount_during_pending_navigation_keeps_state() {
        let mut router = Router::default();
        router.submit("/save").unwrap();
        let mut leftover = basic_controls();
        toggle::apply(&mut leftover, true);

        let mut form = BusyForm::mount(1, leftover, FormProps::new("/save"), &mut router);
        assert_eq!(text_busy(&form), (true, true));

        router.complete().unwrap();
        form.pump();
        assert_eq!(text_busy(&form), (false, false));
    }

    #[test]
    fn unmount_releases_subscription() {
        let mut router = Router::default();
        let mut form = BusyForm::mount(1, basic_controls(), FormProps::new("/save"), &mut router);
        form.submit(&mut router).unwrap();

        let container = form.unmount().expect("was mounted");
        assert!(container.any_busy());
        assert!(!form.is_mounted());

        router.complete().unwrap();
        assert_eq!(form.pump(), 0);
        assert_eq!(form.submit(&mut router), Ok(false));
        assert_eq!(router.nav_gen(), 1);
    }

    #[test]
    fn any_submit_control_busies_the_whole_form() {
        let mut router = Router::default();
        let controls = ControlCollection::new(vec![
            Control::SubmitButton(SubmitButton::new(Id(1))),
            Control::TextLike(TextControl::new(Id(2))),
            Control::SubmitButton(SubmitButton::new(Id(3))),
        ]);
        let mut form = BusyForm::mount(1, controls, FormProps::new("/save"), &mut router);
        form.submit(&mut router).unwrap();

        let container = form.container().unwrap();
        assert!(container.iter().all(Control::is_busy));
    }

    #[test]
    fn class_name_merges_author_class() {
        let mut router = Router::default();
        let mut props = FormProps::new("/save");
        props.class_name = Some("settings".into());
        let form = BusyForm::mount(1, basic_controls(), props, &mut router);
        assert_eq!(form.class_name(), "busy-form settings");
    }
}
