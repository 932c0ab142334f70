use crate::error::normalize_path;
use crate::fetchers::Fetchers;
use bus::{Dispatch, FetcherSource, NavigationSource, StateChannel, Subscription};
use core_types::{FetcherScope, NavError, NavGeneration, NavRequest, NavSnapshot, NavState};

/// Single-threaded navigation machine.
///
/// Every state change is published to subscribers; a new navigation while one
/// is pending supersedes it.
#[derive(Debug)]
pub struct Router {
    location: String,
    nav: StateChannel,
    nav_gen: NavGeneration,
    fetchers: Fetchers,
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router {
    pub fn new(initial_location: &str) -> Self {
        Self {
            location: initial_location.to_string(),
            nav: StateChannel::new(),
            nav_gen: 0,
            fetchers: Fetchers::new(),
        }
    }

    /// Last committed location.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn nav_gen(&self) -> NavGeneration {
        self.nav_gen
    }

    pub fn fetchers(&mut self) -> &mut Fetchers {
        &mut self.fetchers
    }

    pub fn navigate(&mut self, path: &str) -> Result<NavGeneration, NavError> {
        self.start(NavState::Loading, path)
    }

    pub fn submit(&mut self, action: &str) -> Result<NavGeneration, NavError> {
        self.start(NavState::Submitting, action)
    }

    /// Submitting -> Loading: the action finished and loaders are running.
    pub fn advance(&mut self) -> Result<(), NavError> {
        let current = self.nav.current().clone();
        match (current.state, current.location) {
            (NavState::Submitting, Some(target)) => {
                log::debug!(target: "router.nav", "gen {} loading {target}", self.nav_gen);
                self.nav.publish(NavSnapshot::pending(NavState::Loading, target));
                Ok(())
            }
            (NavState::Loading, Some(_)) => Ok(()),
            _ => Err(NavError::NotPending),
        }
    }

    /// Commits the pending target and goes idle.
    pub fn complete(&mut self) -> Result<(), NavError> {
        let current = self.nav.current();
        let Some(target) = current.location.clone().filter(|_| current.state.is_pending())
        else {
            return Err(NavError::NotPending);
        };
        log::debug!(target: "router.nav", "gen {} committed {target}", self.nav_gen);
        self.location = target;
        self.nav.publish(NavSnapshot::idle());
        Ok(())
    }

    fn start(&mut self, state: NavState, path: &str) -> Result<NavGeneration, NavError> {
        let path = normalize_path(path)?;
        if self.nav.current().state.is_pending() {
            log::debug!(
                target: "router.nav",
                "gen {} superseded by {path}",
                self.nav_gen
            );
        }
        self.nav_gen = self.nav_gen.wrapping_add(1);
        log::debug!(target: "router.nav", "gen {} {state:?} {path}", self.nav_gen);
        self.nav.publish(NavSnapshot::pending(state, path));
        Ok(self.nav_gen)
    }
}

impl NavigationSource for Router {
    fn navigation(&self) -> NavSnapshot {
        self.nav.current().clone()
    }

    fn subscribe_navigation(&mut self) -> Subscription {
        self.nav.subscribe()
    }
}

impl FetcherSource for Router {
    fn fetcher(&self, scope: &FetcherScope) -> NavSnapshot {
        self.fetchers.snapshot(scope)
    }

    fn subscribe_fetcher(&mut self, scope: &FetcherScope) -> Subscription {
        self.fetchers.subscribe(scope)
    }
}

impl Dispatch for Router {
    fn dispatch(&mut self, request: NavRequest) -> Result<(), NavError> {
        let result = match &request {
            NavRequest::Navigate { path } => self.navigate(path).map(|_| ()),
            NavRequest::Submit {
                action,
                fetcher: None,
                ..
            } => self.submit(action).map(|_| ()),
            NavRequest::Submit {
                action,
                fetcher: Some(scope),
                ..
            } => self.fetchers.submit(scope, action),
        };
        if let Err(err) = &result {
            log::warn!(target: "router.nav", "refused {request:?}: {err}");
        }
        result
    }
}
