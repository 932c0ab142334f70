use crate::error::normalize_path;
use bus::{StateChannel, Subscription};
use core_types::{FetcherScope, NavError, NavSnapshot, NavState};
use std::collections::HashMap;

/// Registry of fetchers, created lazily on first use of a scope.
#[derive(Debug, Default)]
pub struct Fetchers {
    channels: HashMap<FetcherScope, StateChannel>,
}

impl Fetchers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self, scope: &FetcherScope) -> NavSnapshot {
        self.channels
            .get(scope)
            .map(|c| c.current().clone())
            .unwrap_or_default()
    }

    pub fn subscribe(&mut self, scope: &FetcherScope) -> Subscription {
        self.channel(scope).subscribe()
    }

    pub fn submit(&mut self, scope: &FetcherScope, action: &str) -> Result<(), NavError> {
        let action = normalize_path(action)?;
        log::debug!(target: "router.fetcher", "{scope:?} submitting to {action}");
        self.channel(scope)
            .publish(NavSnapshot::pending(NavState::Submitting, action));
        Ok(())
    }

    /// Submitting -> Loading (revalidation after the action returned).
    pub fn advance(&mut self, scope: &FetcherScope) -> Result<(), NavError> {
        let current = self.snapshot(scope);
        let Some(location) = current.location.filter(|_| current.state.is_pending()) else {
            return Err(NavError::NotPending);
        };
        self.channel(scope)
            .publish(NavSnapshot::pending(NavState::Loading, location));
        Ok(())
    }

    pub fn complete(&mut self, scope: &FetcherScope) -> Result<(), NavError> {
        if !self.snapshot(scope).state.is_pending() {
            return Err(NavError::NotPending);
        }
        log::debug!(target: "router.fetcher", "{scope:?} idle");
        self.channel(scope).publish(NavSnapshot::idle());
        Ok(())
    }

    fn channel(&mut self, scope: &FetcherScope) -> &mut StateChannel {
        self.channels.entry(scope.clone()).or_default()
    }
}
