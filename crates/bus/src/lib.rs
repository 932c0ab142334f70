use core_types::{FetcherScope, NavError, NavRequest, NavSnapshot};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Broadcasts lifecycle snapshots to every live subscriber.
///
/// Subscribers hold a [`Subscription`]; dropping it releases the slot and the
/// channel prunes the dead sender on the next publish.
#[derive(Debug, Default)]
pub struct StateChannel {
    current: NavSnapshot,
    subscribers: Vec<Sender<NavSnapshot>>,
}

impl StateChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &NavSnapshot {
        &self.current
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        Subscription { rx }
    }

    /// Records `snapshot` as current and notifies subscribers.
    ///
    /// Publishing a snapshot equal to the current one is not a state change and
    /// notifies nobody.
    pub fn publish(&mut self, snapshot: NavSnapshot) -> bool {
        if snapshot == self.current {
            return false;
        }
        self.current = snapshot;

        let before = self.subscribers.len();
        let current = &self.current;
        self.subscribers.retain(|tx| tx.send(current.clone()).is_ok());
        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            log::trace!(target: "bus", "pruned {dropped} released subscriber(s)");
        }
        true
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Receiving end of a [`StateChannel`].
#[derive(Debug)]
pub struct Subscription {
    rx: Receiver<NavSnapshot>,
}

impl Subscription {
    /// Next queued notification, oldest first.
    pub fn try_next(&self) -> Option<NavSnapshot> {
        match self.rx.try_recv() {
            Ok(snapshot) => Some(snapshot),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Discards everything queued so far and returns how many were dropped.
    pub fn discard_pending(&self) -> usize {
        let mut n = 0;
        while self.try_next().is_some() {
            n += 1;
        }
        n
    }
}

impl Iterator for &Subscription {
    type Item = NavSnapshot;

    fn next(&mut self) -> Option<NavSnapshot> {
        self.try_next()
    }
}

/// Navigation machine as seen by its observers.
pub trait NavigationSource {
    fn navigation(&self) -> NavSnapshot;
    fn subscribe_navigation(&mut self) -> Subscription;
}

/// Keyed fetchers for submissions that do not navigate.
pub trait FetcherSource {
    fn fetcher(&self, scope: &FetcherScope) -> NavSnapshot;
    fn subscribe_fetcher(&mut self, scope: &FetcherScope) -> Subscription;
}

/// Entry point that starts a navigation or submission.
///
/// An `Err` means the request was refused and no lifecycle change will follow.
pub trait Dispatch {
    fn dispatch(&mut self, request: NavRequest) -> Result<(), NavError>;
}
