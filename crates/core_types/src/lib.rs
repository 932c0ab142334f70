use core::fmt;

pub type FormId = u64;
pub type NavGeneration = u64;

/// Phase of a navigation or fetcher lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NavState {
    #[default]
    Idle,
    Loading,
    Submitting,
}

impl NavState {
    pub fn is_idle(self) -> bool {
        matches!(self, NavState::Idle)
    }

    /// `true` while a request is in flight (submitting or loading).
    pub fn is_pending(self) -> bool {
        matches!(self, NavState::Loading | NavState::Submitting)
    }
}

/// What a lifecycle source reports on every change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavSnapshot {
    pub state: NavState,
    /// Absolute path the pending navigation targets. `None` while idle.
    pub location: Option<String>,
}

impl NavSnapshot {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn pending(state: NavState, location: impl Into<String>) -> Self {
        Self {
            state,
            location: Some(location.into()),
        }
    }

    /// `true` when a request is in flight towards exactly `path`.
    pub fn targets(&self, path: &str) -> bool {
        self.state.is_pending() && self.location.as_deref() == Some(path)
    }
}

/// Caller-supplied fetcher scope. Forms without a key use their own default fetcher.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetcherKey(pub String);

impl FetcherKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl From<&str> for FetcherKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Which fetcher a non-navigating submission runs on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FetcherScope {
    /// Shared fetcher addressed by a caller-supplied key.
    Keyed(FetcherKey),
    /// The form's own fetcher when no key is given.
    Form(FormId),
}

/// A request handed to the navigation machine after the busy state is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavRequest {
    Navigate {
        path: String,
    },
    Submit {
        form: FormId,
        action: String,
        /// `None` for a navigating submission.
        fetcher: Option<FetcherScope>,
    },
}

/// Why the navigation machine refused a request or command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavError {
    /// Navigation target was empty after trimming.
    EmptyPath,
    /// Target was not an absolute path (`/…`).
    RelativePath(String),
    /// The command needs a pending lifecycle but it is idle.
    NotPending,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::EmptyPath => f.write_str("cannot navigate to an empty path"),
            NavError::RelativePath(path) => {
                write!(f, "navigation target must be an absolute path, got {path:?}")
            }
            NavError::NotPending => f.write_str("no navigation is in flight"),
        }
    }
}

impl std::error::Error for NavError {}
