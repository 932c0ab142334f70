use core::fmt;
use core_types::NavError;

/// Why a link destination could not be turned into a navigation target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkError {
    /// The document URL used as resolution base did not parse.
    InvalidBase { base: String, reason: url::ParseError },
    /// `href` could not be joined onto the base.
    InvalidHref { href: String, reason: url::ParseError },
    /// Destination leaves the document origin; the router never navigates there.
    CrossOrigin { href: String, origin: String },
    /// The navigation machine refused the request.
    Refused(NavError),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::InvalidBase { base, reason } => {
                write!(f, "invalid base url {base:?}: {reason}")
            }
            LinkError::InvalidHref { href, reason } => {
                write!(f, "cannot resolve link {href:?}: {reason}")
            }
            LinkError::CrossOrigin { href, origin } => {
                write!(f, "link {href:?} points outside {origin}")
            }
            LinkError::Refused(err) => write!(f, "navigation refused: {err}"),
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkError::InvalidBase { reason, .. } | LinkError::InvalidHref { reason, .. } => {
                Some(reason)
            }
            LinkError::Refused(err) => Some(err),
            LinkError::CrossOrigin { .. } => None,
        }
    }
}
