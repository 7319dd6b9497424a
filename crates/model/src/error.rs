use std::error::Error;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A role token has no counterpart on the other side of a translation.
    UnsupportedRole,
    /// The request could not be delivered, or the backend answered with a
    /// non-success HTTP status.
    Transport,
    /// The backend reported an error in an otherwise successful response.
    Backend,
    /// The response body could not be decoded.
    Decode,
    /// Any other errors.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnsupportedRole => write!(f, "Unsupported role"),
            ErrorKind::Transport => write!(f, "Transport error"),
            ErrorKind::Backend => write!(f, "Backend error"),
            ErrorKind::Decode => write!(f, "Decode error"),
            ErrorKind::Other => write!(f, "Other error"),
        }
    }
}

/// Returned when a role token is not one of `system`, `user`, `assistant`
/// or `tool`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnsupportedRole(pub String);

impl Display for UnsupportedRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported role: {:?}", self.0)
    }
}

impl Error for UnsupportedRole {}
