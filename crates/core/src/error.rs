use std::error::Error as StdError;
use std::fmt::{self, Display};

use agent_provider_model::{ChatBackendError, ErrorKind as BackendErrorKind};

use crate::tool;

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A role had no counterpart in the backend's wire format.
    UnsupportedRole,
    /// The backend could not be reached, or answered with a non-success
    /// status.
    Transport,
    /// The backend reported an error.
    Backend,
    /// The backend's reply could not be decoded.
    Decode,
    /// The model asked for a tool that was not offered.
    ToolNotFound,
    /// A tool failed.
    ToolExecutionFailed,
    /// The model identifier was rejected.
    InvalidModel,
    /// The operation is not supported by this provider.
    NotImplemented,
    /// Any other errors.
    Other,
}

impl From<BackendErrorKind> for ErrorKind {
    fn from(kind: BackendErrorKind) -> Self {
        match kind {
            BackendErrorKind::UnsupportedRole => ErrorKind::UnsupportedRole,
            BackendErrorKind::Transport => ErrorKind::Transport,
            BackendErrorKind::Backend => ErrorKind::Backend,
            BackendErrorKind::Decode => ErrorKind::Decode,
            BackendErrorKind::Other => ErrorKind::Other,
        }
    }
}

/// Error type of a provider operation.
#[derive(Debug)]
pub enum Error {
    /// A round with the backend failed.
    Backend(Box<dyn ChatBackendError>),
    /// The model asked for a tool that was not offered.
    ToolNotFound(String),
    /// A tool returned an error.
    ToolExecutionFailed {
        /// Name of the failed tool.
        name: String,
        /// The error returned by the tool.
        cause: tool::Error,
    },
    /// The model identifier was rejected.
    InvalidModel(String),
    /// The operation is not supported by this provider.
    NotImplemented(&'static str),
}

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Backend(err) => err.kind().into(),
            Error::ToolNotFound(_) => ErrorKind::ToolNotFound,
            Error::ToolExecutionFailed { .. } => ErrorKind::ToolExecutionFailed,
            Error::InvalidModel(_) => ErrorKind::InvalidModel,
            Error::NotImplemented(_) => ErrorKind::NotImplemented,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Backend(err) => write!(f, "{err}"),
            Error::ToolNotFound(name) => write!(f, "tool not found: {name}"),
            Error::ToolExecutionFailed { name, cause } => {
                write!(f, "tool {name} failed: {cause}")
            }
            Error::InvalidModel(model) => {
                write!(f, "invalid model identifier: {model:?}")
            }
            Error::NotImplemented(op) => write!(f, "{op} is not implemented"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::ToolExecutionFailed { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
