//! A chat backend for a local Ollama server.

#[macro_use]
extern crate tracing;

mod config;
pub mod models;
pub mod proto;
mod transport;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use agent_provider_model::{
    ChatBackend, ChatBackendError, ErrorKind, Message, ModelRequest,
};
use reqwest::Client;

pub use config::{OllamaConfig, OllamaConfigBuilder};
pub use transport::Transport;

/// Error type for [`OllamaBackend`].
#[derive(Debug)]
pub enum Error {
    /// The server replied with a role token this crate doesn't know.
    UnsupportedRole(String),
    /// The request could not be sent or the body could not be read.
    Connection(String),
    /// The server replied with a non-success status.
    Transport {
        /// The HTTP status code.
        status: u16,
        /// The raw response body.
        body: String,
    },
    /// The server reported an error in the response body.
    Backend(String),
    /// The response body is not a valid chat response.
    Decode(serde_json::Error),
}

impl Error {
    /// Returns the HTTP status code, if the server replied with a
    /// non-success status.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body, if the server replied with a
    /// non-success status.
    #[inline]
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Transport { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedRole(role) => {
                write!(f, "unsupported role: {role:?}")
            }
            Error::Connection(reason) => {
                write!(f, "error making request: {reason}")
            }
            Error::Transport { status, body } => {
                write!(f, "unexpected status code: {status}, body: {body}")
            }
            Error::Backend(reason) => write!(f, "ollama error: {reason}"),
            Error::Decode(err) => {
                write!(f, "error unmarshaling response: {err}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl ChatBackendError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedRole(_) => ErrorKind::UnsupportedRole,
            Error::Connection(_) | Error::Transport { .. } => {
                ErrorKind::Transport
            }
            Error::Backend(_) => ErrorKind::Backend,
            Error::Decode(_) => ErrorKind::Decode,
        }
    }
}

/// Ollama chat backend.
#[derive(Clone, Debug)]
pub struct OllamaBackend {
    transport: Transport,
    config: Arc<OllamaConfig>,
}

impl OllamaBackend {
    /// Creates a new `OllamaBackend` with the given configuration.
    #[inline]
    pub fn new(config: OllamaConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Creates a new `OllamaBackend` that sends requests through a
    /// caller-built HTTP client.
    #[inline]
    pub fn with_client(config: OllamaConfig, client: Client) -> Self {
        let transport = Transport::new(client, config.chat_url());
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    /// Returns the configuration of this backend.
    #[inline]
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }
}

impl ChatBackend for OllamaBackend {
    type Error = Error;

    fn chat(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<Message, Self::Error>> + Send + 'static
    {
        let chat_req = proto::create_request(req);
        trace!("sending chat request: {chat_req:?}");
        let resp_fut = self.transport.chat(&chat_req);

        async move {
            let wire_msg = resp_fut.await?;
            proto::from_wire(wire_msg)
                .map_err(|err| Error::UnsupportedRole(err.0))
        }
    }
}
