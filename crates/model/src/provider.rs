use std::error::Error;

use crate::Message;
use crate::error::ErrorKind;
use crate::request::ModelRequest;

/// The error type for a chat backend.
pub trait ChatBackendError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a chat backend, which answers one round of a
/// conversation with a complete assistant message.
///
/// Once the backend is created, it should behave like a stateless object.
/// It can still have internal state (a connection pool, for example), but
/// callers should not rely on it, and the backend should be prepared for
/// being dropped anytime.
///
/// Backends never execute tools. Tool calls requested by the model are
/// returned in [`Message::tool_calls`] and left to the caller.
pub trait ChatBackend: Send + Sync {
    /// The error type that may be returned by the backend.
    type Error: ChatBackendError;

    /// Sends a request to the backend and waits for the reply.
    ///
    /// Dropping the returned future cancels the round.
    fn chat(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<Message, Self::Error>> + Send + 'static;
}
