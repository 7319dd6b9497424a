//! A local fake chat backend for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use agent_provider_model::{
    ChatBackend, ChatBackendError, ErrorKind, Message, ModelRequest,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl StdError for Error {}

impl ChatBackendError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    replies: VecDeque<PresetReply>,
    requests: Vec<ModelRequest>,
}

/// A local fake backend for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// backend should reply to each round. Replies are consumed in order, one
/// per request. If there are no enough replies in the script, an error will
/// be returned.
///
/// Every request is recorded, and clones of a backend share the same script
/// and records, so a test can keep a clone to inspect what the code under
/// test has sent.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestBackend {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestBackend {
    #[inline]
    pub fn add_reply(&mut self, reply: PresetReply) {
        self.script().replies.push_back(reply);
    }

    #[inline]
    pub fn add_message_reply(&mut self, message: Message) {
        self.add_reply(PresetReply::Message(message));
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns the requests received so far.
    #[inline]
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.script().requests.clone()
    }

    /// Returns how many rounds have been requested.
    #[inline]
    pub fn request_count(&self) -> usize {
        self.script().requests.len()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for TestBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestBackend")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl ChatBackend for TestBackend {
    type Error = crate::Error;

    fn chat(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<Message, Self::Error>> + Send + 'static
    {
        let reply = {
            let mut script = self.script();
            script.requests.push(req.clone());
            script.replies.pop_front()
        };
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            match reply {
                Some(PresetReply::Message(message)) => Ok(message),
                Some(PresetReply::Failure(kind)) => Err(Error {
                    message: "preset failure",
                    kind,
                }),
                None => Err(Error {
                    message: "no enough replies",
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}
