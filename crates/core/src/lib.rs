//! Core logic of a provider: the tool calling protocol, tool registration
//! and the provider surface offered to the agent.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod error;
mod provider;
pub mod tool;

pub use error::{Error, ErrorKind};
pub use provider::{LlmProvider, MessageStream, Provider};
