//! An abstraction layer for different chat backends.
//!
//! This crate establishes an unified protocol for the agent to interact
//! with various supported backends, so that the agent can seamlessly switch
//! between them without modifying the orchestration code.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod capabilities;
mod error;
mod message;
mod provider;
mod request;

pub use capabilities::*;
pub use error::*;
pub use message::*;
pub use provider::*;
pub use request::*;
