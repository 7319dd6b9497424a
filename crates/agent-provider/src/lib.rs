//! An agent front-end for a local Ollama server, with tool calling.
//!
//! The crate includes a CLI tool for using in the terminal. And you can also
//! use it as a library to bring the provider into your own host apps.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod session;
pub mod tools;

pub use session::{Session, SessionBuilder};

/// Re-exports of [`agent_provider_core`] crate.
pub mod core {
    pub use agent_provider_core::*;
}

/// Re-exports of [`agent_provider_model`] crate.
pub mod model {
    pub use agent_provider_model::*;
}

/// Re-exports of [`agent_provider_ollama_model`] crate.
pub mod ollama {
    pub use agent_provider_ollama_model::*;
}
