use serde::{Deserialize, Serialize};

/// Features a provider advertises to the agent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    /// The model can request tool calls.
    pub tool_calling: bool,
    /// The provider can stream partial replies.
    pub streaming: bool,
    /// The model accepts image inputs.
    pub images: bool,
    /// Maximum number of tokens in the context window, if known.
    pub context_window: Option<usize>,
}
