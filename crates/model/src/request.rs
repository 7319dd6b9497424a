use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Message;

/// A single round to be sent to a chat backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelRequest {
    /// Identifier of the model that should answer.
    pub model: String,
    /// The input messages.
    pub messages: Vec<Message>,
    /// Tools that are available to the model.
    pub tools: Vec<ToolDescriptor>,
}

/// Describes a tool that can be used by the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Name of the tool.
    pub name: String,
    /// Description of the tool.
    pub description: String,
    /// Parameters definition of the tool.
    ///
    /// For most backends, the parameters should typically be defined by a
    /// [JSON schema](https://json-schema.org/). The value is never
    /// inspected on the way to the backend.
    pub parameters: Value,
}
