//! Wire types of the Ollama chat endpoint, and conversions between them and
//! the backend-agnostic types.

use agent_provider_model::{
    Message, ModelRequest, Role, ToolCall, ToolDescriptor, UnsupportedRole,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// -------------------------------
// Types exchanged with the server
// -------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireToolCall {
    pub function: FunctionCall,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    // Kept as a raw token so that unknown roles fail translation instead of
    // failing to decode.
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub images: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    // Decoded after `error` is checked.
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FunctionTool {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WireTool {
    pub r#type: &'static str,
    pub function: FunctionTool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool>,
    pub stream: bool,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(req: &ModelRequest) -> ChatRequest {
    ChatRequest {
        model: req.model.clone(),
        messages: to_wire_many(&req.messages),
        tools: to_wire_tools(&req.tools),
        stream: false,
    }
}

pub fn to_wire(msg: &Message) -> WireMessage {
    WireMessage {
        role: msg.role.as_str().to_owned(),
        content: msg.content.clone(),
        images: msg.images.clone(),
        tool_calls: msg
            .tool_calls
            .iter()
            .map(|call| WireToolCall {
                function: FunctionCall {
                    name: call.name.clone(),
                    arguments: call.arguments.clone(),
                },
            })
            .collect(),
        tool_name: msg.tool_name.clone(),
    }
}

pub fn from_wire(msg: WireMessage) -> Result<Message, UnsupportedRole> {
    let role: Role = msg.role.parse()?;
    Ok(Message {
        role,
        content: msg.content,
        images: msg.images,
        tool_calls: msg
            .tool_calls
            .into_iter()
            .map(|call| ToolCall {
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect(),
        tool_name: msg.tool_name,
    })
}

#[inline]
pub fn to_wire_many(messages: &[Message]) -> Vec<WireMessage> {
    messages.iter().map(to_wire).collect()
}

#[inline]
pub fn to_wire_tools(tools: &[ToolDescriptor]) -> Vec<WireTool> {
    tools
        .iter()
        .map(|tool| WireTool {
            r#type: "function",
            function: FunctionTool {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            },
        })
        .collect()
}
