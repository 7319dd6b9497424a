use agent_provider_model::{ErrorKind, Message};
use serde::{Deserialize, Serialize};

/// The preset reply for one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// The round succeeds with this assistant message.
    #[serde(rename = "message")]
    Message(Message),
    /// The round fails with an error of this kind.
    #[serde(rename = "failure")]
    Failure(ErrorKind),
}

impl PresetReply {
    /// Creates a successful reply.
    #[inline]
    pub fn message(message: Message) -> Self {
        PresetReply::Message(message)
    }

    /// Creates a failing reply.
    #[inline]
    pub fn failure(kind: ErrorKind) -> Self {
        PresetReply::Failure(kind)
    }
}

#[cfg(test)]
mod tests {
    use agent_provider_model::ToolCall;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialize_deserialize() {
        let replies = vec![
            PresetReply::message(Message::assistant("").with_tool_calls([
                ToolCall {
                    name: "calculator".to_string(),
                    arguments: json!({ "operation": "add", "a": 5, "b": 3 }),
                },
            ])),
            PresetReply::failure(ErrorKind::Backend),
        ];

        let serialized = serde_json::to_string(&replies).unwrap();
        let deserialized: Vec<PresetReply> =
            serde_json::from_str(&serialized).unwrap();

        assert_eq!(replies, deserialized);
    }
}
