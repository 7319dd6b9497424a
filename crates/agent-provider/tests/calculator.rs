use std::future::ready;

use agent_provider::SessionBuilder;
use agent_provider::core::tool::{Tool, ToolResult};
use agent_provider::core::{ErrorKind, Provider};
use agent_provider::model::Role;
use agent_provider::ollama::{OllamaBackend, OllamaConfigBuilder, models};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches chat requests by whether they carry tool results.
struct CarriesToolResults(bool);

impl Match for CarriesToolResults {
    fn matches(&self, request: &Request) -> bool {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return false;
        };
        let has_tool = body["messages"]
            .as_array()
            .is_some_and(|msgs| msgs.iter().any(|m| m["role"] == "tool"));
        has_tool == self.0
    }
}

fn backend_for(server: &MockServer) -> OllamaBackend {
    let addr = server.address();
    let config = OllamaConfigBuilder::new()
        .with_host(format!("http://{}", addr.ip()))
        .with_port(addr.port())
        .build();
    OllamaBackend::new(config)
}

fn tool_call_reply(name: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "model": models::QWEN2_5,
        "message": {
            "role": "assistant",
            "content": "",
            "tool_calls": [{
                "function": {
                    "name": name,
                    "arguments": { "operation": "add", "a": 5, "b": 3 }
                }
            }]
        },
        "done": true
    }))
}

fn text_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "model": models::QWEN2_5,
        "message": { "role": "assistant", "content": text },
        "done": true
    }))
}

async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|req| serde_json::from_slice(&req.body).unwrap())
        .collect()
}

#[tokio::test]
async fn test_calculator_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(CarriesToolResults(false))
        .respond_with(tool_call_reply("calculator"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(CarriesToolResults(true))
        .respond_with(text_reply("5 + 3 = 8"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Provider::new(backend_for(&server), models::QWEN2_5);
    let mut session = SessionBuilder::with_provider(provider).build();
    let reply = session.send_message("What is 5 + 3?").await.unwrap();
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.content, "5 + 3 = 8");

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["stream"], json!(false));
    assert_eq!(bodies[0]["model"], json!(models::QWEN2_5));
    assert_eq!(bodies[0]["tools"][0]["type"], json!("function"));
    assert_eq!(bodies[0]["tools"][0]["function"]["name"], json!("calculator"));

    let tool_msgs: Vec<_> = bodies[1]["messages"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|m| m["role"] == "tool")
        .collect();
    assert_eq!(tool_msgs.len(), 1);
    assert_eq!(tool_msgs[0]["content"], json!("8"));
    assert_eq!(bodies[1]["tools"], bodies[0]["tools"]);

    // Tool results are not kept in the history.
    let roles: Vec<_> = session.history().iter().map(|m| m.role).collect();
    assert_eq!(roles, [Role::User, Role::Assistant]);
}

/// Replies with the arguments it was called with.
struct RawArgsTool {
    parameter_schema: Value,
}

impl Tool for RawArgsTool {
    type Input = Value;

    fn name(&self) -> &str {
        "raw_args"
    }

    fn description(&self) -> &str {
        "Returns its arguments"
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: Value,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        ready(Ok(Value::String(input.to_string())))
    }
}

#[tokio::test]
async fn test_tool_receives_arguments_verbatim() {
    let arguments =
        r#"{"operation":"add","b":3,"a":123456789012345678901234567890}"#;
    let first_reply = format!(
        r#"{{"message":{{"role":"assistant","content":"","tool_calls":[{{"function":{{"name":"raw_args","arguments":{arguments}}}}}]}},"done":true}}"#
    );

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(CarriesToolResults(false))
        .respond_with(ResponseTemplate::new(200).set_body_string(first_reply))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(CarriesToolResults(true))
        .respond_with(text_reply("done"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Provider::new(backend_for(&server), models::QWEN2_5);
    let mut session = SessionBuilder::with_provider(provider)
        .with_tool(RawArgsTool {
            parameter_schema: json!({ "type": "object" }),
        })
        .build();
    session.send_message("Add them").await.unwrap();

    let bodies = received_bodies(&server).await;
    let tool_msg = bodies[1]["messages"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["role"] == "tool")
        .unwrap();
    assert_eq!(tool_msg["content"], json!(arguments));
    assert_eq!(tool_msg["tool_name"], json!("raw_args"));
}

#[tokio::test]
async fn test_plain_answer_sends_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(text_reply("Hi there!"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Provider::new(backend_for(&server), models::QWEN2_5);
    let mut session = SessionBuilder::with_provider(provider)
        .with_system_prompt("Be brief.")
        .build();
    let reply = session.send_message("Hello").await.unwrap();
    assert_eq!(reply.content, "Hi there!");

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["messages"][0]["role"], json!("system"));
    assert_eq!(bodies[0]["messages"][1]["content"], json!("Hello"));
}

#[tokio::test]
async fn test_unknown_tool_stops_the_turn() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(tool_call_reply("weather"))
        .mount(&server)
        .await;

    let provider = Provider::new(backend_for(&server), models::QWEN2_5);
    let mut session = SessionBuilder::with_provider(provider).build();
    let err = session.send_message("What is 5 + 3?").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ToolNotFound);
    assert!(err.to_string().contains("weather"));
    assert!(session.history().is_empty());

    assert_eq!(received_bodies(&server).await.len(), 1);
}

#[tokio::test]
async fn test_server_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("model not loaded"),
        )
        .mount(&server)
        .await;

    let provider = Provider::new(backend_for(&server), models::QWEN2_5);
    let mut session = SessionBuilder::with_provider(provider).build();
    let err = session.send_message("Hello").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(message.contains("model not loaded"));

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "model 'nope' not found"
        })))
        .mount(&server)
        .await;

    let provider = Provider::new(backend_for(&server), "nope");
    let mut session = SessionBuilder::with_provider(provider).build();
    let err = session.send_message("Hello").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Backend);
    assert!(err.to_string().contains("model 'nope' not found"));
}
