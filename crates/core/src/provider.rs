
use agent_provider_model::{
    Capabilities, ChatBackend, Message, ModelRequest, ToolCall,
};
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use tracing::Instrument;

use crate::Error;
use crate::tool::{ToolSet, render_output};

/// A stream of partial assistant messages.
pub type MessageStream = BoxStream<'static, Result<Message, Error>>;

/// The surface every provider offers to the agent.
///
/// Only [`generate`](LlmProvider::generate) and
/// [`use_model`](LlmProvider::use_model) are required. The other operations
/// default to [`Error::NotImplemented`], so callers written against this
/// trait work with any provider.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Produces the next assistant message for the conversation, running
    /// the tools the model asks for.
    async fn generate(
        &self,
        messages: &[Message],
        tools: &ToolSet,
    ) -> Result<Message, Error>;

    /// Switches the model used by subsequent generations.
    fn use_model(&mut self, model: &str) -> Result<(), Error>;

    /// Describes what the provider and its model support.
    async fn capabilities(&self) -> Result<Capabilities, Error> {
        Err(Error::NotImplemented("capabilities"))
    }

    /// Produces the next assistant message piece by piece.
    async fn generate_stream(
        &self,
        _messages: &[Message],
        _tools: &ToolSet,
    ) -> Result<MessageStream, Error> {
        Err(Error::NotImplemented("generate_stream"))
    }

    /// Lists the models available on the backend.
    async fn list_models(&self) -> Result<Vec<String>, Error> {
        Err(Error::NotImplemented("list_models"))
    }

    /// Estimates the number of tokens in a text.
    async fn estimate_tokens(&self, _text: &str) -> Result<usize, Error> {
        Err(Error::NotImplemented("estimate_tokens"))
    }

    /// Checks whether the messages are acceptable for the model.
    async fn validate_prompt(
        &self,
        _messages: &[Message],
    ) -> Result<(), Error> {
        Err(Error::NotImplemented("validate_prompt"))
    }
}

/// A provider that drives a [`ChatBackend`] through the tool calling
/// protocol.
///
/// A generation takes at most two rounds. The first round offers the tools;
/// if the reply asks for tool calls, they are executed one by one in the
/// order the model emitted them, each result is appended to a working copy
/// of the conversation as a `tool` message, and a second round is sent with
/// the same model and tools. The second reply is final, even if it asks for
/// more tool calls.
///
/// Any failure aborts the whole generation: nothing partial is returned.
pub struct Provider<B> {
    backend: B,
    model: String,
}

impl<B: ChatBackend> Provider<B> {
    /// Creates a provider that talks to `backend` using `model`.
    #[inline]
    pub fn new<S: Into<String>>(backend: B, model: S) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// Returns the active model identifier.
    #[inline]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    async fn round(&self, req: &ModelRequest) -> Result<Message, Error> {
        trace!("sending a round: {req:?}");
        self.backend.chat(req).await.map_err(|err| {
            error!("round failed: {err}");
            Error::Backend(Box::new(err))
        })
    }

    async fn run_tool_calls(
        &self,
        tool_calls: Vec<ToolCall>,
        tools: &ToolSet,
        messages: &mut Vec<Message>,
    ) -> Result<(), Error> {
        for call in tool_calls {
            let Some(tool) = tools.get(&call.name) else {
                warn!("tool not found: {}", call.name);
                return Err(Error::ToolNotFound(call.name));
            };
            trace!("calling {} with args: {:?}", call.name, call.arguments);
            let output = match tool.execute(call.arguments).await {
                Ok(output) => output,
                Err(cause) => {
                    warn!("tool {} failed: {cause}", call.name);
                    return Err(Error::ToolExecutionFailed {
                        name: call.name,
                        cause,
                    });
                }
            };
            messages.push(Message::tool(call.name, render_output(&output)));
        }
        Ok(())
    }
}

impl<B> std::fmt::Debug for Provider<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<B: ChatBackend> LlmProvider for Provider<B> {
    async fn generate(
        &self,
        messages: &[Message],
        tools: &ToolSet,
    ) -> Result<Message, Error> {
        let span = debug_span!("generate", model = %self.model);
        async move {
            let mut req = ModelRequest {
                model: self.model.clone(),
                messages: messages.to_vec(),
                tools: tools.descriptors(),
            };

            let reply = self.round(&req).await?;
            if reply.tool_calls.is_empty() {
                debug!("no tool calls, done after one round");
                return Ok(reply);
            }

            debug!("model asked for {} tool call(s)", reply.tool_calls.len());
            self.run_tool_calls(reply.tool_calls, tools, &mut req.messages)
                .await?;

            let reply = self.round(&req).await?;
            if !reply.tool_calls.is_empty() {
                debug!(
                    "ignoring {} tool call(s) in the second round",
                    reply.tool_calls.len()
                );
            }
            Ok(reply)
        }
        .instrument(span)
        .await
    }

    fn use_model(&mut self, model: &str) -> Result<(), Error> {
        if model.trim().is_empty() {
            return Err(Error::InvalidModel(model.to_owned()));
        }
        debug!("switching model from {} to {model}", self.model);
        self.model = model.to_owned();
        Ok(())
    }
}
