use agent_provider_core::tool::{Tool, ToolSet};
use agent_provider_core::{Error, LlmProvider};
use agent_provider_model::Message;

use crate::tools::CalculatorTool;

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    provider: Box<dyn LlmProvider>,
    system_prompt: Option<String>,
    tools: ToolSet,
}

impl SessionBuilder {
    /// Creates a session builder with a specified provider.
    pub fn with_provider<P: LlmProvider + 'static>(provider: P) -> Self {
        Self {
            provider: Box::new(provider),
            system_prompt: None,
            tools: ToolSet::new(),
        }
    }

    /// Sets the system prompt for the conversation.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Registers an extra tool.
    #[inline]
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Self {
        self.tools.add_tool(tool);
        self
    }

    /// Builds a new session with the built-in tools registered.
    pub fn build(self) -> Session {
        let history = self
            .system_prompt
            .map(Message::system)
            .into_iter()
            .collect();
        Session {
            provider: self.provider,
            tools: self.tools.with_tool(CalculatorTool::new()),
            history,
        }
    }
}

/// A chat session that keeps the conversation history.
///
/// Each turn sends the whole history to the provider. The user message and
/// the final assistant message are committed to the history only when the
/// turn succeeds; tool results stay inside the turn.
pub struct Session {
    provider: Box<dyn LlmProvider>,
    tools: ToolSet,
    history: Vec<Message>,
}

impl Session {
    /// Sends a user message and waits for the assistant reply.
    pub async fn send_message<S: Into<String>>(
        &mut self,
        text: S,
    ) -> Result<Message, Error> {
        self.history.push(Message::user(text));
        match self.provider.generate(&self.history, &self.tools).await {
            Ok(reply) => {
                self.history.push(reply.clone());
                debug!("turn finished with {} messages", self.history.len());
                Ok(reply)
            }
            Err(err) => {
                warn!("turn failed: {err}");
                self.history.pop();
                Err(err)
            }
        }
    }

    /// Switches the model used by the following turns.
    #[inline]
    pub fn use_model(&mut self, model: &str) -> Result<(), Error> {
        self.provider.use_model(model)
    }

    /// Returns the conversation so far.
    #[inline]
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Returns the tools offered to the model.
    #[inline]
    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }
}
