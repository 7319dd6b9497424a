//! Tool call supports.

mod error;
mod object;
mod set;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use error::{Error, ErrorKind};
pub use set::ToolSet;

/// The result of a tool call.
pub type ToolResult = Result<Value, Error>;

/// A tool that can be called by the model.
///
/// Implementations of this trait should be stateless, and may not maintain any
/// internal state.
///
/// Arguments from the model are handed to the tool untouched. A tool that
/// wants them raw can use [`Value`] as its `Input`; otherwise they are
/// deserialized into `Input`, and a mismatch is reported as an
/// [`ErrorKind::InvalidInput`] error without running the tool.
pub trait Tool: Send + Sync + 'static {
    /// The type of input that the tool accepts.
    type Input: DeserializeOwned;

    /// Returns the name of the tool.
    fn name(&self) -> &str;

    /// Returns the description of the tool.
    fn description(&self) -> &str;

    /// Returns the parameter schema of the tool.
    fn parameter_schema(&self) -> &Value;

    /// Executes the tool with the given input.
    ///
    /// This method must return a future that is fully independent of `self`,
    /// and the future should be cancellation safe.
    fn execute(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = ToolResult> + Send + 'static;
}

/// Renders a tool output as the text content of a `tool` message.
///
/// Strings are used as they are, anything else becomes compact JSON.
pub fn render_output(output: &Value) -> String {
    match output {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
