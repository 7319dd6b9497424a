use agent_provider_core::tool::{Error as ToolError, Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

/// Arguments of [`CalculatorTool`].
#[derive(Deserialize, JsonSchema)]
pub struct CalculatorParameters {
    #[schemars(description = "The operation to perform. One of [add, multiply]")]
    operation: String,
    #[schemars(description = "The first operand")]
    a: i64,
    #[schemars(description = "The second operand")]
    b: i64,
}

/// A simple calculator on integers.
pub struct CalculatorTool {
    parameter_schema: Value,
}

impl CalculatorTool {
    /// Creates a new calculator tool.
    #[inline]
    pub fn new() -> Self {
        CalculatorTool {
            parameter_schema: schema_for!(CalculatorParameters).to_value(),
        }
    }
}

impl Default for CalculatorTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for CalculatorTool {
    type Input = CalculatorParameters;

    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Performs basic arithmetic operations: supported operations are 'add' and 'multiply'"
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: CalculatorParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        std::future::ready(calculate(&input))
    }
}

fn calculate(input: &CalculatorParameters) -> ToolResult {
    let result = match input.operation.as_str() {
        "add" => input.a.checked_add(input.b),
        "multiply" => input.a.checked_mul(input.b),
        op => {
            return Err(ToolError::execution_error()
                .with_reason(format!("unsupported operation: {op}")));
        }
    };
    let Some(result) = result else {
        return Err(ToolError::execution_error().with_reason("overflow"));
    };
    Ok(Value::from(result))
}
