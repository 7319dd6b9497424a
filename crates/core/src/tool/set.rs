use std::fmt::{self, Debug};
use std::sync::Arc;

use agent_provider_model::ToolDescriptor;

use crate::tool::Tool;
use crate::tool::object::{ToolObject, ToolObjectImpl};

/// The tools offered to the model for one generation.
///
/// Tools keep the order they were added in, which is also the order they
/// are advertised to the backend. Names are not checked for uniqueness;
/// when two tools share a name, calls go to the first one.
#[derive(Clone, Default)]
pub struct ToolSet {
    tools: Vec<Arc<dyn ToolObject>>,
}

impl ToolSet {
    /// Creates an empty tool set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tool.
    pub fn add_tool<T: Tool>(&mut self, tool: T) {
        self.tools.push(Arc::new(ToolObjectImpl(tool)));
    }

    /// Adds a tool, builder style.
    #[inline]
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Self {
        self.add_tool(tool);
        self
    }

    /// Returns the number of tools.
    #[inline]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns `true` if there are no tools.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Returns the names of the tools, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|tool| tool.name())
    }

    /// Describes every tool for the backend.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|tool| ToolDescriptor {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                parameters: tool.parameter_schema().clone(),
            })
            .collect()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Arc<dyn ToolObject>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }
}

impl Debug for ToolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use serde_json::{Value, json};

    use super::*;
    use crate::tool::ToolResult;

    struct NamedTool {
        name: &'static str,
        description: &'static str,
        schema: Value,
    }

    impl NamedTool {
        fn new(name: &'static str, description: &'static str) -> Self {
            Self {
                name,
                description,
                schema: json!({ "type": "object", "title": name }),
            }
        }
    }

    impl Tool for NamedTool {
        type Input = Value;

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        fn parameter_schema(&self) -> &Value {
            &self.schema
        }

        fn execute(
            &self,
            _input: Self::Input,
        ) -> impl Future<Output = ToolResult> + Send + 'static {
            ready(Ok(Value::String(self.description.to_owned())))
        }
    }

    #[test]
    fn test_descriptors_keep_order() {
        let tools = ToolSet::new()
            .with_tool(NamedTool::new("b", "second letter"))
            .with_tool(NamedTool::new("a", "first letter"))
            .with_tool(NamedTool::new("b", "shadowed"));

        let descriptors = tools.descriptors();
        assert_eq!(descriptors.len(), 3);
        let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "b"]);
        assert_eq!(descriptors[1].parameters["title"], json!("a"));
        assert_eq!(format!("{tools:?}"), r#"["b", "a", "b"]"#);
    }

    #[tokio::test]
    async fn test_lookup() {
        let tools = ToolSet::new()
            .with_tool(NamedTool::new("b", "second letter"))
            .with_tool(NamedTool::new("b", "shadowed"));

        let tool = tools.get("b").unwrap();
        assert_eq!(tool.execute(json!({})).await.unwrap(), json!("second letter"));
        assert!(tools.get("B").is_none());
        assert!(ToolSet::new().get("b").is_none());
    }
}
