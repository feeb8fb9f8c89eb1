//! Tool descriptors consumed by the tool-call annotator.

use serde_json::Value;

/// Descriptor for a tool exposed to the model.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDescriptor {
    pub r#type: String,
    pub function: FunctionDescriptor,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDescriptor {
    /// Create a function-typed tool descriptor.
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            r#type: "function".to_string(),
            function: FunctionDescriptor {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn description(&self) -> &str {
        &self.function.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_descriptor_accessors() {
        let descriptor = ToolDescriptor::function(
            "search",
            "Search the web",
            json!({"type": "object", "properties": {"query": {"type": "string"}}}),
        );

        assert_eq!(descriptor.r#type, "function");
        assert_eq!(descriptor.name(), "search");
        assert_eq!(descriptor.description(), "Search the web");
    }

    #[test]
    fn test_tool_descriptor_serialization() {
        let descriptor = ToolDescriptor::function("search", "Search the web", json!({}));
        let serialized = serde_json::to_string(&descriptor).unwrap();
        assert!(serialized.contains("search"));
        assert!(serialized.contains("Search the web"));

        let parsed: ToolDescriptor = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed.name(), "search");
    }
}
