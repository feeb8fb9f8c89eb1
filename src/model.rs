//! Generative-content domain types shared by the telemetry pipeline.
//!
//! These model the units an agent runtime produces during a run: request and
//! response payloads, message content, and the function-call/function-response
//! parts the debug graph is built from. Everything here is plain serde data;
//! the telemetry layer serializes these into span attributes.

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Inline binary payload carried in a content part (image bytes, audio, etc).
///
/// The data is held base64-encoded so the struct serializes cleanly into span
/// attributes and JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

impl Blob {
    /// Create a blob from raw bytes, base64-encoding the payload.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// A function call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FunctionCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub args: HashMap<String, Value>,
}

/// The result of executing a function call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FunctionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

/// One piece of message content. At most one field is set per part.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn function_call(call: FunctionCall) -> Self {
        Self {
            function_call: Some(call),
            ..Default::default()
        }
    }

    pub fn function_response(response: FunctionResponse) -> Self {
        Self {
            function_response: Some(response),
            ..Default::default()
        }
    }

    pub fn inline_data(blob: Blob) -> Self {
        Self {
            inline_data: Some(blob),
            ..Default::default()
        }
    }
}

/// Role-attributed sequence of parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Content {
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn new(role: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            role: role.into(),
            parts,
        }
    }
}

/// Sampling and limit configuration for a model request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GenerateConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i64>,
}

/// A request sent to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LlmRequest {
    pub model: String,
    #[serde(default)]
    pub config: GenerateConfig,
    #[serde(default)]
    pub contents: Vec<Content>,
}

impl LlmRequest {
    /// Build the JSON payload recorded on the `llm_request` span attribute.
    ///
    /// Inline binary parts are stripped: their payloads are large, opaque,
    /// and useless in a trace viewer. Roles and every other part survive.
    pub fn for_trace(&self) -> Value {
        let contents: Vec<Value> = self
            .contents
            .iter()
            .map(|content| {
                let parts: Vec<&Part> = content
                    .parts
                    .iter()
                    .filter(|part| part.inline_data.is_none())
                    .collect();
                json!({ "role": content.role, "parts": parts })
            })
            .collect();
        json!({
            "model": self.model,
            "config": self.config,
            "content": contents,
        })
    }
}

/// The model's reply to a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LlmResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

impl LlmResponse {
    pub fn with_content(content: Content) -> Self {
        Self {
            content: Some(content),
        }
    }
}
