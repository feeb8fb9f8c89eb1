//! Wire-visible attribute keys and the typed attribute sets applied to spans.
//!
//! The key strings follow the OpenTelemetry GenAI semantic conventions plus
//! the `gcp.vertex.agent.*` namespace the trace viewer reads; they must be
//! preserved verbatim. Each traced operation kind has a fixed-schema struct
//! here so the compiler enforces attribute completeness instead of an ad-hoc
//! string map.

use opentelemetry::KeyValue;
use serde::Serialize;
use tracing::warn;

/// System name attached to LLM-call spans and used as the tracer scope.
pub const SYSTEM_NAME: &str = "gcp.vertex.agent";

pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";
pub const GEN_AI_SYSTEM: &str = "gen_ai.system";
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";
pub const GEN_AI_REQUEST_TOP_P: &str = "gen_ai.request.top_p";
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";
pub const GEN_AI_TOOL_NAME: &str = "gen_ai.tool.name";
pub const GEN_AI_TOOL_DESCRIPTION: &str = "gen_ai.tool.description";
pub const GEN_AI_TOOL_CALL_ID: &str = "gen_ai.tool.call.id";

pub const AGENT_INVOCATION_ID: &str = "gcp.vertex.agent.invocation_id";
pub const AGENT_SESSION_ID: &str = "gcp.vertex.agent.session_id";
pub const AGENT_EVENT_ID: &str = "gcp.vertex.agent.event_id";
pub const AGENT_LLM_REQUEST: &str = "gcp.vertex.agent.llm_request";
pub const AGENT_LLM_RESPONSE: &str = "gcp.vertex.agent.llm_response";
pub const AGENT_TOOL_CALL_ARGS: &str = "gcp.vertex.agent.tool_call_args";
pub const AGENT_TOOL_RESPONSE: &str = "gcp.vertex.agent.tool_response";

/// Span names the debug exporter keeps.
pub const OPERATION_CALL_LLM: &str = "call_llm";
pub const OPERATION_SEND_DATA: &str = "send_data";
pub const OPERATION_EXECUTE_TOOL: &str = "execute_tool";

/// Sentinel for absent tool-call ids and responses.
pub const NOT_SPECIFIED: &str = "<not specified>";
/// Sentinel recorded when a payload cannot be serialized.
pub const NOT_SERIALIZABLE: &str = "<not serializable>";
/// Placeholder name/description on merged-tool-call spans.
pub const MERGED_TOOLS: &str = "(merged tools)";

/// Serialize a value to JSON, degrading to [`NOT_SERIALIZABLE`] on failure.
///
/// Telemetry must never break the primary flow, so the error is not
/// propagated; it is reported on the diagnostic channel instead.
pub fn safe_serialize<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(serialized) => serialized,
        Err(error) => {
            warn!(%error, "failed to serialize span attribute payload");
            NOT_SERIALIZABLE.to_string()
        }
    }
}

/// Attribute schema for a `call_llm` span.
#[derive(Debug, Clone)]
pub struct LlmCallAttributes {
    pub model: String,
    pub invocation_id: String,
    pub session_id: String,
    pub event_id: String,
    pub llm_request: String,
    pub llm_response: String,
    pub top_p: Option<f64>,
    pub max_tokens: Option<i64>,
}

impl LlmCallAttributes {
    pub fn into_key_values(self) -> Vec<KeyValue> {
        let mut attributes = vec![
            KeyValue::new(GEN_AI_SYSTEM, SYSTEM_NAME),
            KeyValue::new(GEN_AI_REQUEST_MODEL, self.model),
            KeyValue::new(AGENT_INVOCATION_ID, self.invocation_id),
            KeyValue::new(AGENT_SESSION_ID, self.session_id),
            KeyValue::new(AGENT_EVENT_ID, self.event_id),
            KeyValue::new(AGENT_LLM_REQUEST, self.llm_request),
            KeyValue::new(AGENT_LLM_RESPONSE, self.llm_response),
        ];
        if let Some(top_p) = self.top_p {
            attributes.push(KeyValue::new(GEN_AI_REQUEST_TOP_P, top_p));
        }
        if let Some(max_tokens) = self.max_tokens {
            attributes.push(KeyValue::new(GEN_AI_REQUEST_MAX_TOKENS, max_tokens));
        }
        attributes
    }
}

/// Attribute schema for an `execute_tool` span.
///
/// `llm_request`/`llm_response` are recorded as empty objects: the viewer
/// expects the keys even though they do not apply to a tool response.
#[derive(Debug, Clone)]
pub struct ToolCallAttributes {
    pub tool_name: String,
    pub tool_description: String,
    pub tool_call_args: String,
    pub event_id: String,
    pub tool_call_id: String,
    pub tool_response: String,
}

impl ToolCallAttributes {
    pub fn into_key_values(self) -> Vec<KeyValue> {
        vec![
            KeyValue::new(GEN_AI_OPERATION_NAME, OPERATION_EXECUTE_TOOL),
            KeyValue::new(GEN_AI_TOOL_NAME, self.tool_name),
            KeyValue::new(GEN_AI_TOOL_DESCRIPTION, self.tool_description),
            KeyValue::new(AGENT_LLM_REQUEST, "{}"),
            KeyValue::new(AGENT_LLM_RESPONSE, "{}"),
            KeyValue::new(AGENT_TOOL_CALL_ARGS, self.tool_call_args),
            KeyValue::new(AGENT_EVENT_ID, self.event_id),
            KeyValue::new(GEN_AI_TOOL_CALL_ID, self.tool_call_id),
            KeyValue::new(AGENT_TOOL_RESPONSE, self.tool_response),
        ]
    }
}

/// Attribute schema for a merged-tool-response span. Carries no tool-call id;
/// the full event is serialized as the response.
#[derive(Debug, Clone)]
pub struct MergedToolCallAttributes {
    pub event_id: String,
    pub tool_response: String,
}

impl MergedToolCallAttributes {
    pub fn into_key_values(self) -> Vec<KeyValue> {
        vec![
            KeyValue::new(GEN_AI_OPERATION_NAME, OPERATION_EXECUTE_TOOL),
            KeyValue::new(GEN_AI_TOOL_NAME, MERGED_TOOLS),
            KeyValue::new(GEN_AI_TOOL_DESCRIPTION, MERGED_TOOLS),
            KeyValue::new(AGENT_LLM_REQUEST, "{}"),
            KeyValue::new(AGENT_LLM_RESPONSE, "{}"),
            KeyValue::new(AGENT_TOOL_CALL_ARGS, "N/A"),
            KeyValue::new(AGENT_EVENT_ID, self.event_id),
            KeyValue::new(AGENT_TOOL_RESPONSE, self.tool_response),
        ]
    }
}
