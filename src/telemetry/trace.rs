//! Annotate-and-close operations for the three traced event kinds.
//!
//! Each function takes ownership of the [`SpanFanout`] from
//! [`TelemetryRegistry::start_trace`], attaches the fixed attribute schema
//! for its operation kind to both spans, and closes them. When the result
//! event is absent there is nothing to record and the spans are closed
//! unannotated; they are never leaked open.
//!
//! [`TelemetryRegistry::start_trace`]: crate::telemetry::TelemetryRegistry::start_trace

use crate::model::LlmRequest;
use crate::session::{Event, InvocationContext};
use crate::telemetry::attributes::{
    safe_serialize, LlmCallAttributes, MergedToolCallAttributes, ToolCallAttributes,
    NOT_SPECIFIED,
};
use crate::telemetry::span::SpanFanout;
use crate::tools::ToolDescriptor;
use serde_json::Value;
use std::collections::HashMap;

/// Record a `call_llm` operation: model, ids, serialized request (inline
/// binary payloads stripped), serialized response, and sampling parameters
/// when present.
pub fn trace_llm_call(
    spans: SpanFanout,
    ctx: &InvocationContext,
    request: &LlmRequest,
    event: Option<&Event>,
) {
    let Some(event) = event else {
        spans.end();
        return;
    };

    let attributes = LlmCallAttributes {
        model: request.model.clone(),
        invocation_id: event.invocation_id.clone(),
        session_id: ctx.session_id.clone(),
        event_id: event.id.clone(),
        llm_request: safe_serialize(&request.for_trace()),
        llm_response: safe_serialize(&event.llm_response),
        top_p: request.config.top_p,
        max_tokens: request.config.max_output_tokens,
    };
    spans.annotate_and_end(attributes.into_key_values());
}

/// Record an `execute_tool` operation: tool name/description, serialized
/// arguments, and the call id and response taken from the result event's
/// first part when that part is a function response (sentinel defaults
/// otherwise).
pub fn trace_tool_call(
    spans: SpanFanout,
    tool: &ToolDescriptor,
    args: &HashMap<String, Value>,
    event: Option<&Event>,
) {
    let Some(event) = event else {
        spans.end();
        return;
    };

    let mut tool_call_id = NOT_SPECIFIED.to_string();
    let mut tool_response = NOT_SPECIFIED.to_string();
    if let Some(function_response) = event
        .parts()
        .first()
        .and_then(|part| part.function_response.as_ref())
    {
        if let Some(id) = function_response.id.as_ref().filter(|id| !id.is_empty()) {
            tool_call_id = id.clone();
        }
        if let Some(response) = &function_response.response {
            tool_response = safe_serialize(response);
        }
    }

    let attributes = ToolCallAttributes {
        tool_name: tool.name().to_string(),
        tool_description: tool.description().to_string(),
        tool_call_args: safe_serialize(args),
        event_id: event.id.clone(),
        tool_call_id,
        tool_response,
    };
    spans.annotate_and_end(attributes.into_key_values());
}

/// Record a merged tool response: `(merged tools)` placeholders, no call id,
/// the full result event serialized as the response.
pub fn trace_merged_tool_calls(spans: SpanFanout, event: Option<&Event>) {
    let Some(event) = event else {
        spans.end();
        return;
    };

    let attributes = MergedToolCallAttributes {
        event_id: event.id.clone(),
        tool_response: safe_serialize(event),
    };
    spans.annotate_and_end(attributes.into_key_values());
}
