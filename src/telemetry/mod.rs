//! Execution telemetry pipeline: span registry, dual-tracer fan-out, and the
//! annotate-and-close operations for LLM calls, tool calls, and merged tool
//! responses.
//!
//! # Architecture
//!
//! - **TelemetryRegistry**: explicit handle owning the local tracer provider
//!   and the span processors registered before first use (Unsealed → Sealed)
//! - **SpanFanout**: the two parallel spans (local + ambient global) started
//!   per traced operation
//! - **Attribute sets**: fixed per-operation schemas over the `gen_ai.*` and
//!   `gcp.vertex.agent.*` wire keys
//! - **Annotators**: `trace_llm_call`, `trace_tool_call`, and
//!   `trace_merged_tool_calls` attach the schema to both spans and close
//!   them
//!
//! Telemetry is best-effort throughout: serialization failures degrade to a
//! sentinel, and no annotator ever blocks or fails the primary agent flow.

pub mod attributes;
pub mod registry;
pub mod span;
pub mod trace;

// Re-export main types
pub use attributes::{
    safe_serialize, LlmCallAttributes, MergedToolCallAttributes, ToolCallAttributes,
};
pub use registry::TelemetryRegistry;
pub use span::{SpanFanout, SpanHandle};
pub use trace::{trace_llm_call, trace_merged_tool_calls, trace_tool_call};

/// Install a formatting subscriber for the crate's diagnostic channel,
/// honoring `RUST_LOG`. Embedders that already set a global subscriber can
/// skip this; a second call is a no-op.
pub fn init_diagnostics() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
