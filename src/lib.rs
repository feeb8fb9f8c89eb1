pub mod agent;
pub mod debug;
pub mod error;
pub mod model;
pub mod session;
pub mod telemetry;
pub mod tools;

pub use error::{Result, TelemetryError};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::agent::{AgentDefinition, AgentLoader, StaticAgentLoader};
    pub use crate::debug::{
        DebugApiController, DebugApiError, DebugSpanExporter, GraphRenderer, HighlightPair,
        TraceStore,
    };
    pub use crate::error::{Result, TelemetryError};
    pub use crate::model::{Content, FunctionCall, FunctionResponse, LlmRequest, LlmResponse, Part};
    pub use crate::session::{Event, InvocationContext, SessionId, SessionService};
    pub use crate::telemetry::{
        trace_llm_call, trace_merged_tool_calls, trace_tool_call, SpanFanout, TelemetryRegistry,
    };
    pub use crate::tools::ToolDescriptor;
}
