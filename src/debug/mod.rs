//! Debug surface over captured telemetry: the per-event trace store, the
//! span exporter feeding it, the event graph correlator, and the controller
//! the HTTP layer delegates to.

pub mod api;
pub mod exporter;
pub mod graph;

// Re-export main types
pub use api::{DebugApiController, DebugApiError, EventGraph};
pub use exporter::{DebugSpanExporter, TraceAttributeSet, TraceStore};
pub use graph::{highlight_pairs, GraphRenderer, HighlightPair};
