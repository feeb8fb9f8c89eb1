//! Per-event trace store and the span exporter that feeds it.
//!
//! The exporter keeps only the spans the debug API cares about (`call_llm`,
//! `send_data`, and `execute_tool*`), flattens their attributes to strings,
//! and indexes them by event id. The store is purely in-memory: it grows for
//! the lifetime of the process and needs no shutdown logic. It is an
//! acceptable cost for a debug aid.

use crate::telemetry::attributes::{
    AGENT_EVENT_ID, OPERATION_CALL_LLM, OPERATION_EXECUTE_TOOL, OPERATION_SEND_DATA,
};
use opentelemetry_sdk::error::OTelSdkResult;
use opentelemetry_sdk::trace::{SpanData, SpanExporter};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Flattened string attributes of one captured span.
pub type TraceAttributeSet = HashMap<String, String>;

/// Shared, lock-protected map of event id to captured span attributes.
///
/// Cheap to clone; the exporter writes under the write lock, the debug API
/// reads under the read lock. Last write wins on key reuse: a tool-call span
/// and a merged-tool-call span can share an event id, and the debug view
/// wants the most recent capture.
#[derive(Debug, Clone, Default)]
pub struct TraceStore {
    inner: Arc<RwLock<HashMap<String, TraceAttributeSet>>>,
}

impl TraceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the attribute set captured for an event.
    pub fn get(&self, event_id: &str) -> Option<TraceAttributeSet> {
        self.read().get(event_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Clone the full map, for bulk inspection.
    pub fn snapshot(&self) -> HashMap<String, TraceAttributeSet> {
        self.read().clone()
    }

    pub(crate) fn insert(&self, event_id: String, attributes: TraceAttributeSet) {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| {
                warn!("trace store lock was poisoned, recovering");
                poisoned.into_inner()
            })
            .insert(event_id, attributes);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, TraceAttributeSet>> {
        self.inner.read().unwrap_or_else(|poisoned| {
            warn!("trace store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/// Span exporter that captures debug-relevant spans into a [`TraceStore`].
///
/// Register it with the telemetry registry before the first trace:
///
/// ```rust,ignore
/// let exporter = DebugSpanExporter::new();
/// let store = exporter.trace_store();
/// registry.register_exporter(exporter)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct DebugSpanExporter {
    store: TraceStore,
}

impl DebugSpanExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: TraceStore) -> Self {
        Self { store }
    }

    /// Handle to the store this exporter writes into.
    pub fn trace_store(&self) -> TraceStore {
        self.store.clone()
    }

    fn is_debug_span(name: &str) -> bool {
        name == OPERATION_CALL_LLM
            || name == OPERATION_SEND_DATA
            || name.starts_with(OPERATION_EXECUTE_TOOL)
    }
}

impl SpanExporter for DebugSpanExporter {
    async fn export(&self, batch: Vec<SpanData>) -> OTelSdkResult {
        for span in batch {
            if !Self::is_debug_span(&span.name) {
                continue;
            }

            let mut attributes: TraceAttributeSet = span
                .attributes
                .iter()
                .map(|kv| (kv.key.as_str().to_string(), kv.value.to_string()))
                .collect();
            attributes.insert(
                "trace_id".to_string(),
                span.span_context.trace_id().to_string(),
            );
            attributes.insert(
                "span_id".to_string(),
                span.span_context.span_id().to_string(),
            );

            // Spans without an event id (e.g. closed unannotated) are not
            // addressable by the debug API and are dropped.
            if let Some(event_id) = attributes.get(AGENT_EVENT_ID).cloned() {
                debug!(event_id, span_name = %span.name, "captured debug span");
                self.store.insert(event_id, attributes);
            }
        }
        Ok(())
    }

    // The default shutdown is kept: the store is in-memory only and there is
    // no connection to close.
}
