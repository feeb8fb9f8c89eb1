//! Debug API for reconstructing a single event's trace and execution graph.
//!
//! The HTTP router and response encoding live outside this crate; the
//! controller here returns plain values and [`DebugApiError`]s that carry
//! their HTTP status, so an embedder's handler reduces to a match.

use crate::agent::AgentLoader;
use crate::debug::exporter::{TraceAttributeSet, TraceStore};
use crate::debug::graph::{highlight_pairs, GraphRenderer};
use crate::error::TelemetryError;
use crate::session::{SessionId, SessionService};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the debug API, each mapped to an HTTP status.
#[derive(Error, Debug)]
pub enum DebugApiError {
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    #[error("event not found: {0}")]
    EventNotFound(String),

    #[error("session lookup failed: {0}")]
    SessionLookup(#[source] TelemetryError),

    #[error(transparent)]
    Internal(TelemetryError),
}

impl DebugApiError {
    /// HTTP status for this error: missing input and lookup failures map to
    /// 400, unknown events to 404, downstream agent-load/render failures
    /// to 500.
    pub fn status(&self) -> u16 {
        match self {
            DebugApiError::MissingParameter(_) => 400,
            DebugApiError::SessionLookup(_) => 400,
            DebugApiError::EventNotFound(_) => 404,
            DebugApiError::Internal(_) => 500,
        }
    }
}

/// Rendered execution graph for one event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventGraph {
    #[serde(rename = "dotSrc")]
    pub dot_src: String,
}

/// Controller backing the debug endpoints.
pub struct DebugApiController {
    sessions: Arc<dyn SessionService>,
    agent_loader: Arc<dyn AgentLoader>,
    renderer: Arc<dyn GraphRenderer>,
    trace_store: TraceStore,
}

impl DebugApiController {
    pub fn new(
        sessions: Arc<dyn SessionService>,
        agent_loader: Arc<dyn AgentLoader>,
        renderer: Arc<dyn GraphRenderer>,
        trace_store: TraceStore,
    ) -> Self {
        Self {
            sessions,
            agent_loader,
            renderer,
            trace_store,
        }
    }

    /// Return the captured span attributes for an event.
    pub fn event_trace(&self, event_id: &str) -> Result<TraceAttributeSet, DebugApiError> {
        if event_id.is_empty() {
            return Err(DebugApiError::MissingParameter("event_id"));
        }
        self.trace_store
            .get(event_id)
            .ok_or_else(|| DebugApiError::EventNotFound(event_id.to_string()))
    }

    /// Render the agent graph for an event, highlighting the node pairs the
    /// event touches.
    pub async fn event_graph(
        &self,
        session_id: &SessionId,
        event_id: &str,
    ) -> Result<EventGraph, DebugApiError> {
        let events = self
            .sessions
            .events(session_id)
            .await
            .map_err(DebugApiError::SessionLookup)?;

        if event_id.is_empty() {
            return Err(DebugApiError::MissingParameter("event_id"));
        }

        let event = events
            .into_iter()
            .find(|event| event.id == event_id)
            .ok_or_else(|| DebugApiError::EventNotFound(event_id.to_string()))?;

        let highlights = highlight_pairs(&event);

        let agent = self
            .agent_loader
            .load_agent(&session_id.app_name)
            .map_err(DebugApiError::Internal)?;
        let dot_src = self
            .renderer
            .render(&agent, &highlights)
            .map_err(DebugApiError::Internal)?;

        Ok(EventGraph { dot_src })
    }

    /// [`Self::event_graph`] over raw request path parameters.
    pub async fn event_graph_from_parameters(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<EventGraph, DebugApiError> {
        let session_id =
            SessionId::from_parameters(params).map_err(DebugApiError::MissingParameter)?;
        let event_id = params.get("event_id").cloned().unwrap_or_default();
        self.event_graph(&session_id, &event_id).await
    }
}
