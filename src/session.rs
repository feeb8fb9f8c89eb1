//! Session events and the session-lookup collaborator.
//!
//! An [`Event`] records one execution step in an agent's run: an LLM call,
//! a tool call, or a merged tool response. Events are ephemeral: constructed
//! per request, annotated onto spans, then discarded. The [`SessionService`]
//! trait is the external collaborator the debug API uses to fetch the ordered
//! event sequence for a session.

use crate::error::Result;
use crate::model::{FunctionCall, FunctionResponse, LlmResponse};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Record of one execution step in an agent's run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: String,
    pub invocation_id: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_response: Option<LlmResponse>,
}

impl Event {
    /// Create a new event with a generated id and the current timestamp.
    pub fn new(invocation_id: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            invocation_id: invocation_id.into(),
            author: author.into(),
            timestamp: Utc::now(),
            llm_response: None,
        }
    }

    pub fn with_llm_response(mut self, response: LlmResponse) -> Self {
        self.llm_response = Some(response);
        self
    }

    /// Collect the function calls carried by this event, in part order.
    pub fn function_calls(&self) -> Vec<&FunctionCall> {
        self.parts()
            .iter()
            .filter_map(|part| part.function_call.as_ref())
            .collect()
    }

    /// Collect the function responses carried by this event, in part order.
    pub fn function_responses(&self) -> Vec<&FunctionResponse> {
        self.parts()
            .iter()
            .filter_map(|part| part.function_response.as_ref())
            .collect()
    }

    pub(crate) fn parts(&self) -> &[crate::model::Part] {
        self.llm_response
            .as_ref()
            .and_then(|response| response.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or(&[])
    }
}

/// Fully qualified session identifier: application, user, and session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionId {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
}

impl SessionId {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }

    /// Build a session id from request path parameters.
    ///
    /// Returns the name of the first missing or empty parameter so the caller
    /// can surface a precise message.
    pub fn from_parameters(
        params: &HashMap<String, String>,
    ) -> std::result::Result<Self, &'static str> {
        let get = |key: &'static str| -> std::result::Result<String, &'static str> {
            match params.get(key) {
                Some(value) if !value.is_empty() => Ok(value.clone()),
                _ => Err(key),
            }
        };
        Ok(Self {
            app_name: get("app_name")?,
            user_id: get("user_id")?,
            session_id: get("session_id")?,
        })
    }
}

/// Ambient context for one agent invocation, carried into the span
/// annotators.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub session_id: String,
}

impl InvocationContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

/// External collaborator that resolves a session to its ordered event log.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Return the session's events in execution order.
    async fn events(&self, id: &SessionId) -> Result<Vec<Event>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Content, Part};

    fn event_with_parts(parts: Vec<Part>) -> Event {
        Event::new("inv-1", "agent_a")
            .with_llm_response(LlmResponse::with_content(Content::new("model", parts)))
    }

    #[test]
    fn test_new_event_generates_id() {
        let a = Event::new("inv-1", "agent_a");
        let b = Event::new("inv-1", "agent_a");
        assert_ne!(a.id, b.id);
        assert_eq!(a.author, "agent_a");
        assert_eq!(a.invocation_id, "inv-1");
    }

    #[test]
    fn test_function_calls_in_part_order() {
        let event = event_with_parts(vec![
            Part::function_call(FunctionCall {
                name: "first".to_string(),
                ..Default::default()
            }),
            Part::text("interleaved"),
            Part::function_call(FunctionCall {
                name: "second".to_string(),
                ..Default::default()
            }),
        ]);

        let calls = event.function_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].name, "first");
        assert_eq!(calls[1].name, "second");
    }

    #[test]
    fn test_function_responses_in_part_order() {
        let event = event_with_parts(vec![
            Part::function_response(FunctionResponse {
                name: "first".to_string(),
                ..Default::default()
            }),
            Part::function_response(FunctionResponse {
                name: "second".to_string(),
                ..Default::default()
            }),
        ]);

        let responses = event.function_responses();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].name, "first");
        assert_eq!(responses[1].name, "second");
    }

    #[test]
    fn test_event_without_response_has_no_parts() {
        let event = Event::new("inv-1", "agent_a");
        assert!(event.function_calls().is_empty());
        assert!(event.function_responses().is_empty());
    }

    #[test]
    fn test_session_id_from_parameters() {
        let mut params = HashMap::new();
        params.insert("app_name".to_string(), "weather".to_string());
        params.insert("user_id".to_string(), "u1".to_string());
        params.insert("session_id".to_string(), "s1".to_string());

        let id = SessionId::from_parameters(&params).unwrap();
        assert_eq!(id, SessionId::new("weather", "u1", "s1"));
    }

    #[test]
    fn test_session_id_missing_parameter() {
        let mut params = HashMap::new();
        params.insert("app_name".to_string(), "weather".to_string());
        params.insert("user_id".to_string(), "u1".to_string());

        let err = SessionId::from_parameters(&params).unwrap_err();
        assert_eq!(err, "session_id");
    }

    #[test]
    fn test_session_id_empty_parameter_rejected() {
        let mut params = HashMap::new();
        params.insert("app_name".to_string(), String::new());
        params.insert("user_id".to_string(), "u1".to_string());
        params.insert("session_id".to_string(), "s1".to_string());

        let err = SessionId::from_parameters(&params).unwrap_err();
        assert_eq!(err, "app_name");
    }
}
