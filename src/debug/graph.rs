//! Event graph correlation: which node pairs in an agent's call graph an
//! event should highlight.

use crate::agent::AgentDefinition;
use crate::error::Result;
use crate::session::Event;
use serde::{Deserialize, Serialize};

/// A `(from, to)` pair of graph node names derived from an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightPair {
    pub from: String,
    pub to: String,
}

impl HighlightPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Compute the highlight pairs for an event.
///
/// Function calls outrank function responses even when an event carries
/// both: a calling event highlights `(tool, author)` per call, a responding
/// event highlights `(tool, author)` per response, and an event with neither
/// highlights the author's own node. Empty-named calls and responses are
/// skipped.
pub fn highlight_pairs(event: &Event) -> Vec<HighlightPair> {
    let calls = event.function_calls();
    if !calls.is_empty() {
        return calls
            .iter()
            .filter(|call| !call.name.is_empty())
            .map(|call| HighlightPair::new(call.name.clone(), event.author.clone()))
            .collect();
    }

    let responses = event.function_responses();
    if !responses.is_empty() {
        return responses
            .iter()
            .filter(|response| !response.name.is_empty())
            .map(|response| HighlightPair::new(response.name.clone(), event.author.clone()))
            .collect();
    }

    vec![HighlightPair::new(
        event.author.clone(),
        event.author.clone(),
    )]
}

/// External collaborator that renders an agent's call graph with the given
/// pairs highlighted, returning Graphviz dot source.
pub trait GraphRenderer: Send + Sync {
    fn render(&self, agent: &AgentDefinition, highlights: &[HighlightPair]) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Content, FunctionCall, FunctionResponse, LlmResponse, Part};

    fn event_with_parts(parts: Vec<Part>) -> Event {
        Event::new("inv-1", "agent_a")
            .with_llm_response(LlmResponse::with_content(Content::new("model", parts)))
    }

    fn call(name: &str) -> Part {
        Part::function_call(FunctionCall {
            name: name.to_string(),
            ..Default::default()
        })
    }

    fn response(name: &str) -> Part {
        Part::function_response(FunctionResponse {
            name: name.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_single_function_call() {
        let event = event_with_parts(vec![call("search")]);
        assert_eq!(
            highlight_pairs(&event),
            vec![HighlightPair::new("search", "agent_a")]
        );
    }

    #[test]
    fn test_multiple_function_calls_in_order() {
        let event = event_with_parts(vec![call("search"), call("fetch"), call("summarize")]);
        let pairs = highlight_pairs(&event);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].from, "search");
        assert_eq!(pairs[1].from, "fetch");
        assert_eq!(pairs[2].from, "summarize");
        assert!(pairs.iter().all(|pair| pair.to == "agent_a"));
    }

    #[test]
    fn test_empty_named_calls_are_skipped() {
        let event = event_with_parts(vec![call(""), call("search")]);
        assert_eq!(
            highlight_pairs(&event),
            vec![HighlightPair::new("search", "agent_a")]
        );
    }

    #[test]
    fn test_function_responses_when_no_calls() {
        let event = event_with_parts(vec![response("search"), response("fetch")]);
        let pairs = highlight_pairs(&event);
        assert_eq!(
            pairs,
            vec![
                HighlightPair::new("search", "agent_a"),
                HighlightPair::new("fetch", "agent_a"),
            ]
        );
    }

    #[test]
    fn test_calls_outrank_responses() {
        let event = event_with_parts(vec![response("fetch"), call("search")]);
        assert_eq!(
            highlight_pairs(&event),
            vec![HighlightPair::new("search", "agent_a")]
        );
    }

    #[test]
    fn test_self_pair_when_neither() {
        let event = event_with_parts(vec![Part::text("plain response")]);
        assert_eq!(
            highlight_pairs(&event),
            vec![HighlightPair::new("agent_a", "agent_a")]
        );
    }

    #[test]
    fn test_self_pair_without_llm_response() {
        let event = Event::new("inv-1", "agent_a");
        assert_eq!(
            highlight_pairs(&event),
            vec![HighlightPair::new("agent_a", "agent_a")]
        );
    }
}
