//! Error types and result aliases for the agent-telemetry library.
//!
//! This module defines the core error type [`TelemetryError`] and the [`Result`] type alias
//! used throughout the library. All public APIs that can fail return `Result<T>` for
//! consistent error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("registry is sealed: span processors must be registered before the first trace")]
    RegistrySealed,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Session store error: {0}")]
    SessionStoreError(String),

    #[error("agent {0} not found")]
    AgentNotFound(String),

    #[error("Graph render error: {0}")]
    RenderError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, TelemetryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_sealed_display() {
        let err = TelemetryError::RegistrySealed;
        assert!(err.to_string().contains("before the first trace"));
    }

    #[test]
    fn test_session_store_error_display() {
        let err = TelemetryError::SessionStoreError("connection refused".to_string());
        assert_eq!(err.to_string(), "Session store error: connection refused");
    }

    #[test]
    fn test_agent_not_found_display() {
        let err = TelemetryError::AgentNotFound("weather_agent".to_string());
        assert_eq!(err.to_string(), "agent weather_agent not found");
    }

    #[test]
    fn test_render_error_display() {
        let err = TelemetryError::RenderError("bad node name".to_string());
        assert_eq!(err.to_string(), "Graph render error: bad node name");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: TelemetryError = json_err.into();

        match err {
            TelemetryError::SerializationError(_) => {}
            _ => panic!("Expected SerializationError"),
        }
    }

    #[test]
    fn test_error_debug() {
        let err = TelemetryError::ConfigError("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("ConfigError"));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(TelemetryError::RegistrySealed);
        assert!(err_result.is_err());
    }
}
