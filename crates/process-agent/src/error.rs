//! Error types for the agent flows

use process_agent_client::ClientError;

/// Result type for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors surfaced by the interactive loop and the single-query function
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Failure in the backend client
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// The backend reported an error completion for a query
    #[error("Query failed: {0}")]
    Backend(String),

    /// Terminal I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_conversion() {
        let client_err = ClientError::Connection("Not connected".to_string());
        let err: AgentError = client_err.into();
        assert!(matches!(err, AgentError::Client(_)));
        assert_eq!(err.to_string(), "Client error: Connection error: Not connected");
    }

    #[test]
    fn test_backend_error_display() {
        let err = AgentError::Backend("rate limited".to_string());
        assert_eq!(err.to_string(), "Query failed: rate limited");
    }
}
