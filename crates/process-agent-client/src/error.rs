//! Client error types

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the CLI backend
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection state error
    #[error("Connection error: {0}")]
    Connection(String),

    /// I/O error on the CLI's stdio pipes
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error on the wire
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Process spawn or teardown error
    #[error("Process error: {0}")]
    Process(String),

    /// Generic client error
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Connection("Not connected".to_string());
        assert_eq!(err.to_string(), "Connection error: Not connected");

        let err = ClientError::Process("Failed to spawn CLI: no such file".to_string());
        assert_eq!(
            err.to_string(),
            "Process error: Failed to spawn CLI: no such file"
        );
    }

    #[test]
    fn test_error_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ClientError = parse_err.into();
        assert!(matches!(err, ClientError::Serialization(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: ClientError = io_err.into();
        assert!(matches!(err, ClientError::Io(_)));
    }
}
