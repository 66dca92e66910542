//! Mock server error types

/// Errors raised by the mock HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind the listening socket.
    #[error("Failed to bind: {0}")]
    Bind(String),
}
