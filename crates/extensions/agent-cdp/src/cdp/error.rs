//! CDP error types.

use std::time::Duration;

use thiserror::Error;

use tabrelay_protocols::{AgentError, LocatorError};

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Nothing answered on the debugging endpoint.
    #[error("Browser not available at {0}. Start Chrome with: chrome --remote-debugging-port=9222")]
    ChromeNotAvailable(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Error object returned by the browser for a command.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    /// The evaluated expression threw.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("{method} timed out after {}s", .after.as_secs())]
    Timeout { method: String, after: Duration },

    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CdpError {
    /// Whether the browser or page could not be reached at all.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            CdpError::ChromeNotAvailable(_)
                | CdpError::ConnectionFailed(_)
                | CdpError::WebSocket(_)
                | CdpError::Http(_)
                | CdpError::SessionClosed
        )
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for LocatorError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::Serialization(_) | CdpError::InvalidResponse(_) => {
                LocatorError::InvalidResponse(e.to_string())
            }
            other => LocatorError::Unavailable(other.to_string()),
        }
    }
}

impl CdpError {
    /// Convert into an agent error for the tab labelled `target`.
    pub fn into_agent_error(self, target: &str) -> AgentError {
        match self {
            CdpError::Timeout { after, .. } => AgentError::Timeout(after),
            // A missing page script looks like a thrown ReferenceError/TypeError,
            // which the user fixes the same way: reload the tab.
            e if e.is_connection() => AgentError::Unreachable(target.to_string()),
            CdpError::JavaScript(_) => AgentError::Unreachable(target.to_string()),
            CdpError::Serialization(e) => AgentError::InvalidResponse(e.to_string()),
            CdpError::InvalidResponse(msg) => AgentError::InvalidResponse(msg),
            other => AgentError::Failed(other.to_string()),
        }
    }
}
