//! Page field agent errors.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// The agent could not be reached, usually because the page script is
    /// not installed yet.
    #[error("Could not connect to {0}. Please refresh the page and try again.")]
    Unreachable(String),

    /// The agent answered with `success: false`.
    #[error("{0}")]
    Failed(String),

    #[error("No response after {}s. Please refresh the page and try again.", .0.as_secs())]
    Timeout(Duration),

    #[error("Invalid agent response: {0}")]
    InvalidResponse(String),
}

impl AgentError {
    /// Whether asking the user to retry has a chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AgentError::Unreachable(_) | AgentError::Timeout(_))
    }
}
