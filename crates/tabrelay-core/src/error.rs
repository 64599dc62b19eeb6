//! Transfer and session errors.

use thiserror::Error;

use tabrelay_config::ConfigError;
use tabrelay_protocols::{AgentError, LocatorError, TabRole};

/// Errors that abort a single transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Failed to extract fields from source tab: {0}")]
    ExtractionFailed(AgentError),

    #[error("No fields could be extracted. Make sure the source page has input fields.")]
    NoFieldsMapped,

    #[error("Failed to fill fields in destination tab: {0}")]
    FillFailed(AgentError),
}

impl TransferError {
    /// Whether the user should simply try again (page script not ready, timeout).
    pub fn is_retryable(&self) -> bool {
        match self {
            TransferError::ExtractionFailed(e) | TransferError::FillFailed(e) => e.is_retryable(),
            TransferError::NoFieldsMapped => false,
        }
    }
}

/// Errors surfaced by a [`crate::Session`].
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid or missing configuration")]
    NoConfig,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No tabs found matching \"{filter}\" for {role}")]
    TabNotFound { role: TabRole, filter: String },

    #[error("{count} tabs found matching \"{filter}\" for {role} - please close duplicates")]
    MultipleTabsFound {
        role: TabRole,
        filter: String,
        count: usize,
    },

    #[error("Error accessing tabs: {0}")]
    Locator(#[from] LocatorError),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}
