//! Page field agent protocol.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::types::{FieldNumber, FieldSet, TabInfo};

/// An agent running inside one page's context.
///
/// Calls are asynchronous round-trips into an isolated page and may take
/// arbitrarily long. Implementations must not retry on their own.
#[async_trait]
pub trait PageFieldAgent: Send + Sync {
    /// Extract the requested fields from the page.
    ///
    /// Numbers the page has no field for are simply absent from the result.
    /// An empty string is a real value and must be returned as such.
    async fn extract(&self, field_numbers: &[FieldNumber]) -> Result<FieldSet, AgentError>;

    /// Write the given values into the page, returning how many fields were filled.
    async fn apply(&self, fields: &FieldSet) -> Result<usize, AgentError>;
}

/// Makes a [`PageFieldAgent`] available inside a located tab.
///
/// For a browser this means attaching to the tab and injecting the page
/// script if it is not there yet.
#[async_trait]
pub trait AgentConnector: Send + Sync {
    async fn connect(&self, tab: &TabInfo) -> Result<Box<dyn PageFieldAgent>, AgentError>;
}
