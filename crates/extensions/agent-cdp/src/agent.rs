//! Page field agent backed by a CDP page session.

use async_trait::async_trait;
use tracing::debug;

use tabrelay_protocols::{
    AgentError, AgentRequest, AgentResponse, FieldNumber, FieldSet, PageFieldAgent,
};

use crate::cdp::PageSession;
use crate::script;

/// Talks to the page script installed in one tab.
pub struct CdpPageAgent {
    page: PageSession,
    label: String,
}

impl CdpPageAgent {
    /// `label` names the tab in user-facing errors.
    pub fn new(page: PageSession, label: impl Into<String>) -> Self {
        Self {
            page,
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    async fn send(&self, request: &AgentRequest) -> Result<AgentResponse, AgentError> {
        let expression = script::request_expression(request)
            .map_err(|e| AgentError::Failed(format!("Could not encode request: {}", e)))?;
        let value = self
            .page
            .evaluate(&expression)
            .await
            .map_err(|e| e.into_agent_error(&self.label))?;
        serde_json::from_value(value).map_err(|e| AgentError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl PageFieldAgent for CdpPageAgent {
    async fn extract(&self, field_numbers: &[FieldNumber]) -> Result<FieldSet, AgentError> {
        let request = AgentRequest::ExtractFields {
            field_numbers: field_numbers.to_vec(),
        };
        let fields = self
            .send(&request)
            .await?
            .into_fields("Failed to extract fields")?;
        debug!(target_id = self.page.target_id(), count = fields.len(), "Extracted");
        Ok(fields)
    }

    async fn apply(&self, fields: &FieldSet) -> Result<usize, AgentError> {
        let request = AgentRequest::FillFields {
            fields: fields.clone(),
        };
        let filled = self
            .send(&request)
            .await?
            .into_filled_count(fields.len(), "Failed to fill fields")?;
        debug!(target_id = self.page.target_id(), filled, "Filled");
        Ok(filled)
    }
}
