//! Wire contract between tabrelay and the page script.
//!
//! ```text
//! { "action": "extractFields", "fieldNumbers": [1, 2] }
//!   -> { "success": true, "fields": { "1": "..." } }
//! { "action": "fillFields", "fields": { "1": "..." } }
//!   -> { "success": true, "filledCount": 1 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::types::{FieldNumber, FieldSet};

/// Request sent to the page script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum AgentRequest {
    #[serde(rename_all = "camelCase")]
    ExtractFields { field_numbers: Vec<FieldNumber> },
    FillFields { fields: FieldSet },
}

/// Response returned by the page script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filled_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentResponse {
    pub fn extracted(fields: FieldSet) -> Self {
        Self {
            success: true,
            fields: Some(fields),
            ..Default::default()
        }
    }

    pub fn filled(count: usize) -> Self {
        Self {
            success: true,
            filled_count: Some(count),
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Unwrap an `extractFields` response.
    pub fn into_fields(self, fallback: &str) -> Result<FieldSet, AgentError> {
        if !self.success {
            return Err(AgentError::Failed(
                self.error.unwrap_or_else(|| fallback.to_string()),
            ));
        }
        Ok(self.fields.unwrap_or_default())
    }

    /// Unwrap a `fillFields` response.
    ///
    /// Older page scripts answer `{ success: true }` without a count; in that
    /// case every sent field is assumed filled.
    pub fn into_filled_count(self, sent: usize, fallback: &str) -> Result<usize, AgentError> {
        if !self.success {
            return Err(AgentError::Failed(
                self.error.unwrap_or_else(|| fallback.to_string()),
            ));
        }
        Ok(self.filled_count.unwrap_or(sent))
    }
}
