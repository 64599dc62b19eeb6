//! A flat session attached to one page.

use std::sync::Arc;

use serde_json::{Value, json};

use super::client::Transport;
use super::error::CdpError;
use super::protocol::EvaluateResult;

/// Commands routed to one target through the shared browser websocket.
pub struct PageSession {
    target_id: String,
    session_id: String,
    transport: Arc<Transport>,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, transport: Arc<Transport>) -> Self {
        Self {
            target_id,
            session_id,
            transport,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id))
            .await
    }

    /// Evaluate `expression` in the page, awaiting a returned promise.
    ///
    /// The result is returned by value; a thrown exception becomes
    /// [`CdpError::JavaScript`].
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let raw = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        let result: EvaluateResult = serde_json::from_value(raw)?;
        if let Some(exception) = result.exception_details {
            return Err(CdpError::JavaScript(exception.message()));
        }
        Ok(result.result.and_then(|r| r.value).unwrap_or(Value::Null))
    }
}
