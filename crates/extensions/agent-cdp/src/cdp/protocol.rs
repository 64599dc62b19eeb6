//! CDP wire messages and discovery payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tabrelay_protocols::TabInfo;

/// Command sent over the browser websocket.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CdpRequest<'a> {
    pub id: u64,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

/// Any message received from the browser: a command result or an event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<CdpErrorResponse>,
    pub method: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CdpErrorResponse {
    pub code: i64,
    pub message: String,
}

/// One entry of `/json/list`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub page_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

impl PageInfo {
    /// Regular tabs, as opposed to workers, iframes and extension pages.
    pub fn is_page(&self) -> bool {
        self.page_type == "page"
    }
}

impl From<PageInfo> for TabInfo {
    fn from(page: PageInfo) -> Self {
        TabInfo::new(page.id, page.title).with_url(page.url)
    }
}

/// `/json/version` payload. Chrome uses PascalCase keys here.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser", default)]
    pub browser: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

/// Result of `Runtime.evaluate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResult {
    #[serde(default)]
    pub result: Option<RemoteObject>,
    pub exception_details: Option<ExceptionDetails>,
}

#[derive(Debug, Deserialize)]
pub struct RemoteObject {
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ExceptionDetails {
    #[serde(default)]
    pub text: String,
    pub exception: Option<ExceptionObject>,
}

#[derive(Debug, Deserialize)]
pub struct ExceptionObject {
    pub description: Option<String>,
}

impl ExceptionDetails {
    /// Most specific message available, e.g. the thrown error's description.
    pub fn message(&self) -> String {
        self.exception
            .as_ref()
            .and_then(|e| e.description.clone())
            .unwrap_or_else(|| {
                if self.text.is_empty() {
                    "Unknown error".to_string()
                } else {
                    self.text.clone()
                }
            })
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
