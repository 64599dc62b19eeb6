//! HTTP discovery endpoints of a debugging browser.

use std::time::Duration;

use tracing::debug;
use url::Url;

use super::error::CdpError;
use super::protocol::{BrowserVersion, PageInfo};

/// The `http://host:port` debugging endpoint of a browser.
#[derive(Debug, Clone)]
pub struct CdpEndpoint {
    base: Url,
    http: reqwest::Client,
}

impl CdpEndpoint {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, CdpError> {
        let mut base = Url::parse(endpoint.trim_end_matches('/'))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(CdpError::ConnectionFailed(format!(
                "unsupported scheme '{}' in {}",
                base.scheme(),
                endpoint
            )));
        }
        base.set_path("/");

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CdpError::ConnectionFailed(e.to_string()))?;

        Ok(Self { base, http })
    }

    pub fn as_str(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// `GET /json/version`.
    pub async fn version(&self) -> Result<BrowserVersion, CdpError> {
        let url = self.base.join("json/version")?;
        debug!("Fetching browser version from {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", self.as_str(), e)))?;
        response
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CdpError::InvalidResponse(format!("/json/version: {}", e)))
    }

    /// `GET /json/list`: every target the browser knows about.
    pub async fn list_pages(&self) -> Result<Vec<PageInfo>, CdpError> {
        let url = self.base.join("json/list")?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", self.as_str(), e)))?;
        response
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CdpError::InvalidResponse(format!("/json/list: {}", e)))
    }
}
