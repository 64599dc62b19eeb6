//! Connects page field agents to tabs over CDP.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use tabrelay_protocols::{AgentConnector, AgentError, PageFieldAgent, TabInfo};

use crate::agent::CdpPageAgent;
use crate::cdp::{CdpClient, CdpEndpoint, CdpError};
use crate::script;

/// Default pause after installing the page script.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Lazily opens one browser connection and attaches to tabs through it.
///
/// The connection is reopened if the browser closed it.
pub struct CdpAgentConnector {
    endpoint: CdpEndpoint,
    request_timeout: Duration,
    settle_delay: Duration,
    client: Mutex<Option<Arc<CdpClient>>>,
}

impl CdpAgentConnector {
    pub fn new(endpoint: CdpEndpoint, request_timeout: Duration) -> Self {
        Self {
            endpoint,
            request_timeout,
            settle_delay: DEFAULT_SETTLE_DELAY,
            client: Mutex::new(None),
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    async fn client(&self) -> Result<Arc<CdpClient>, CdpError> {
        let mut slot = self.client.lock().await;
        if let Some(client) = slot.as_ref().filter(|c| c.is_connected()) {
            return Ok(client.clone());
        }

        info!("Connecting to browser at {}", self.endpoint.as_str());
        let client = Arc::new(CdpClient::connect(self.endpoint.clone(), self.request_timeout).await?);
        *slot = Some(client.clone());
        Ok(client)
    }

    /// Attach to `tab` and make sure the page script is installed.
    pub async fn open(&self, tab: &TabInfo) -> Result<CdpPageAgent, CdpError> {
        let client = self.client().await?;
        let page = client.attach(&tab.id).await?;

        let installed = page
            .evaluate(&script::installed_probe())
            .await?
            .as_bool()
            .unwrap_or(false);
        if !installed {
            page.evaluate(script::install_script()).await?;
            debug!(target_id = %tab.id, "Installed page script");
            if !self.settle_delay.is_zero() {
                tokio::time::sleep(self.settle_delay).await;
            }
        }

        Ok(CdpPageAgent::new(page, format!("tab \"{}\"", tab.title)))
    }
}

#[async_trait]
impl AgentConnector for CdpAgentConnector {
    async fn connect(&self, tab: &TabInfo) -> Result<Box<dyn PageFieldAgent>, AgentError> {
        match self.open(tab).await {
            Ok(agent) => Ok(Box::new(agent)),
            Err(e) => {
                debug!(target_id = %tab.id, error = %e, "Could not attach");
                Err(e.into_agent_error(&format!("tab \"{}\"", tab.title)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use serde_json::json;

    use super::*;
    use crate::cdp::testing::{FakeBrowser, page_handler, value};

    /// A page that reports the script missing until the install script runs.
    fn fresh_page() -> impl Fn(&str) -> crate::cdp::testing::Reply + Send + Sync + 'static {
        let installed = AtomicBool::new(false);
        move |expr: &str| {
            if expr == script::installed_probe() {
                value(json!(installed.load(Ordering::SeqCst)))
            } else if expr == script::install_script() {
                installed.store(true, Ordering::SeqCst);
                value(json!(null))
            } else {
                value(json!({"success": true, "fields": {"1": "x"}}))
            }
        }
    }

    fn connector(browser: &FakeBrowser) -> CdpAgentConnector {
        CdpAgentConnector::new(browser.endpoint(), Duration::from_secs(5))
            .with_settle_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_connect_installs_script_once() {
        let browser = FakeBrowser::start(page_handler(fresh_page())).await;
        let connector = connector(&browser);
        let tab = TabInfo::new("T1", "Outlier");

        let agent = connector.connect(&tab).await.unwrap();
        let fields = agent.extract(&[1]).await.unwrap();
        assert_eq!(fields.get(&1).map(String::as_str), Some("x"));

        connector.connect(&tab).await.unwrap();

        let installs = browser
            .evaluated()
            .iter()
            .filter(|e| e.as_str() == script::install_script())
            .count();
        assert_eq!(installs, 1);
        assert_eq!(
            browser
                .methods()
                .iter()
                .filter(|m| *m == "Target.attachToTarget")
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_connection_is_reused() {
        let browser = FakeBrowser::start(page_handler(fresh_page())).await;
        let connector = connector(&browser);

        connector.connect(&TabInfo::new("T1", "A")).await.unwrap();
        connector.connect(&TabInfo::new("T2", "B")).await.unwrap();

        let first = connector.client().await.unwrap();
        let second = connector.client().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_browser_down_is_unreachable() {
        let endpoint = CdpEndpoint::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let connector = CdpAgentConnector::new(endpoint, Duration::from_secs(1));

        let err = connector
            .connect(&TabInfo::new("T1", "Submission Form"))
            .await
            .err()
            .unwrap();
        assert_eq!(err, AgentError::Unreachable("tab \"Submission Form\"".into()));
    }

    #[tokio::test]
    async fn test_install_failure_is_unreachable() {
        let browser = FakeBrowser::start(page_handler(|_| {
            crate::cdp::testing::thrown("EvalError: Refused to evaluate a string as JavaScript")
        }))
        .await;

        let err = connector(&browser)
            .connect(&TabInfo::new("T1", "Locked"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AgentError::Unreachable(_)));
    }
}
