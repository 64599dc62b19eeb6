//! Tab listing over the browser's `/json/list` endpoint.

use async_trait::async_trait;
use tracing::trace;

use tabrelay_protocols::{LocatorError, TabInfo, TabLocator};

use crate::cdp::CdpEndpoint;

/// Lists regular page tabs. Needs no websocket connection.
pub struct CdpTabLocator {
    endpoint: CdpEndpoint,
}

impl CdpTabLocator {
    pub fn new(endpoint: CdpEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl TabLocator for CdpTabLocator {
    async fn query(&self) -> Result<Vec<TabInfo>, LocatorError> {
        let pages = self.endpoint.list_pages().await?;
        let tabs: Vec<TabInfo> = pages
            .into_iter()
            .filter(|p| p.is_page())
            .map(TabInfo::from)
            .collect();
        trace!(count = tabs.len(), "Listed tabs");
        Ok(tabs)
    }
}
