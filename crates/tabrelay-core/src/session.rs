//! Session state: the current mapping and the tabs it resolves to.

use std::sync::Arc;

use tracing::{debug, info, warn};

use tabrelay_config::{ConfigError, MappingConfig, MappingParser, MappingValidator};
use tabrelay_protocols::{AgentConnector, TabInfo, TabLocator, TabRole};

use crate::error::{SessionError, TransferError};
use crate::resolver::{TabResolution, TabResolver};
use crate::transfer::{TransferOrchestrator, TransferResult};

/// Single owner of the resolved mapping and the last located tabs.
///
/// Every mutating call takes `&mut self`, which serialises transfers.
pub struct Session {
    locator: Arc<dyn TabLocator>,
    connector: Arc<dyn AgentConnector>,
    orchestrator: TransferOrchestrator,
    config: Option<MappingConfig>,
    tabs: Option<TabResolution>,
}

impl Session {
    pub fn new(locator: Arc<dyn TabLocator>, connector: Arc<dyn AgentConnector>) -> Self {
        Self {
            locator,
            connector,
            orchestrator: TransferOrchestrator::new(),
            config: None,
            tabs: None,
        }
    }

    pub fn with_orchestrator(mut self, orchestrator: TransferOrchestrator) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    pub fn config(&self) -> Option<&MappingConfig> {
        self.config.as_ref()
    }

    pub fn tabs(&self) -> Option<&TabResolution> {
        self.tabs.as_ref()
    }

    /// Reparse the mapping text from scratch.
    ///
    /// On failure the previous mapping is dropped too, so copy stays disabled
    /// until the text is fixed.
    pub fn set_config_text(&mut self, text: &str) -> Result<&MappingConfig, ConfigError> {
        self.tabs = None;
        match MappingParser::parse(text) {
            Ok(config) => {
                MappingValidator::validate(&config).log_warnings();
                debug!(
                    source = config.source_tab_filter(),
                    dest = config.dest_tab_filter(),
                    mappings = config.correspondences().len(),
                    "Mapping resolved"
                );
                Ok(self.config.insert(config))
            }
            Err(e) => {
                self.config = None;
                Err(e)
            }
        }
    }

    /// Query open tabs and match them against the current mapping.
    pub async fn refresh_tabs(&mut self) -> Result<&TabResolution, SessionError> {
        let config = self.config.as_ref().ok_or(SessionError::NoConfig)?;
        let tabs = match self.locator.query().await {
            Ok(tabs) => tabs,
            Err(e) => {
                self.tabs = None;
                return Err(e.into());
            }
        };
        let resolution = TabResolver::resolve(config, &tabs);
        debug!(
            open = tabs.len(),
            can_copy = resolution.can_copy(),
            "Tabs resolved"
        );
        Ok(self.tabs.insert(resolution))
    }

    /// Copy fields from the source tab to the destination tab.
    pub async fn copy_fields(&mut self) -> Result<TransferResult, SessionError> {
        let resolution = self.refresh_tabs().await?.clone();
        let source_tab = resolution.source.into_tab(TabRole::Source)?;
        let dest_tab = resolution.dest.into_tab(TabRole::Destination)?;
        let config = self.config.as_ref().ok_or(SessionError::NoConfig)?;

        info!(source = %source_tab.title, dest = %dest_tab.title, "Copying fields");

        let result = self.run_transfer(config, &source_tab, &dest_tab).await;
        if let Err(e) = &result {
            warn!("Copy failed: {}", e);
        }
        Ok(result?)
    }

    /// The destination is only connected once there is something to fill.
    async fn run_transfer(
        &self,
        config: &MappingConfig,
        source_tab: &TabInfo,
        dest_tab: &TabInfo,
    ) -> Result<TransferResult, TransferError> {
        let source_agent = self
            .connector
            .connect(source_tab)
            .await
            .map_err(TransferError::ExtractionFailed)?;
        let mapped = self.orchestrator.extract(config, source_agent.as_ref()).await?;

        let dest_agent = self
            .connector
            .connect(dest_tab)
            .await
            .map_err(TransferError::FillFailed)?;
        self.orchestrator.fill(mapped, dest_agent.as_ref()).await
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
