//! Wiring shared by every subcommand: settings storage and the CDP session.

use std::error::Error;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use tabrelay_agent_cdp::{CdpAgentConnector, CdpEndpoint, CdpTabLocator};
use tabrelay_config::AppConfig;
use tabrelay_core::{Session, TransferOrchestrator};
use tabrelay_store::{FileSettingsStore, Settings};

pub(crate) type CliResult = Result<(), Box<dyn Error>>;

pub(crate) struct App {
    pub config: AppConfig,
    pub settings: Settings<FileSettingsStore>,
}

impl App {
    /// Open the settings store, writing the default mapping on first run.
    pub async fn open(config: AppConfig) -> Result<Self, Box<dyn Error>> {
        let dir = config.storage.resolved_dir();
        let settings = Settings::new(FileSettingsStore::new(&dir).await?);
        if settings.ensure_defaults().await? {
            debug!("First run: stored default mapping in {}", dir.display());
        }
        Ok(Self { config, settings })
    }

    /// A session talking to the configured browser.
    pub fn session(&self) -> Result<Session, Box<dyn Error>> {
        let browser = &self.config.browser;
        let transfer = &self.config.transfer;
        let endpoint = CdpEndpoint::new(&browser.endpoint, browser.request_timeout())?;

        let locator = Arc::new(CdpTabLocator::new(endpoint.clone()));
        let connector = Arc::new(
            CdpAgentConnector::new(endpoint, browser.request_timeout())
                .with_settle_delay(transfer.settle_delay()),
        );
        let orchestrator = TransferOrchestrator::new().with_timeout(transfer.agent_timeout());

        Ok(Session::new(locator, connector).with_orchestrator(orchestrator))
    }

    /// The saved mapping text.
    pub async fn saved_mapping(&self) -> Result<String, Box<dyn Error>> {
        self.settings
            .field_mapping()
            .await?
            .ok_or_else(|| "No mapping saved. Use `tabrelay config save` or `tabrelay preset load`.".into())
    }

    /// Mapping text from `file`, or the saved mapping.
    pub async fn mapping_from(&self, file: Option<&Path>) -> Result<String, Box<dyn Error>> {
        match file {
            Some(path) => read_mapping_file(path).await,
            None => self.saved_mapping().await,
        }
    }
}

pub(crate) async fn read_mapping_file(path: &Path) -> Result<String, Box<dyn Error>> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e).into())
}

pub(crate) fn read_stdin() -> Result<String, Box<dyn Error>> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}
