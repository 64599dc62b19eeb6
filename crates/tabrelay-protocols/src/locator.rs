//! Tab locator protocol.

use async_trait::async_trait;

use crate::error::LocatorError;
use crate::types::TabInfo;

/// Enumerates the open tabs of the host browser.
///
/// Filtering by title is the caller's job; locators return every tab.
#[async_trait]
pub trait TabLocator: Send + Sync {
    async fn query(&self) -> Result<Vec<TabInfo>, LocatorError>;
}
