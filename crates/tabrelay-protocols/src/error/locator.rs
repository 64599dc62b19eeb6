//! Tab locator errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("Browser not available: {0}")]
    Unavailable(String),

    #[error("Invalid response from browser tabs API: {0}")]
    InvalidResponse(String),
}
