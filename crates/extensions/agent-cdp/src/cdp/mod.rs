//! Minimal Chrome DevTools Protocol client.
//!
//! The browser must be started with remote debugging:
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```
//!
//! Discovery (`/json/version`, `/json/list`) goes over plain HTTP; commands
//! go over the browser websocket, with one flat session per attached tab.

mod client;
mod discovery;
mod error;
mod protocol;
mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use client::CdpClient;
pub use discovery::CdpEndpoint;
pub use error::CdpError;
pub use protocol::{BrowserVersion, PageInfo};
pub use session::PageSession;
