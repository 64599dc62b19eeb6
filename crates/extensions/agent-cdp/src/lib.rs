//! Chrome DevTools Protocol backend for tabrelay.
//!
//! ```text
//! ┌──────────────┐  HTTP /json/list   ┌──────────────────┐
//! │ CdpTabLocator│ ─────────────────► │                  │
//! └──────────────┘                    │  Chrome / Edge   │
//! ┌──────────────┐  WebSocket (CDP)   │ --remote-        │
//! │ CdpPageAgent │ ◄────────────────► │ debugging-port   │
//! └──────────────┘  Runtime.evaluate  └──────────────────┘
//! ```
//!
//! The connector installs a small page script (`window.__tabrelayAgent`) into
//! each tab it attaches to; extraction and filling run inside the page.

pub mod agent;
pub mod cdp;
pub mod connector;
pub mod locator;
pub mod script;

pub use agent::CdpPageAgent;
pub use cdp::{CdpClient, CdpEndpoint, CdpError};
pub use connector::{CdpAgentConnector, DEFAULT_SETTLE_DELAY};
pub use locator::CdpTabLocator;
