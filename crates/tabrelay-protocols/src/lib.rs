//! # tabrelay Protocols
//!
//! Interface definitions for the collaborators tabrelay talks to.
//! Contains only traits, shared types and the page agent wire contract.
//!
//! ## Core Traits
//!
//! - [`PageFieldAgent`] - Extracts and fills numbered fields inside one tab
//! - [`AgentConnector`] - Installs a [`PageFieldAgent`] into a located tab
//! - [`TabLocator`] - Enumerates open tabs
//! - [`SettingsStore`] - Durable key to text storage

pub mod agent;
pub mod error;
pub mod locator;
pub mod message;
pub mod store;
pub mod types;

pub use agent::{AgentConnector, PageFieldAgent};
pub use error::{AgentError, LocatorError, StoreError};
pub use locator::TabLocator;
pub use message::{AgentRequest, AgentResponse};
pub use store::SettingsStore;
pub use types::*;
