//! Error types for the tabrelay protocol layer.

mod agent;
mod locator;
mod store;

pub use agent::*;
pub use locator::*;
pub use store::*;
