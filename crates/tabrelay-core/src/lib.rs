//! # tabrelay Core
//!
//! Resolves the two tabs named by a mapping and moves field values from
//! one to the other.
//!
//! - [`TabResolver`] - Matches open tabs against the mapping's tab filters
//! - [`TransferOrchestrator`] - Extract, re-key, apply
//! - [`Session`] - Owns the current mapping and located tabs

mod error;
mod resolver;
mod session;
mod transfer;

pub use error::{SessionError, TransferError};
pub use resolver::{truncate_title, TabMatch, TabResolution, TabResolver};
pub use session::Session;
pub use transfer::{map_fields, MappedFields, TransferOrchestrator, TransferResult};
