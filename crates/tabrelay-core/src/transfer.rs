//! Field transfer between two page agents.

use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, info};

use tabrelay_config::MappingConfig;
use tabrelay_protocols::{AgentError, FieldNumber, FieldSet, PageFieldAgent};

use crate::error::TransferError;

/// Outcome of a successful transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferResult {
    /// Fields the destination agent reports as filled.
    pub filled_count: usize,
    /// Destination fields sent to the destination agent.
    pub mapped_count: usize,
    /// Destination fields whose source field was not extracted.
    pub skipped_dest_fields: BTreeSet<FieldNumber>,
}

/// Source values re-keyed for the destination, ready to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedFields {
    pub outgoing: FieldSet,
    pub skipped_dest_fields: BTreeSet<FieldNumber>,
}

/// Re-key extracted source fields into destination fields.
///
/// Correspondences are applied in declared order, so a later mapping to the
/// same destination overwrites an earlier one. An empty string is a value.
pub fn map_fields(
    config: &MappingConfig,
    extracted: &FieldSet,
) -> (FieldSet, BTreeSet<FieldNumber>) {
    let mut outgoing = FieldSet::new();
    let mut skipped = BTreeSet::new();

    for c in config.correspondences() {
        match extracted.get(&c.source) {
            Some(value) => {
                outgoing.insert(c.dest, value.clone());
            }
            None => {
                skipped.insert(c.dest);
            }
        }
    }

    (outgoing, skipped)
}

/// Runs extract → map → apply for one mapping.
///
/// Not re-entrant: callers serialise transfers.
#[derive(Debug, Clone, Default)]
pub struct TransferOrchestrator {
    timeout: Option<Duration>,
}

impl TransferOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound each agent round-trip. `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub async fn transfer(
        &self,
        config: &MappingConfig,
        source: &dyn PageFieldAgent,
        dest: &dyn PageFieldAgent,
    ) -> Result<TransferResult, TransferError> {
        let mapped = self.extract(config, source).await?;
        self.fill(mapped, dest).await
    }

    /// Extract from `source` and re-key into destination fields.
    ///
    /// Fails with `NoFieldsMapped` before any destination is touched.
    pub async fn extract(
        &self,
        config: &MappingConfig,
        source: &dyn PageFieldAgent,
    ) -> Result<MappedFields, TransferError> {
        let requested = config.requested_source_fields();
        debug!(?requested, "Requesting source fields");

        let extracted = self
            .bounded(source.extract(&requested))
            .await
            .map_err(TransferError::ExtractionFailed)?;
        if extracted.is_empty() {
            return Err(TransferError::ExtractionFailed(AgentError::Failed(
                "No fields found. The page structure might be different than expected."
                    .to_string(),
            )));
        }
        debug!(count = extracted.len(), "Extracted source fields");

        let (outgoing, skipped_dest_fields) = map_fields(config, &extracted);
        if outgoing.is_empty() {
            return Err(TransferError::NoFieldsMapped);
        }
        if !skipped_dest_fields.is_empty() {
            debug!(skipped = ?skipped_dest_fields, "Some destination fields have no source value");
        }

        Ok(MappedFields {
            outgoing,
            skipped_dest_fields,
        })
    }

    /// Send mapped fields to `dest`.
    pub async fn fill(
        &self,
        mapped: MappedFields,
        dest: &dyn PageFieldAgent,
    ) -> Result<TransferResult, TransferError> {
        let MappedFields {
            outgoing,
            skipped_dest_fields,
        } = mapped;

        let filled_count = self
            .bounded(dest.apply(&outgoing))
            .await
            .map_err(TransferError::FillFailed)?;
        if filled_count == 0 {
            return Err(TransferError::FillFailed(AgentError::Failed(
                "No fields could be filled. The form structure might be different than expected."
                    .to_string(),
            )));
        }

        info!(
            filled = filled_count,
            mapped = outgoing.len(),
            skipped = skipped_dest_fields.len(),
            "Transfer complete"
        );

        Ok(TransferResult {
            filled_count,
            mapped_count: outgoing.len(),
            skipped_dest_fields,
        })
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, AgentError>
    where
        F: Future<Output = Result<T, AgentError>>,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| AgentError::Timeout(limit))?,
            None => fut.await,
        }
    }
}

#[cfg(test)]
#[path = "transfer_tests.rs"]
mod tests;
