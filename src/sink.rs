//! Destinations for accepted submissions.

use crate::error::SinkError;
use crate::record::SanitizedPerson;
use crate::LOG_TARGET;
use async_trait::async_trait;
use formguard_log::info;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Receives records that passed every gate.
///
/// Only [`SanitizedPerson`] is accepted, so unsanitized input cannot reach a
/// sink.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn store(&self, record: SanitizedPerson) -> Result<(), SinkError>;
}

#[async_trait]
impl<S: Sink + ?Sized> Sink for Arc<S> {
    async fn store(&self, record: SanitizedPerson) -> Result<(), SinkError> {
        (**self).store(record).await
    }
}

/// Accepts and drops every record, logging it at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

#[async_trait]
impl Sink for NoopSink {
    async fn store(&self, record: SanitizedPerson) -> Result<(), SinkError> {
        info!(
            target: LOG_TARGET,
            "Stored submission name={:?} age={}",
            record.name(),
            record.age()
        );
        Ok(())
    }
}

/// Keeps records in memory, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<RwLock<Vec<SanitizedPerson>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<SanitizedPerson> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn store(&self, record: SanitizedPerson) -> Result<(), SinkError> {
        self.records.write().await.push(record);
        Ok(())
    }
}
