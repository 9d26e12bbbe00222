//! Ordered event journal

use chrono::Utc;
use proofmint_core::{EventRecord, RegistryEvent};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventJournal {
    records: Vec<EventRecord>,
}

impl EventJournal {
    pub fn emit(&mut self, event: RegistryEvent) -> u64 {
        let seq = self.records.len() as u64;
        debug!(seq, event = event.name(), "Event journaled");
        self.records.push(EventRecord {
            seq,
            emitted_at: Utc::now(),
            event,
        });
        seq
    }

    /// Records with `seq >= since`, oldest first
    pub fn since(&self, since: u64) -> &[EventRecord] {
        let start = usize::try_from(since)
            .unwrap_or(usize::MAX)
            .min(self.records.len());
        &self.records[start..]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
