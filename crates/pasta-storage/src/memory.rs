use async_trait::async_trait;
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use pasta_core::error::{Result, StorageError};
use pasta_core::{Paste, PasteId, PasteSummary, ReadRepository, Repository};
use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// In-memory storage entry for a paste.
#[derive(Debug, Clone)]
struct Entry {
    paste: Paste,
    /// Insertion order, used to break timestamp ties in listings.
    seq: u64,
}

/// In-memory implementation of the Repository trait using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, Entry>,
    next_seq: AtomicU64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Number of stored pastes.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, id: &PasteId) -> Result<Option<Paste>> {
        Ok(self
            .storage
            .get(id.as_str())
            .map(|entry| entry.paste.clone()))
    }

    async fn list_recent(&self) -> Result<Vec<PasteSummary>> {
        let mut entries: Vec<(jiff::Timestamp, u64, PasteSummary)> = self
            .storage
            .iter()
            .map(|entry| (entry.paste.timestamp, entry.seq, entry.paste.summary()))
            .collect();

        entries.sort_by_key(|(timestamp, seq, _)| Reverse((*timestamp, *seq)));
        trace!(count = entries.len(), "listed pastes from memory");

        Ok(entries.into_iter().map(|(_, _, summary)| summary).collect())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, paste: &Paste) -> Result<()> {
        // Check-and-insert under the shard lock: reject if the id is taken.
        match self.storage.entry(paste.id.as_str().to_owned()) {
            MapEntry::Occupied(_) => Err(StorageError::Conflict(paste.id.to_string())),
            MapEntry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                slot.insert(Entry {
                    paste: paste.clone(),
                    seq,
                });
                Ok(())
            }
        }
    }

    async fn delete(&self, id: &PasteId) -> Result<bool> {
        Ok(self.storage.remove(id.as_str()).is_some())
    }
}
