//! In-memory record store for tests and embedding hosts.
//!
//! Backs the engine's test suite and doubles as a reference implementation
//! of [`RecordStore`]. Failure injection knobs reproduce the store-side
//! error paths the engine must tolerate: rejected creates, malformed created
//! records, failing entry updates, and failing index refreshes.

use uuid::Uuid;

use tbl_core::{EntryId, EntryPatch, TableId};

use crate::error::{StoreError, StoreResult};
use crate::store::{CreatedRecord, Destination, ItemPayload, RecordStore};

/// A record held by the store, with the payload it was created from.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    /// Destination the record was created in.
    pub destination: String,
    /// The record as reported back to the engine.
    pub record: CreatedRecord,
    /// The payload the engine supplied.
    pub payload: ItemPayload,
}

/// An entry update the store has applied.
#[derive(Debug, Clone)]
pub struct AppliedPatch {
    /// Table the updated entry belongs to.
    pub table: TableId,
    /// The updated entry.
    pub entry: EntryId,
    /// The partial update that was applied.
    pub patch: EntryPatch,
}

/// In-memory [`RecordStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    destinations: Vec<Destination>,
    records: Vec<StoredRecord>,
    patches: Vec<AppliedPatch>,
    create_calls: usize,
    fail_creates: Vec<usize>,
    malformed_creates: Vec<usize>,
    fail_entry_updates: bool,
    fail_refresh: bool,
    refreshes: usize,
}

impl MemoryStore {
    /// Create an empty store with no destinations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a destination.
    pub fn with_destination(
        mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        locked: bool,
    ) -> Self {
        self.destinations.push(Destination {
            id: id.into(),
            label: label.into(),
            locked,
        });
        self
    }

    /// Make the nth create call (1-based, counted across the store's
    /// lifetime) fail with a rejection.
    pub fn fail_create_at(mut self, call: usize) -> Self {
        self.fail_creates.push(call);
        self
    }

    /// Make the nth create call (1-based) succeed but return a record with
    /// no identifier.
    pub fn malformed_create_at(mut self, call: usize) -> Self {
        self.malformed_creates.push(call);
        self
    }

    /// Make every entry update fail.
    pub fn fail_entry_updates(mut self) -> Self {
        self.fail_entry_updates = true;
        self
    }

    /// Make every index refresh fail.
    pub fn fail_refresh(mut self) -> Self {
        self.fail_refresh = true;
        self
    }

    /// Records created so far, in creation order.
    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    /// Entry updates applied so far, in application order.
    pub fn patches(&self) -> &[AppliedPatch] {
        &self.patches
    }

    /// Number of create calls received, including failed ones.
    pub fn create_calls(&self) -> usize {
        self.create_calls
    }

    /// Number of successful index refreshes.
    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    fn has_destination(&self, id: &str) -> bool {
        self.destinations.iter().any(|d| d.id == id)
    }
}

impl RecordStore for MemoryStore {
    fn lookup(&self, destination: &str) -> Option<Destination> {
        self.destinations
            .iter()
            .find(|d| d.id == destination)
            .cloned()
    }

    fn destinations(&self) -> Vec<Destination> {
        self.destinations.clone()
    }

    async fn create(
        &mut self,
        destination: &str,
        payload: ItemPayload,
    ) -> StoreResult<CreatedRecord> {
        self.create_calls += 1;
        if !self.has_destination(destination) {
            return Err(StoreError::DestinationNotFound(destination.to_string()));
        }
        if self.fail_creates.contains(&self.create_calls) {
            return Err(StoreError::Rejected(format!(
                "create call {} refused",
                self.create_calls
            )));
        }
        if self.malformed_creates.contains(&self.create_calls) {
            return Ok(CreatedRecord {
                id: String::new(),
                name: payload.name.clone(),
                kind: payload.kind.clone(),
            });
        }
        let record = CreatedRecord {
            id: Uuid::new_v4().to_string(),
            name: payload.name.clone(),
            kind: payload.kind.clone(),
        };
        self.records.push(StoredRecord {
            destination: destination.to_string(),
            record: record.clone(),
            payload,
        });
        Ok(record)
    }

    async fn refresh_index(&mut self, destination: &str) -> StoreResult<()> {
        if !self.has_destination(destination) {
            return Err(StoreError::DestinationNotFound(destination.to_string()));
        }
        if self.fail_refresh {
            return Err(StoreError::Io("index refresh unavailable".to_string()));
        }
        self.refreshes += 1;
        Ok(())
    }

    async fn update_entry(
        &mut self,
        table: TableId,
        entry: EntryId,
        patch: EntryPatch,
    ) -> StoreResult<()> {
        if self.fail_entry_updates {
            return Err(StoreError::Io("entry updates unavailable".to_string()));
        }
        self.patches.push(AppliedPatch {
            table,
            entry,
            patch,
        });
        Ok(())
    }
}
