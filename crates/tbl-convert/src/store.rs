//! The record store seam and destination-side data types.
//!
//! The engine talks to its host exclusively through [`RecordStore`]. An
//! adapter implements it over whatever the host provides (a game system's
//! compendium API, a database, the in-memory store in [`crate::memory`]);
//! the engine performs no ambient lookups of its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tbl_core::{EntryId, EntryPatch, RollRange, TableId};

use crate::error::StoreResult;

/// Category tag stamped on every created record.
pub const ITEM_KIND: &str = "loot";

/// A destination compendium as the store reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Identifier the store resolves the destination by.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Locked destinations reject all writes.
    pub locked: bool,
}

/// Provenance block attached to every created record, pointing back at the
/// table entry it was converted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Identifier of the source table.
    pub source_table: TableId,
    /// Name of the source table at conversion time.
    pub source_table_name: String,
    /// Identifier of the source entry.
    pub source_entry: EntryId,
    /// The entry's draw weight at conversion time.
    pub original_weight: u32,
    /// The entry's roll bounds at conversion time.
    pub original_range: RollRange,
    /// When the conversion ran.
    pub converted_at: DateTime<Utc>,
}

/// Payload the engine hands to the store for each record to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPayload {
    /// Resolved display name.
    pub name: String,
    /// Category tag; always [`ITEM_KIND`].
    pub kind: String,
    /// Description body copied from the source entry.
    pub description: String,
    /// Link back to the source entry.
    pub provenance: Provenance,
}

/// A record the store reports as created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Display name the record was saved under.
    pub name: String,
    /// Category tag the record was saved with.
    pub kind: String,
}

impl CreatedRecord {
    /// A record is well-formed when the store assigned it an identifier and
    /// preserved its name and category.
    pub fn is_well_formed(&self) -> bool {
        !self.id.is_empty() && !self.name.is_empty() && !self.kind.is_empty()
    }
}

/// Host-side persistence the conversion engine depends on.
///
/// Creation and update methods are async: they may involve I/O. The engine
/// awaits each call to completion before issuing the next, so implementations
/// never see overlapping in-flight operations from one conversion.
pub trait RecordStore {
    /// Resolve a destination by identifier.
    fn lookup(&self, destination: &str) -> Option<Destination>;

    /// All destinations available for conversion, for options-gathering
    /// adapters.
    fn destinations(&self) -> Vec<Destination>;

    /// Create one record in the destination.
    fn create(
        &mut self,
        destination: &str,
        payload: ItemPayload,
    ) -> impl Future<Output = StoreResult<CreatedRecord>> + Send;

    /// Refresh the destination's index so new records become visible.
    fn refresh_index(&mut self, destination: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Apply a partial update to a source table entry (back-link
    /// write-back).
    fn update_entry(
        &mut self,
        table: TableId,
        entry: EntryId,
        patch: EntryPatch,
    ) -> impl Future<Output = StoreResult<()>> + Send;
}
