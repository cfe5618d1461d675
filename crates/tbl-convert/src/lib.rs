//! Conversion engine turning roll-table entries into compendium items.
//!
//! Converts each entry of a [`tbl_core::RollTable`] into an independent
//! catalog record inside a destination compendium, through an injected
//! [`RecordStore`]. Provides a deterministic name resolver, an
//! error-aggregating batch loop with partial-failure semantics, and optional
//! back-links from source entries to the records they produced.

/// Batch conversion loop, result aggregation, and back-link write-back.
pub mod engine;
/// Error types for record store operations.
pub mod error;
/// In-memory record store for tests and embedding hosts.
pub mod memory;
/// Deterministic name resolution for converted items.
pub mod naming;
/// Conversion options and defaults.
pub mod options;
/// The record store seam and destination-side data types.
pub mod store;

pub use engine::{ConversionReport, CreatedItem, convert};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use naming::resolve_name;
pub use options::{ConvertOptions, DEFAULT_NAME_PATTERN};
pub use store::{CreatedRecord, Destination, ItemPayload, Provenance, RecordStore};
