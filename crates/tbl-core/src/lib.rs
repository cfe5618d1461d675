//! Core types for Tabularium: roll tables, entries, and patches.
//!
//! This crate defines the data contract that the conversion engine operates
//! on. It is independent of any host system — you can construct a
//! [`RollTable`] programmatically or deserialize one from JSON at the
//! store-adapter boundary.

/// Table entries, identifiers, roll ranges, and partial updates.
pub mod entry;
/// Error types used throughout the crate.
pub mod error;
/// The roll table that owns an ordered sequence of entries.
pub mod table;

/// Re-export entry types.
pub use entry::{DocumentRef, EntryId, EntryPatch, RollRange, TableEntry};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export table types.
pub use table::{RollTable, TableId};
