use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entry::{EntryId, EntryPatch, TableEntry};
use crate::error::{CoreError, CoreResult};

/// Unique identifier for a roll table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(pub Uuid);

impl TableId {
    /// Generate a new random table ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TableId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A roll table: an ordered sequence of weighted entries.
///
/// Insertion order is semantic — it determines the ordinal numbering the
/// conversion engine uses and is preserved through serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollTable {
    /// Unique identifier of the table.
    pub id: TableId,
    /// Display name of the table.
    pub name: String,
    entries: Vec<TableEntry>,
}

impl RollTable {
    /// Create an empty table with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TableId::new(),
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry, preserving insertion order. Returns the entry's ID.
    pub fn add_entry(&mut self, entry: TableEntry) -> EntryId {
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// The entries in insertion order.
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by ID.
    pub fn entry(&self, id: EntryId) -> Option<&TableEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Apply a partial update to the entry with the given ID, in place.
    pub fn apply_patch(&mut self, id: EntryId, patch: &EntryPatch) -> CoreResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(CoreError::EntryNotFound(id))?;
        patch.apply_to(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::RollRange;

    fn three_entry_table() -> RollTable {
        let mut table = RollTable::new("Loot");
        table.add_entry(TableEntry::new(1, RollRange::new(1, 1)).with_name("Sword"));
        table.add_entry(TableEntry::new(2, RollRange::new(2, 3)).with_name("Shield"));
        table.add_entry(TableEntry::new(1, RollRange::new(4, 4)).with_name("Potion"));
        table
    }

    #[test]
    fn entries_keep_insertion_order() {
        let table = three_entry_table();
        let names: Vec<&str> = table.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Sword", "Shield", "Potion"]);
    }

    #[test]
    fn patch_by_id_updates_one_entry() {
        let mut table = three_entry_table();
        let target = table.entries()[1].id;
        table
            .apply_patch(target, &EntryPatch::text("now linked"))
            .unwrap();
        assert_eq!(table.entries()[1].text, "now linked");
        assert_eq!(table.entries()[0].text, "");
        assert_eq!(table.entries()[2].text, "");
    }

    #[test]
    fn patch_unknown_entry_fails() {
        let mut table = three_entry_table();
        let err = table
            .apply_patch(EntryId::new(), &EntryPatch::text("x"))
            .unwrap_err();
        assert!(matches!(err, CoreError::EntryNotFound(_)));
    }

    #[test]
    fn table_round_trips_through_json() {
        let table = three_entry_table();
        let json = serde_json::to_string(&table).unwrap();
        let back: RollTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, table.id);
        assert_eq!(back.name, "Loot");
        assert_eq!(back.len(), 3);
        assert_eq!(back.entries()[2].name, "Potion");
    }

    #[test]
    fn table_deserializes_from_adapter_json() {
        let json = serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "name": "Trinkets",
            "entries": [{
                "id": uuid::Uuid::new_v4(),
                "name": "",
                "text": "<p>A tiny brass bell.</p>",
                "weight": 1,
                "range": { "low": 1, "high": 2 },
                "document_ref": null
            }]
        });
        let table: RollTable = serde_json::from_value(json).unwrap();
        assert_eq!(table.name, "Trinkets");
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].range, RollRange::new(1, 2));
    }
}
