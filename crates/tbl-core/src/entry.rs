use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name a host assigns to entries that carry no real name of their
/// own. An entry or document reference named like this is treated as unnamed.
pub const PLACEHOLDER_NAME: &str = "TableResult";

/// Unique identifier for a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Generate a new random entry ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Inclusive roll bounds an entry occupies on its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRange {
    /// Lowest roll that selects the entry.
    pub low: i32,
    /// Highest roll that selects the entry.
    pub high: i32,
}

impl RollRange {
    /// Create a range covering `low..=high`.
    pub fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    /// Whether a roll falls inside this range.
    pub fn contains(&self, roll: i32) -> bool {
        roll >= self.low && roll <= self.high
    }
}

impl fmt::Display for RollRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Reference to an existing catalog record that an entry points at instead of
/// carrying free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Display name of the referenced record.
    pub name: String,
    /// Collection the record lives in, if known.
    pub collection: Option<String>,
    /// Identifier of the record inside its collection, if known.
    pub id: Option<String>,
}

impl DocumentRef {
    /// Create a reference with only a display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection: None,
            id: None,
        }
    }

    /// True when the reference carries no usable display name (empty or the
    /// host's generic placeholder).
    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty() || self.name == PLACEHOLDER_NAME
    }
}

/// One weighted row of a roll table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    /// Unique identifier of this entry within its table.
    pub id: EntryId,
    /// Human-readable name; empty means the entry is unnamed.
    pub name: String,
    /// Free-text body of the entry; may contain markup.
    pub text: String,
    /// Relative draw weight.
    pub weight: u32,
    /// Inclusive roll bounds.
    pub range: RollRange,
    /// Reference to an existing record, when the entry is not free text.
    pub document_ref: Option<DocumentRef>,
}

impl TableEntry {
    /// Create an unnamed entry with the given weight and range.
    pub fn new(weight: u32, range: RollRange) -> Self {
        Self {
            id: EntryId::new(),
            name: String::new(),
            text: String::new(),
            weight,
            range,
            document_ref: None,
        }
    }

    /// Set the entry's name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the entry's text body.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Attach a document reference.
    pub fn with_document_ref(mut self, doc_ref: DocumentRef) -> Self {
        self.document_ref = Some(doc_ref);
        self
    }

    /// True when the entry has a real name: non-blank and not the host's
    /// generic placeholder.
    pub fn has_own_name(&self) -> bool {
        let trimmed = self.name.trim();
        !trimmed.is_empty() && trimmed != PLACEHOLDER_NAME
    }
}

/// Partial update applied to an entry in place. Only present fields are
/// overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPatch {
    /// Replacement name, if any.
    pub name: Option<String>,
    /// Replacement text body, if any.
    pub text: Option<String>,
}

impl EntryPatch {
    /// A patch that only replaces the text body.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            name: None,
            text: Some(text.into()),
        }
    }

    /// Apply this patch to an entry, overwriting only the present fields.
    pub fn apply_to(&self, entry: &mut TableEntry) {
        if let Some(name) = &self.name {
            entry.name = name.clone();
        }
        if let Some(text) = &self.text {
            entry.text = text.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_contains_is_inclusive() {
        let range = RollRange::new(3, 5);
        assert!(!range.contains(2));
        assert!(range.contains(3));
        assert!(range.contains(5));
        assert!(!range.contains(6));
    }

    #[test]
    fn placeholder_references_are_detected() {
        assert!(DocumentRef::named("").is_placeholder());
        assert!(DocumentRef::named(PLACEHOLDER_NAME).is_placeholder());
        assert!(!DocumentRef::named("Healing Potion").is_placeholder());
    }

    #[test]
    fn own_name_ignores_blanks_and_placeholder() {
        let entry = TableEntry::new(1, RollRange::new(1, 1));
        assert!(!entry.has_own_name());
        assert!(!entry.clone().with_name("   ").has_own_name());
        assert!(!entry.clone().with_name(PLACEHOLDER_NAME).has_own_name());
        assert!(entry.with_name("Golden Idol").has_own_name());
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut entry = TableEntry::new(1, RollRange::new(1, 2))
            .with_name("Key")
            .with_text("A rusty old key.");
        EntryPatch::text("A shiny new key.").apply_to(&mut entry);
        assert_eq!(entry.name, "Key");
        assert_eq!(entry.text, "A shiny new key.");
    }

    #[test]
    fn entry_id_display_is_short() {
        let id = EntryId::new();
        assert_eq!(id.to_string().len(), 8);
    }
}
