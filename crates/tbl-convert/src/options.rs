//! Conversion options and defaults.

use serde::{Deserialize, Serialize};

/// Default naming pattern: table name plus a zero-padded ordinal.
pub const DEFAULT_NAME_PATTERN: &str = "{tableName} #{number}";

/// Options for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Identifier of the destination compendium. Must be non-empty; a
    /// destination that cannot be found fails the whole batch.
    pub target_compendium: String,
    /// Naming pattern for entries without a usable name. `{tableName}` and
    /// `{number}` are substituted.
    pub name_pattern: String,
    /// Prefer the display name of an entry's document reference, when one
    /// is present.
    pub use_result_name: bool,
    /// Write a reference to each created record back into its source entry.
    pub add_back_links: bool,
}

impl ConvertOptions {
    /// Create options targeting the given compendium, with defaults for
    /// everything else.
    pub fn new(target_compendium: impl Into<String>) -> Self {
        Self {
            target_compendium: target_compendium.into(),
            name_pattern: DEFAULT_NAME_PATTERN.to_string(),
            use_result_name: false,
            add_back_links: false,
        }
    }

    /// Set a custom naming pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = pattern.into();
        self
    }

    /// Prefer document-reference names when present.
    pub fn with_result_names(mut self, enabled: bool) -> Self {
        self.use_result_name = enabled;
        self
    }

    /// Write back-links into source entries after each successful create.
    pub fn with_back_links(mut self, enabled: bool) -> Self {
        self.add_back_links = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ConvertOptions::new("world.items");
        assert_eq!(options.target_compendium, "world.items");
        assert_eq!(options.name_pattern, DEFAULT_NAME_PATTERN);
        assert!(!options.use_result_name);
        assert!(!options.add_back_links);
    }

    #[test]
    fn builder_methods() {
        let options = ConvertOptions::new("world.items")
            .with_pattern("{tableName} item {number}")
            .with_result_names(true)
            .with_back_links(true);
        assert_eq!(options.name_pattern, "{tableName} item {number}");
        assert!(options.use_result_name);
        assert!(options.add_back_links);
    }
}
