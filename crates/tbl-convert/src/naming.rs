//! Deterministic name resolution for converted items.
//!
//! A pure priority cascade: document-reference name, the entry's own name,
//! the naming pattern, with a content-derived fallback for flavor-text
//! tables that carry no structured names at all.

use tbl_core::{RollTable, TableEntry};

use crate::options::{ConvertOptions, DEFAULT_NAME_PATTERN};

/// Literal substituted for `{tableName}` when the table has no name.
const FALLBACK_TABLE_NAME: &str = "Table";

/// First-sentence length above which synthesis truncates to a word prefix.
const MAX_SENTENCE_LEN: usize = 50;

/// Number of words kept when truncating a long first sentence.
const MAX_SYNTHESIS_WORDS: usize = 7;

/// Minimum length for a synthesized name to be usable.
const MIN_SYNTHESIS_LEN: usize = 3;

/// Resolve the display name for the item converted from `entry`.
///
/// `ordinal` is the entry's 1-based position in the table's sequence. The
/// function is total: it always returns a non-empty string (given a
/// non-empty pattern) and has no side effects.
///
/// Priority order:
/// 1. the document reference's display name, when `use_result_name` is set
///    and the reference is not the host's generic placeholder;
/// 2. the entry's own trimmed name, when real;
/// 3. a name synthesized from the entry's text, when no explicit naming
///    preference is in effect (the rendered pattern equals the default
///    pattern's render and `use_result_name` is off);
/// 4. the rendered pattern.
pub fn resolve_name(
    table: &RollTable,
    entry: &TableEntry,
    ordinal: u32,
    options: &ConvertOptions,
) -> String {
    let reference = entry
        .document_ref
        .as_ref()
        .filter(|r| options.use_result_name && !r.is_placeholder());
    if let Some(doc_ref) = reference {
        return doc_ref.name.clone();
    }

    if entry.has_own_name() {
        return entry.name.trim().to_string();
    }

    let rendered = render_pattern(&options.name_pattern, &table.name, ordinal);

    // Only fall back to content-derived names when the caller expressed no
    // effective naming preference. A custom pattern that happens to equal
    // the default template also takes this path; observed host behavior.
    let no_naming_preference = !options.use_result_name
        && rendered == render_pattern(DEFAULT_NAME_PATTERN, &table.name, ordinal);
    if no_naming_preference {
        return synthesize_from_text(&entry.text).unwrap_or(rendered);
    }

    rendered
}

/// Render a naming pattern for the given table name and ordinal.
///
/// The ordinal is zero-padded to width 3, so a pattern containing
/// `#{number}` renders as `#007` without doubling the `#`.
fn render_pattern(pattern: &str, table_name: &str, ordinal: u32) -> String {
    let name = if table_name.is_empty() {
        FALLBACK_TABLE_NAME
    } else {
        table_name
    };
    let padded = format!("{ordinal:03}");
    pattern
        .replace("{tableName}", name)
        .replace("{number}", &padded)
}

/// Derive a readable name from an entry's text body: strip markup, cut at
/// the first sentence terminator, truncate long sentences to a word prefix,
/// and drop trailing punctuation. Returns `None` when nothing usable
/// remains.
fn synthesize_from_text(text: &str) -> Option<String> {
    let clean = strip_markup(text);
    let clean = clean.trim();
    if clean.is_empty() {
        return None;
    }

    let first_sentence = clean.split(['.', '!', '?']).next().unwrap_or("").trim();

    let mut candidate = if first_sentence.chars().count() > MAX_SENTENCE_LEN {
        first_sentence
            .split_whitespace()
            .take(MAX_SYNTHESIS_WORDS)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        first_sentence.to_string()
    };

    while candidate.ends_with(['.', ',', '!', '?', ';', ':']) {
        candidate.pop();
    }
    let candidate = candidate.trim();

    if candidate.chars().count() > MIN_SYNTHESIS_LEN {
        Some(candidate.to_string())
    } else {
        None
    }
}

/// Drop `<...>` markup spans from a text body.
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tbl_core::{DocumentRef, RollRange};

    fn loot_table() -> RollTable {
        RollTable::new("Loot")
    }

    fn unnamed_entry() -> TableEntry {
        TableEntry::new(1, RollRange::new(1, 1))
    }

    #[test]
    fn pattern_renders_with_padded_ordinal() {
        let options = ConvertOptions::new("pack");
        let name = resolve_name(&loot_table(), &unnamed_entry(), 7, &options);
        assert_eq!(name, "Loot #007");
    }

    #[test]
    fn pattern_falls_back_to_literal_table() {
        let options = ConvertOptions::new("pack");
        let name = resolve_name(&RollTable::new(""), &unnamed_entry(), 12, &options);
        assert_eq!(name, "Table #012");
    }

    #[test]
    fn own_name_beats_pattern() {
        let options = ConvertOptions::new("pack");
        let entry = unnamed_entry().with_name("  Golden Idol  ");
        let name = resolve_name(&loot_table(), &entry, 1, &options);
        assert_eq!(name, "Golden Idol");
    }

    #[test]
    fn document_reference_beats_own_name_when_enabled() {
        let options = ConvertOptions::new("pack").with_result_names(true);
        let entry = unnamed_entry()
            .with_name("TableResult")
            .with_document_ref(DocumentRef::named("Healing Potion"));
        let name = resolve_name(&loot_table(), &entry, 1, &options);
        assert_eq!(name, "Healing Potion");
    }

    #[test]
    fn placeholder_reference_is_ignored() {
        let options = ConvertOptions::new("pack").with_result_names(true);
        let entry = unnamed_entry().with_document_ref(DocumentRef::named("TableResult"));
        let name = resolve_name(&loot_table(), &entry, 2, &options);
        assert_eq!(name, "Loot #002");
    }

    #[test]
    fn synthesis_from_marked_up_text() {
        let options = ConvertOptions::new("pack");
        let entry = unnamed_entry().with_text("<p>A rusty old key that opens nothing.</p>");
        let name = resolve_name(&loot_table(), &entry, 1, &options);
        assert_eq!(name, "A rusty old key that opens nothing");
    }

    #[test]
    fn synthesis_truncates_long_sentences_to_seven_words() {
        let options = ConvertOptions::new("pack");
        let entry = unnamed_entry().with_text(
            "An impossibly long and winding description of a perfectly \
             ordinary pebble found on the side of the road",
        );
        let name = resolve_name(&loot_table(), &entry, 1, &options);
        assert_eq!(name, "An impossibly long and winding description of");
    }

    #[test]
    fn synthesis_skipped_for_custom_pattern() {
        let options = ConvertOptions::new("pack").with_pattern("{tableName} item {number}");
        let entry = unnamed_entry().with_text("<p>A rusty old key that opens nothing.</p>");
        let name = resolve_name(&loot_table(), &entry, 3, &options);
        assert_eq!(name, "Loot item 003");
    }

    #[test]
    fn synthesis_skipped_when_result_names_preferred() {
        let options = ConvertOptions::new("pack").with_result_names(true);
        let entry = unnamed_entry().with_text("<p>A rusty old key that opens nothing.</p>");
        let name = resolve_name(&loot_table(), &entry, 1, &options);
        assert_eq!(name, "Loot #001");
    }

    #[test]
    fn custom_pattern_equal_to_default_still_synthesizes() {
        // Preserved host behavior: an explicitly supplied pattern that
        // matches the default template is indistinguishable from no
        // preference.
        let options = ConvertOptions::new("pack").with_pattern("{tableName} #{number}");
        let entry = unnamed_entry().with_text("A rusty old key that opens nothing.");
        let name = resolve_name(&loot_table(), &entry, 1, &options);
        assert_eq!(name, "A rusty old key that opens nothing");
    }

    #[test]
    fn too_short_synthesis_falls_back_to_pattern() {
        let options = ConvertOptions::new("pack");
        let entry = unnamed_entry().with_text("<p>Key.</p>");
        let name = resolve_name(&loot_table(), &entry, 4, &options);
        assert_eq!(name, "Loot #004");
    }

    proptest! {
        #[test]
        fn resolved_names_are_never_empty(
            table_name in ".{0,24}",
            entry_name in ".{0,24}",
            text in ".{0,120}",
            ordinal in 1u32..1000,
            use_result_name: bool,
        ) {
            let mut table = RollTable::new(table_name);
            let id = table.add_entry(
                TableEntry::new(1, RollRange::new(1, 1))
                    .with_name(entry_name)
                    .with_text(text),
            );
            let options = ConvertOptions::new("pack").with_result_names(use_result_name);
            let entry = table.entry(id).unwrap();
            let name = resolve_name(&table, entry, ordinal, &options);
            prop_assert!(!name.is_empty());
        }
    }
}
