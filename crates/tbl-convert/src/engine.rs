//! Batch conversion loop, result aggregation, and back-link write-back.
//!
//! [`convert`] is the single entry point: it validates the destination once,
//! walks the table's entries strictly in order, and folds every outcome into
//! one [`ConversionReport`]. A failing entry never aborts the batch, and no
//! error escapes the function.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use tbl_core::{EntryId, EntryPatch, RollTable, TableEntry};

use crate::naming::resolve_name;
use crate::options::ConvertOptions;
use crate::store::{CreatedRecord, Destination, ITEM_KIND, ItemPayload, Provenance, RecordStore};

/// Summary of one record created during a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedItem {
    /// Store-assigned identifier of the record.
    pub id: String,
    /// Name the record was created under.
    pub name: String,
    /// The source entry the record was converted from.
    pub table_entry_id: EntryId,
}

/// Aggregate outcome of one conversion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionReport {
    /// True iff no errors occurred across the whole batch.
    pub success: bool,
    /// Number of records created; always equals `created_items.len()`.
    pub items_created: usize,
    /// One human-readable message per failed entry, or a single message for
    /// a batch-fatal failure.
    pub errors: Vec<String>,
    /// Every record created, in entry order.
    pub created_items: Vec<CreatedItem>,
    /// Diagnostics from best-effort steps (back-link writes, index refresh).
    /// Never affect `success`.
    pub warnings: Vec<String>,
}

impl ConversionReport {
    fn fatal(message: String) -> Self {
        Self {
            errors: vec![message],
            ..Self::default()
        }
    }
}

/// Convert every entry of `table` into a record in the destination named by
/// `options.target_compendium`.
///
/// Entries are processed sequentially in table order; each create is awaited
/// to completion before the next begins, and a failing entry is recorded in
/// the report without stopping the batch. An unknown or locked destination
/// fails the batch before any entry is attempted. Conversion is not
/// idempotent: running it twice creates two independent sets of records.
pub async fn convert<S: RecordStore>(
    table: &RollTable,
    options: &ConvertOptions,
    store: &mut S,
) -> ConversionReport {
    let Some(destination) = store.lookup(&options.target_compendium) else {
        return ConversionReport::fatal(format!(
            "compendium not found: {}",
            options.target_compendium
        ));
    };
    if destination.locked {
        return ConversionReport::fatal(format!(
            "compendium is locked: {}",
            options.target_compendium
        ));
    }

    let mut report = ConversionReport::default();
    let mut ordinal: u32 = 1;

    for entry in table.entries() {
        let name = resolve_name(table, entry, ordinal, options);
        let payload = build_payload(table, entry, name.clone());

        match store.create(&destination.id, payload).await {
            Ok(record) if record.is_well_formed() => {
                report.items_created += 1;
                report.created_items.push(CreatedItem {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    table_entry_id: entry.id,
                });
                if options.add_back_links {
                    add_back_link(table, entry, &record, &destination, store, &mut report).await;
                }
            }
            Ok(_) => {
                report
                    .errors
                    .push(format!("failed to create item \"{name}\": invalid result"));
            }
            Err(err) => {
                report
                    .errors
                    .push(format!("failed to create item \"{name}\": {err}"));
            }
        }

        // Ordinal numbering reflects position in the source sequence, not
        // success count.
        ordinal += 1;
    }

    report.success = report.errors.is_empty();

    if report.items_created > 0 {
        refresh_destination(store, &destination, &mut report).await;
    }

    report
}

/// Ask the destination to reindex itself so new records become visible.
///
/// Best-effort: a failure is logged and recorded as a warning only.
async fn refresh_destination<S: RecordStore>(
    store: &mut S,
    destination: &Destination,
    report: &mut ConversionReport,
) {
    if let Err(err) = store.refresh_index(&destination.id).await {
        tracing::warn!(%err, destination = %destination.id, "failed to refresh destination index");
        report.warnings.push(format!(
            "failed to refresh index for {}: {err}",
            destination.id
        ));
    }
}

fn build_payload(table: &RollTable, entry: &TableEntry, name: String) -> ItemPayload {
    let description = if entry.text.is_empty() {
        entry.name.clone()
    } else {
        entry.text.clone()
    };
    ItemPayload {
        name,
        kind: ITEM_KIND.to_string(),
        description,
        provenance: Provenance {
            source_table: table.id,
            source_table_name: table.name.clone(),
            source_entry: entry.id,
            original_weight: entry.weight,
            original_range: entry.range,
            converted_at: Utc::now(),
        },
    }
}

/// Write a reference to `record` back into the source entry's text.
///
/// Best-effort: a failure is logged and recorded as a warning, never as a
/// batch error, and never blocks the remaining entries.
async fn add_back_link<S: RecordStore>(
    table: &RollTable,
    entry: &TableEntry,
    record: &CreatedRecord,
    destination: &Destination,
    store: &mut S,
    report: &mut ConversionReport,
) {
    let link = format!(
        "@Compendium[{}.{}]{{{}}}",
        destination.id, record.id, record.name
    );
    let original = if entry.text.is_empty() {
        entry.name.as_str()
    } else {
        entry.text.as_str()
    };
    let updated = format!("{original}\n\n<p><strong>Item:</strong> {link}</p>");

    if let Err(err) = store
        .update_entry(table.id, entry.id, EntryPatch::text(updated))
        .await
    {
        tracing::warn!(%err, entry = %entry.id, "failed to add back-link to table entry");
        report
            .warnings
            .push(format!("failed to add back-link for entry {}: {err}", entry.id));
    }
}
