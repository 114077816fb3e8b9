//! Per-entry load commands.
//!
//! One entry is processed at a time: check whether it is known and current,
//! then insert or reload its rows across every registered table. Entries are
//! independent; a failure here never touches other entries' rows.

use chrono::NaiveDate;
use sqlx::sqlite::SqlitePool;
use tracing::{debug, info, warn};

use crate::db::{bind_values, DbResult};
use crate::extract::latest_revision_date;
use crate::model::{Document, Structure};
use crate::registry::table_schemas;
use crate::sequence::PolymerSequence;

/// What [`check_entry`] did with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    Inserted,
    Updated,
    Unchanged,
    Skipped,
}

/// Checks one entry against the database and reconciles it.
///
/// Unknown entries are inserted. Known entries are reloaded when the
/// document carries a newer revision date (or either date is unknown), or
/// when the last-written table has no rows for the entry, which indicates an
/// interrupted earlier load.
pub async fn check_entry(
    pool: &SqlitePool,
    structure: &Structure,
    document: &Document,
    sequence: &PolymerSequence,
) -> DbResult<EntryAction> {
    let Some(entry_id) = structure.entry_id() else {
        warn!(structure = %structure.name, "structure carries no entry id, skipping");
        return Ok(EntryAction::Skipped);
    };
    debug!(entry_id, "checking entry");

    let known: Option<(String,)> = sqlx::query_as("SELECT entry_id FROM main WHERE entry_id = ?")
        .bind(entry_id)
        .fetch_optional(pool)
        .await?;
    if known.is_none() {
        info!(entry_id, "adding entry");
        insert_entry(pool, structure, document, sequence).await?;
        return Ok(EntryAction::Inserted);
    }

    let stored: Option<(Option<String>,)> =
        sqlx::query_as("SELECT revision_date FROM main WHERE entry_id = ?")
            .bind(entry_id)
            .fetch_optional(pool)
            .await?;
    let stored_date = stored
        .and_then(|(date,)| date)
        .and_then(|date| parse_revision_date(&date));
    let document_date = document
        .sole_block()
        .and_then(latest_revision_date)
        .and_then(parse_revision_date);
    let up_to_date = matches!(
        (stored_date, document_date),
        (Some(stored), Some(current)) if stored >= current
    );
    if !up_to_date {
        info!(entry_id, "updating entry");
        update_entry(pool, structure, document, sequence).await?;
        return Ok(EntryAction::Updated);
    }

    let complete: Option<(String,)> =
        sqlx::query_as("SELECT entry_id FROM coils WHERE entry_id = ?")
            .bind(entry_id)
            .fetch_optional(pool)
            .await?;
    if complete.is_none() {
        warn!(entry_id, "entry rows incomplete, reloading");
        update_entry(pool, structure, document, sequence).await?;
        return Ok(EntryAction::Updated);
    }

    Ok(EntryAction::Unchanged)
}

/// Extracts and inserts the entry's rows into every registered table, in
/// registry order.
pub async fn insert_entry(
    pool: &SqlitePool,
    structure: &Structure,
    document: &Document,
    sequence: &PolymerSequence,
) -> DbResult<()> {
    for table in table_schemas() {
        let rows = table.extract_data(structure, document, sequence);
        debug!(table = table.name(), rows = rows.len(), "inserting extracted rows");
        for row in &rows {
            let statement = table.insert_row(row)?;
            bind_values(sqlx::query(&statement), row).execute(pool).await?;
        }
    }
    Ok(())
}

/// Replaces the entry's rows in every registered table: delete by entry id,
/// then re-insert the freshly extracted rows.
pub async fn update_entry(
    pool: &SqlitePool,
    structure: &Structure,
    document: &Document,
    sequence: &PolymerSequence,
) -> DbResult<()> {
    let Some(entry_id) = structure.entry_id() else {
        warn!(structure = %structure.name, "structure carries no entry id, skipping update");
        return Ok(());
    };
    for table in table_schemas() {
        let delete = format!("DELETE FROM {} WHERE entry_id = ?", table.name());
        sqlx::query(&delete).bind(entry_id).execute(pool).await?;
        let rows = table.extract_data(structure, document, sequence);
        debug!(table = table.name(), rows = rows.len(), "replacing extracted rows");
        for row in &rows {
            let statement = table.insert_row(row)?;
            bind_values(sqlx::query(&statement), row).execute(pool).await?;
        }
    }
    Ok(())
}

fn parse_revision_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
