//! SQL query operations for database access
//!
//! This module provides low-level query functions for database operations.
//! For history-level operations, use the PasswordHistory API.

use rusqlite::{Connection, params};
use chrono::{DateTime, Utc};
use crate::error::{PassgenError, Result};
use crate::generator::PasswordOptions;
use super::models::HistoryEntry;

/// Timestamp format used in database (fixed width, sorts lexically)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Format a DateTime for database storage
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp from database
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    chrono::NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .ok()
        .map(|ndt| DateTime::from_naive_utc_and_offset(ndt, Utc))
}

/// Get current timestamp formatted for database
pub fn now_timestamp() -> String {
    format_timestamp(&Utc::now())
}

// ============================================================================
// Properties queries
// ============================================================================

/// Get database ID from properties
pub fn get_database_id(conn: &Connection) -> Result<Option<String>> {
    let result = conn.query_row(
        "SELECT database_id FROM passgen_properties LIMIT 1",
        [],
        |row| row.get(0),
    );
    Ok(result.ok())
}

/// Get all properties from the database
pub fn get_properties(conn: &Connection) -> Result<Option<RawProperties>> {
    let result = conn.query_row(
        "SELECT database_id, version, create_timestamp, update_timestamp
         FROM passgen_properties LIMIT 1",
        [],
        |row| {
            Ok(RawProperties {
                database_id: row.get(0)?,
                version: row.get(1)?,
                create_timestamp: row.get(2)?,
                update_timestamp: row.get(3)?,
            })
        },
    );
    Ok(result.ok())
}

/// Set properties (insert new row)
pub fn set_properties(conn: &Connection, database_id: &str, version: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO passgen_properties (database_id, version, create_timestamp, update_timestamp)
         VALUES (?, ?, ?, ?)",
        params![database_id, version, now_timestamp(), now_timestamp()],
    )?;
    Ok(())
}

// ============================================================================
// History queries
// ============================================================================

const HISTORY_COLUMNS: &str = "entry_id, password, length, include_lowercase, include_uppercase,
    include_numbers, include_symbols, create_timestamp";

/// Newest first; rowid breaks ties between entries created in the same millisecond
const HISTORY_ORDER: &str = "ORDER BY create_timestamp DESC, rowid DESC";

fn map_history_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawHistoryEntry> {
    Ok(RawHistoryEntry {
        entry_id: row.get(0)?,
        password: row.get(1)?,
        length: row.get(2)?,
        include_lowercase: row.get::<_, i32>(3)? != 0,
        include_uppercase: row.get::<_, i32>(4)? != 0,
        include_numbers: row.get::<_, i32>(5)? != 0,
        include_symbols: row.get::<_, i32>(6)? != 0,
        create_timestamp: row.get(7)?,
    })
}

/// Insert a history entry
pub fn insert_history_entry(conn: &Connection, entry: &HistoryEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO passgen_history (entry_id, password, length, include_lowercase,
            include_uppercase, include_numbers, include_symbols, create_timestamp)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            entry.id,
            entry.password,
            entry.length as i64,
            entry.settings.include_lowercase as i32,
            entry.settings.include_uppercase as i32,
            entry.settings.include_numbers as i32,
            entry.settings.include_symbols as i32,
            format_timestamp(&entry.timestamp),
        ],
    )?;
    Ok(())
}

/// Get history entries newest first, optionally limited
pub fn get_history_raw(conn: &Connection, limit: Option<usize>) -> Result<Vec<RawHistoryEntry>> {
    // SQLite treats a negative LIMIT as "no limit"
    let limit = limit.map_or(-1, |l| l as i64);
    let mut stmt = conn.prepare(&format!(
        "SELECT {HISTORY_COLUMNS} FROM passgen_history {HISTORY_ORDER} LIMIT ?"
    ))?;

    let entries = stmt.query_map([limit], map_history_row)?;
    entries.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
}

/// Get history entries created within `[start, end]`, newest first
pub fn get_history_between(
    conn: &Connection,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> Result<Vec<RawHistoryEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {HISTORY_COLUMNS} FROM passgen_history
         WHERE create_timestamp >= ? AND create_timestamp <= ? {HISTORY_ORDER}"
    ))?;

    let entries = stmt.query_map(
        params![format_timestamp(start), format_timestamp(end)],
        map_history_row,
    )?;
    entries.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
}

/// Delete one history entry; returns false if it did not exist
pub fn delete_history_entry(conn: &Connection, entry_id: &str) -> Result<bool> {
    let rows = conn.execute(
        "DELETE FROM passgen_history WHERE entry_id = ?",
        [entry_id],
    )?;
    Ok(rows > 0)
}

/// Delete every history entry; returns the number removed
pub fn clear_history(conn: &Connection) -> Result<usize> {
    let rows = conn.execute("DELETE FROM passgen_history", [])?;
    Ok(rows)
}

/// Keep only the newest `keep` entries; returns the number removed
pub fn prune_history(conn: &Connection, keep: usize) -> Result<usize> {
    let rows = conn.execute(
        &format!(
            "DELETE FROM passgen_history WHERE rowid NOT IN
             (SELECT rowid FROM passgen_history {HISTORY_ORDER} LIMIT ?)"
        ),
        [keep as i64],
    )?;
    Ok(rows)
}

/// Count history entries
pub fn count_history(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM passgen_history",
        [],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

// ============================================================================
// Raw data structures
// ============================================================================

/// Raw properties from database
#[derive(Debug, Clone)]
pub struct RawProperties {
    pub database_id: String,
    pub version: Option<String>,
    pub create_timestamp: Option<String>,
    pub update_timestamp: Option<String>,
}

/// Raw history row from database
#[derive(Debug, Clone)]
pub struct RawHistoryEntry {
    pub entry_id: String,
    pub password: String,
    pub length: i64,
    pub include_lowercase: bool,
    pub include_uppercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
    pub create_timestamp: String,
}

impl RawHistoryEntry {
    /// Convert into a history entry, validating the stored timestamp
    pub fn into_entry(self) -> Result<HistoryEntry> {
        let timestamp = parse_timestamp(&self.create_timestamp).ok_or_else(|| {
            PassgenError::DatabaseError(format!(
                "Invalid timestamp '{}' for entry {}",
                self.create_timestamp, self.entry_id
            ))
        })?;

        Ok(HistoryEntry {
            id: self.entry_id,
            password: self.password,
            timestamp,
            length: self.length.max(0) as usize,
            settings: PasswordOptions {
                include_lowercase: self.include_lowercase,
                include_uppercase: self.include_uppercase,
                include_numbers: self.include_numbers,
                include_symbols: self.include_symbols,
            },
        })
    }
}
