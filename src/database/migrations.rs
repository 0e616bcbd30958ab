//! Database migration logic for version upgrades
//!
//! Version 1 stored history without an index; version 2 adds the
//! creation-time index used by ordering and date queries.

use rusqlite::Connection;
use crate::error::Result;
use super::schema;

/// Current database version
pub const CURRENT_VERSION: &str = crate::DB_VERSION;

/// Upgrade database to the latest version
pub fn upgrade_database(conn: &Connection, current_version: &str) -> Result<()> {
    let version: u32 = current_version.parse().unwrap_or(1);

    if version < 2 {
        upgrade_to_v2(conn)?;
    }

    Ok(())
}

/// Upgrade from v1 to v2
fn upgrade_to_v2(conn: &Connection) -> Result<()> {
    conn.execute(schema::CREATE_HISTORY_INDEX, [])?;
    Ok(())
}

/// Check if database version is compatible
pub fn is_version_compatible(version: &str) -> bool {
    let v: u32 = version.parse().unwrap_or(0);
    v <= CURRENT_VERSION.parse::<u32>().unwrap_or(2)
}

/// Get the current database version from properties
pub fn get_database_version(conn: &Connection) -> Result<String> {
    let version: String = conn.query_row(
        "SELECT version FROM passgen_properties LIMIT 1",
        [],
        |row| row.get(0),
    ).unwrap_or_else(|_| "1".to_string());

    Ok(version)
}

/// Set the database version in properties
pub fn set_database_version(conn: &Connection, version: &str) -> Result<()> {
    conn.execute(
        "UPDATE passgen_properties SET version = ?, update_timestamp = ?",
        rusqlite::params![version, super::queries::now_timestamp()],
    )?;
    Ok(())
}
