//! Database connection management

use std::path::{Path, PathBuf};
use rusqlite::Connection;
use crate::error::{PassgenError, Result};
use super::models::PGProperties;
use super::{migrations, queries, schema};
use crate::utils::generate_database_id;

/// Database connection wrapper
pub struct Database {
    /// Path to the database file (`None` for in-memory databases)
    path: Option<PathBuf>,
    /// SQLite connection
    conn: Option<Connection>,
}

impl Database {
    /// Open an existing database, upgrading its schema if needed
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PassgenError::DatabaseNotFound(
                path.to_string_lossy().to_string(),
            ));
        }

        let conn = Connection::open(path)?;
        let db = Self {
            path: Some(path.to_path_buf()),
            conn: Some(conn),
        };
        db.ensure_current_version()?;
        Ok(db)
    }

    /// Create a new database with all tables
    pub fn create(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::initialize(&conn)?;

        log::info!("Created history database at {}", path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Some(conn),
        })
    }

    /// Create a fresh database that lives only in memory
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(&conn)?;

        Ok(Self {
            path: None,
            conn: Some(conn),
        })
    }

    fn initialize(conn: &Connection) -> Result<()> {
        for sql in schema::CREATE_ALL_TABLES {
            conn.execute(sql, [])?;
        }
        queries::set_properties(conn, &generate_database_id(), crate::DB_VERSION)
    }

    fn ensure_current_version(&self) -> Result<()> {
        let conn = self.connection()?;
        let version = migrations::get_database_version(conn)?;

        if !migrations::is_version_compatible(&version) {
            return Err(PassgenError::InvalidVersion(version));
        }

        if version != migrations::CURRENT_VERSION {
            log::info!(
                "Upgrading history database from version {} to {}",
                version,
                migrations::CURRENT_VERSION
            );
            migrations::upgrade_database(conn, &version)?;
            migrations::set_database_version(conn, migrations::CURRENT_VERSION)?;
        }

        Ok(())
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(|| {
            PassgenError::DatabaseError("Database not open".to_string())
        })
    }

    /// Read the properties row
    pub fn properties(&self) -> Result<PGProperties> {
        let raw = queries::get_properties(self.connection()?)?.ok_or_else(|| {
            PassgenError::DatabaseError("Missing properties row".to_string())
        })?;

        Ok(PGProperties {
            database_id: raw.database_id,
            version: raw.version.unwrap_or_else(|| "1".to_string()),
            create_timestamp: raw.create_timestamp.as_deref().and_then(queries::parse_timestamp),
            update_timestamp: raw.update_timestamp.as_deref().and_then(queries::parse_timestamp),
        })
    }

    /// Get the database path
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close the database connection
    pub fn close(&mut self) {
        self.conn = None;
    }

    /// Check if database is open
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::create(&db_path).unwrap();
        let id = queries::get_database_id(db.connection().unwrap()).unwrap();
        assert_eq!(id.as_deref().map(str::len), Some(32));
        drop(db);

        let db = Database::open(&db_path).unwrap();
        assert_eq!(queries::get_database_id(db.connection().unwrap()).unwrap(), id);
        assert_eq!(db.path(), Some(db_path.as_path()));
    }

    #[test]
    fn test_properties() {
        let db = Database::in_memory().unwrap();
        let props = db.properties().unwrap();
        assert_eq!(props.database_id.len(), 32);
        assert_eq!(props.version, crate::DB_VERSION);
        assert!(props.create_timestamp.is_some());
    }

    fn write_v1_file(path: &Path) {
        let conn = Connection::open(path).unwrap();
        conn.execute(schema::CREATE_PROPERTIES_TABLE, []).unwrap();
        conn.execute(schema::CREATE_HISTORY_TABLE, []).unwrap();
        conn.execute(
            "INSERT INTO passgen_properties (database_id, version) VALUES ('legacy', '1')",
            [],
        )
        .unwrap();
    }

    fn history_index_exists(conn: &Connection) -> bool {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master
                 WHERE type = 'index' AND name = 'passgen_history_created'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn test_open_upgrades_v1_file() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("legacy.db");
        write_v1_file(&db_path);

        let db = Database::open(&db_path).unwrap();
        let conn = db.connection().unwrap();
        assert_eq!(migrations::get_database_version(conn).unwrap(), "2");
        assert!(history_index_exists(conn));
        assert_eq!(db.properties().unwrap().database_id, "legacy");
        drop(db);

        // Upgrade is persisted
        let db = Database::open(&db_path).unwrap();
        assert_eq!(db.properties().unwrap().version, "2");
    }

    #[test]
    fn test_open_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = Database::open(&temp_dir.path().join("missing.db"));
        assert!(matches!(result, Err(PassgenError::DatabaseNotFound(_))));
    }

    #[test]
    fn test_open_rejects_newer_version() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::create(&db_path).unwrap();
        migrations::set_database_version(db.connection().unwrap(), "99").unwrap();
        drop(db);

        let result = Database::open(&db_path);
        assert!(matches!(result, Err(PassgenError::InvalidVersion(v)) if v == "99"));
    }

    #[test]
    fn test_close() {
        let mut db = Database::in_memory().unwrap();
        assert!(db.is_open());
        assert!(db.path().is_none());

        db.close();
        assert!(!db.is_open());
        assert!(db.connection().is_err());
        assert!(db.properties().is_err());
    }
}
