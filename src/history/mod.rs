//! Password history API
//!
//! An ordered log of generated passwords, newest first, capped at
//! `HISTORY_MAX_ENTRIES`. Stored in a SQLite file inside a folder, or in
//! memory.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::database::queries;
use crate::database::{Database, HistoryEntry, PGProperties};
use crate::error::{PassgenError, Result};
use crate::generator::PasswordOptions;
use crate::utils::{day_bounds, generate_history_id, now};
use crate::{DATABASE_FILENAME, HISTORY_MAX_ENTRIES, HISTORY_RECENT_DEFAULT};

/// Main history interface
#[derive(Debug)]
pub struct PasswordHistory {
    /// Folder holding the database file (`None` in memory)
    folder: Option<PathBuf>,
    /// Database connection
    db: Database,
    /// Maximum number of entries kept
    max_entries: usize,
    /// Cached entries, newest first
    entries_cache: Option<Vec<HistoryEntry>>,
}

impl PasswordHistory {
    /// Open an existing history from a folder
    ///
    /// The folder should contain a `history.db` file.
    pub fn open(folder: &Path) -> Result<Self> {
        let db = Database::open(&folder.join(DATABASE_FILENAME))?;
        Ok(Self::with_database(Some(folder.to_path_buf()), db))
    }

    /// Create a new history in the specified folder
    pub fn create(folder: &Path) -> Result<Self> {
        std::fs::create_dir_all(folder)?;
        let db = Database::create(&folder.join(DATABASE_FILENAME))?;
        Ok(Self::with_database(Some(folder.to_path_buf()), db))
    }

    /// Open the history in `folder`, creating it if missing
    pub fn open_or_create(folder: &Path) -> Result<Self> {
        if folder.join(DATABASE_FILENAME).exists() {
            Self::open(folder)
        } else {
            Self::create(folder)
        }
    }

    /// A history that is never written to disk
    pub fn in_memory() -> Result<Self> {
        Ok(Self::with_database(None, Database::in_memory()?))
    }

    fn with_database(folder: Option<PathBuf>, db: Database) -> Self {
        Self {
            folder,
            db,
            max_entries: HISTORY_MAX_ENTRIES,
            entries_cache: None,
        }
    }

    /// Change the entry cap, pruning immediately if needed.
    ///
    /// The cap must be at least 1.
    pub fn set_max_entries(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(PassgenError::InvalidMaxEntries(max_entries));
        }
        self.max_entries = max_entries;
        self.prune()
    }

    /// Maximum number of entries kept
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Folder holding the database, if on disk
    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    /// Record a generated password as the newest entry
    pub fn add(
        &mut self,
        password: &str,
        length: usize,
        settings: &PasswordOptions,
    ) -> Result<HistoryEntry> {
        let entry = HistoryEntry {
            id: generate_history_id(),
            password: password.to_string(),
            timestamp: now(),
            length,
            settings: *settings,
        };

        queries::insert_history_entry(self.db.connection()?, &entry)?;
        self.prune()?;
        self.clear_cache();

        log::debug!("Added history entry {}", entry.id);
        Ok(entry)
    }

    /// Remove one entry by ID
    pub fn remove(&mut self, id: &str) -> Result<()> {
        if !queries::delete_history_entry(self.db.connection()?, id)? {
            return Err(PassgenError::HistoryEntryNotFound(id.to_string()));
        }
        self.clear_cache();
        Ok(())
    }

    /// Remove every entry
    pub fn clear(&mut self) -> Result<()> {
        let removed = queries::clear_history(self.db.connection()?)?;
        self.clear_cache();
        log::info!("Cleared {} history entries", removed);
        Ok(())
    }

    /// All entries, newest first
    pub fn entries(&mut self) -> Result<Vec<HistoryEntry>> {
        if let Some(ref cache) = self.entries_cache {
            return Ok(cache.clone());
        }

        let entries = queries::get_history_raw(self.db.connection()?, None)?
            .into_iter()
            .map(|raw| raw.into_entry())
            .collect::<Result<Vec<_>>>()?;

        self.entries_cache = Some(entries.clone());
        Ok(entries)
    }

    /// The newest `limit` entries
    pub fn recent(&mut self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.entries()?;
        entries.truncate(limit);
        Ok(entries)
    }

    /// The newest `HISTORY_RECENT_DEFAULT` entries
    pub fn recent_default(&mut self) -> Result<Vec<HistoryEntry>> {
        self.recent(HISTORY_RECENT_DEFAULT)
    }

    /// Entries generated on `date` (UTC), newest first
    pub fn by_date(&self, date: NaiveDate) -> Result<Vec<HistoryEntry>> {
        let (start, end) = day_bounds(date);
        queries::get_history_between(self.db.connection()?, &start, &end)?
            .into_iter()
            .map(|raw| raw.into_entry())
            .collect()
    }

    /// Find one entry by ID
    pub fn get(&mut self, id: &str) -> Result<HistoryEntry> {
        self.entries()?
            .into_iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| PassgenError::HistoryEntryNotFound(id.to_string()))
    }

    /// Number of stored entries
    pub fn len(&self) -> Result<usize> {
        queries::count_history(self.db.connection()?)
    }

    /// True if no entries are stored
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn prune(&mut self) -> Result<()> {
        let removed = queries::prune_history(self.db.connection()?, self.max_entries)?;
        if removed > 0 {
            log::debug!("Pruned {} history entries over the cap of {}", removed, self.max_entries);
            self.clear_cache();
        }
        Ok(())
    }

    fn clear_cache(&mut self) {
        self.entries_cache = None;
    }

    /// Database ID, version and timestamps
    pub fn properties(&self) -> Result<PGProperties> {
        self.db.properties()
    }

    /// Close the underlying database
    pub fn close(&mut self) {
        self.clear_cache();
        self.db.close();
    }
}
