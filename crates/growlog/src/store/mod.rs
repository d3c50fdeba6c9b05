//! Storage layer for growlog.
//!
//! This module provides `SQLite`-backed persistence in two layers. The
//! bottom layer, [`KvStore`], is a plain string key-value table: each
//! logical key holds one JSON blob and the timestamp of its last write.
//! On top of it, [`RecordStore`] keeps the canonical in-memory list of
//! growth records and rewrites the full list blob on every mutation, so
//! the stored value is always a complete snapshot.
//!
//! A write failure never leaves memory ahead of durable state: mutations
//! persist the candidate list first and only then commit it in memory.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{ChildReference, NutritionRecord};

/// Key under which the full record list is stored.
pub const RECORDS_KEY: &str = "child_data";

/// Key under which the child roster is stored.
///
/// The roster is written by account management elsewhere; this crate only
/// ever reads it.
pub const ROSTER_KEY: &str = "user_data";

/// The full ordered list of saved records, as stored and loaded.
pub type RecordList = Vec<NutritionRecord>;

/// Key-value storage engine backed by `SQLite`.
///
/// One row per key. Values are opaque strings here; the interpretation
/// (JSON record list, JSON roster) belongs to the callers.
#[derive(Debug)]
pub struct KvStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl KvStore {
    /// Open or create a key-value database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        // Initialize schema
        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let result = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(result)
    }

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the write fails.
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![key, value, updated_at],
            )
            .map_err(|source| Error::persist(key, source))?;

        debug!("Wrote {} byte(s) under '{}'", value.len(), key);
        Ok(())
    }

    /// Timestamp of the last successful write under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let stored: Option<String> = self
            .conn
            .query_row("SELECT updated_at FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(stored
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }

    /// Direct access to the underlying connection, for failure-injection
    /// in tests.
    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// The canonical record list plus its durable backing.
///
/// All reads during a session come from the in-memory list; every
/// mutation rewrites the full list under [`RECORDS_KEY`] before the
/// in-memory list is updated.
#[derive(Debug)]
pub struct RecordStore {
    kv: KvStore,
    records: RecordList,
}

impl RecordStore {
    /// Create a record store over the given key-value store.
    ///
    /// The list starts empty; call [`load`](Self::load) to populate it
    /// from storage.
    #[must_use]
    pub fn new(kv: KvStore) -> Self {
        Self {
            kv,
            records: RecordList::new(),
        }
    }

    /// Load the stored record list into memory.
    ///
    /// A missing key means nothing has been saved yet and yields an empty
    /// list. Returns the number of records loaded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if a stored value exists but does not
    /// parse as a record list; the in-memory list is left untouched so
    /// a later successful save simply replaces the bad value.
    pub fn load(&mut self) -> Result<usize> {
        match self.kv.get(RECORDS_KEY)? {
            Some(json) => {
                let records: RecordList = serde_json::from_str(&json)
                    .map_err(|source| Error::decode(RECORDS_KEY, source))?;
                let count = records.len();
                self.records = records;
                debug!("Loaded {} record(s) from '{}'", count, RECORDS_KEY);
                Ok(count)
            }
            None => {
                self.records.clear();
                Ok(0)
            }
        }
    }

    /// The current record list, in storage order.
    #[must_use]
    pub fn records(&self) -> &[NutritionRecord] {
        &self.records
    }

    /// Insert or replace a record.
    ///
    /// With `target` of `Some(i)` and `i` in bounds, the record at `i` is
    /// replaced. Any other target (including one past the end, for example
    /// after another edit shrank the list) appends. Returns the index the
    /// record now occupies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the write fails; the in-memory list
    /// is left unchanged in that case.
    pub fn upsert(&mut self, record: NutritionRecord, target: Option<usize>) -> Result<usize> {
        let mut next = self.records.clone();
        let index = match target {
            Some(i) if i < next.len() => {
                next[i] = record;
                i
            }
            _ => {
                next.push(record);
                next.len() - 1
            }
        };

        self.persist(&next)?;
        self.records = next;
        debug!("Saved record at index {}", index);
        Ok(index)
    }

    /// Delete the record at `index`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is past the end;
    /// neither memory nor storage is touched in that case. Returns
    /// [`Error::Persist`] if the write fails, leaving the in-memory
    /// list unchanged.
    pub fn delete(&mut self, index: usize) -> Result<NutritionRecord> {
        if index >= self.records.len() {
            return Err(Error::index_out_of_range(index, self.records.len()));
        }

        let mut next = self.records.clone();
        let removed = next.remove(index);

        self.persist(&next)?;
        self.records = next;
        debug!("Deleted record at index {}", index);
        Ok(removed)
    }

    /// Write the given list as the new stored snapshot.
    fn persist(&self, records: &[NutritionRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.kv.put(RECORDS_KEY, &json)
    }

    /// Access the underlying key-value store.
    #[must_use]
    pub fn kv(&self) -> &KvStore {
        &self.kv
    }

    /// Get statistics about the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StoreStats> {
        let children = load_children(&self.kv).len();
        let last_saved = self.kv.updated_at(RECORDS_KEY)?;

        // Get database file size
        let db_size_bytes = if self.kv.path().to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(self.kv.path()).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStats {
            records: self.records.len(),
            children,
            last_saved,
            db_size_bytes,
        })
    }
}

/// Read the child roster.
///
/// The roster is best-effort input from another part of the system, so
/// every failure mode (missing key, unreadable database, undecodable
/// value) degrades to an empty list rather than an error.
#[must_use]
pub fn load_children(kv: &KvStore) -> Vec<ChildReference> {
    match kv.get(ROSTER_KEY) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(children) => children,
            Err(err) => {
                debug!("Roster under '{}' did not decode: {}", ROSTER_KEY, err);
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            debug!("Roster read failed: {}", err);
            Vec::new()
        }
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of records in the current list.
    pub records: usize,
    /// Number of children in the roster.
    pub children: usize,
    /// Timestamp of the last successful record save.
    pub last_saved: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
