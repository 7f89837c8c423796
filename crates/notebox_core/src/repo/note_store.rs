//! Note collection persistence contracts and implementations.
//!
//! # Responsibility
//! - Read and write the whole note collection as one JSON blob under one key.
//! - Keep blob encoding and backend details out of the service layer.
//!
//! # Invariants
//! - `load()` never fails: missing, unreadable or malformed blobs yield an
//!   empty collection.
//! - `save()` overwrites the blob entirely (last writer wins).
//! - Records are never dropped: notes breaking timestamp order are kept and
//!   reported in the log, on both read and write paths.

use crate::db::DbError;
use crate::model::note::Note;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized collection.
pub const STORAGE_KEY: &str = "notes-app-v1";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for note blob reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialization(serde_json::Error),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to encode note collection: {err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Persistence adapter for the full note collection.
///
/// Implementors only provide raw blob access; decoding and encoding are
/// shared by the provided `load`/`save` methods.
pub trait NoteStore {
    /// Key the collection blob is stored under.
    fn storage_key(&self) -> &str;
    /// Reads the raw blob, `None` when nothing was stored yet.
    fn read_blob(&self) -> RepoResult<Option<String>>;
    /// Replaces the raw blob.
    fn write_blob(&self, blob: &str) -> RepoResult<()>;

    /// Loads the collection in persisted order.
    ///
    /// Falls back to an empty collection when the blob is absent, unreadable
    /// or malformed. Individual records that break note invariants are
    /// kept as stored.
    fn load(&self) -> Vec<Note> {
        let blob = match self.read_blob() {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(
                    "event=notes_load module=repo status=error key={} error_code=read_failed error={}",
                    self.storage_key(),
                    err
                );
                return Vec::new();
            }
        };

        let notes = decode_collection(&blob, self.storage_key());
        debug!(
            "event=notes_load module=repo status=ok key={} count={}",
            self.storage_key(),
            notes.len()
        );
        notes
    }

    /// Serializes and overwrites the stored collection.
    fn save(&self, notes: &[Note]) -> RepoResult<()> {
        warn_skewed(notes, "notes_save", self.storage_key());
        let blob = serde_json::to_string(notes)?;
        self.write_blob(&blob)?;
        debug!(
            "event=notes_save module=repo status=ok key={} count={} bytes={}",
            self.storage_key(),
            notes.len(),
            blob.len()
        );
        Ok(())
    }
}

fn decode_collection(blob: &str, key: &str) -> Vec<Note> {
    let decoded: Vec<Note> = match serde_json::from_str(blob) {
        Ok(notes) => notes,
        Err(err) => {
            warn!(
                "event=notes_load module=repo status=degraded key={key} error_code=malformed_blob error={err}"
            );
            return Vec::new();
        }
    };

    warn_skewed(&decoded, "notes_load", key);
    decoded
}

fn warn_skewed(notes: &[Note], event: &str, key: &str) {
    let skewed = notes
        .iter()
        .filter(|note| note.validate().is_err())
        .count();
    if skewed > 0 {
        warn!(
            "event={event} module=repo status=degraded key={key} error_code=updated_before_created count={skewed}"
        );
    }
}

/// SQLite-backed store keeping the blob in the `kv_store` table.
pub struct SqliteNoteStore<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteNoteStore<'conn> {
    /// Constructs a store over a migrated connection using [`STORAGE_KEY`].
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Self::with_key(conn, STORAGE_KEY)
    }

    /// Constructs a store over a migrated connection using a custom key.
    pub fn with_key(conn: &'conn Connection, key: impl Into<String>) -> RepoResult<Self> {
        if !table_exists(conn, "kv_store")? {
            return Err(RepoError::MissingRequiredTable("kv_store"));
        }
        Ok(Self {
            conn,
            key: key.into(),
        })
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn storage_key(&self) -> &str {
        &self.key
    }

    fn read_blob(&self) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_blob(&self, blob: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key.as_str(), blob],
        )?;
        Ok(())
    }
}

/// Process-local store, used for tests and throwaway sessions.
#[derive(Debug)]
pub struct MemoryNoteStore {
    key: String,
    blob: RefCell<Option<String>>,
}

impl MemoryNoteStore {
    /// Creates an empty store using [`STORAGE_KEY`].
    pub fn new() -> Self {
        Self {
            key: STORAGE_KEY.to_string(),
            blob: RefCell::new(None),
        }
    }

    /// Creates a store pre-seeded with a raw blob, valid or not.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let store = Self::new();
        store.blob.replace(Some(blob.into()));
        store
    }

    /// Returns the raw blob currently stored.
    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl Default for MemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore for MemoryNoteStore {
    fn storage_key(&self) -> &str {
        &self.key
    }

    fn read_blob(&self) -> RepoResult<Option<String>> {
        Ok(self.blob.borrow().clone())
    }

    fn write_blob(&self, blob: &str) -> RepoResult<()> {
        self.blob.replace(Some(blob.to_string()));
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
