//! redb-backed write-through storage for sessions and checks
//!
//! # Tables
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `checks` | `check_id` | JSON `Check` |
//! | `sessions` | `session_id` | JSON `Session` |
//!
//! Every mutation commits the check and, when it changed, its session in a
//! single write transaction. redb commits with `Durability::Immediate`, so a
//! returned `Ok` means the record survives a restart.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::models::{Check, Session};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// key = check_id, value = JSON-serialized Check
const CHECKS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("checks");

/// key = session_id, value = JSON-serialized Session
const SESSIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("sessions");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A session together with its check, as restored on startup
#[derive(Debug, Clone)]
pub struct StoredSession {
    pub session: Session,
    pub check: Check,
}

#[derive(Clone)]
pub struct PosStorage {
    db: Arc<Database>,
    /// Shared by clones, so a test can break writes under a running store
    #[cfg(test)]
    fail_writes: Arc<std::sync::atomic::AtomicBool>,
}

impl PosStorage {
    /// Open or create the database at the given path, creating parent dirs
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests and `POS_IN_MEMORY`)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CHECKS_TABLE)?;
            let _ = write_txn.open_table(SESSIONS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self {
            db: Arc::new(db),
            #[cfg(test)]
            fail_writes: Default::default(),
        })
    }

    /// Make every following `save` fail with an I/O error
    #[cfg(test)]
    pub(crate) fn set_fail_writes(&self, fail: bool) {
        self.fail_writes
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    // ========== Writes ==========

    /// Persist a check, and optionally its session, atomically
    pub fn save(&self, check: &Check, session: Option<&Session>) -> StorageResult<()> {
        #[cfg(test)]
        if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::other("write failed")));
        }
        let txn = self.db.begin_write()?;
        Self::put_check(&txn, check)?;
        if let Some(session) = session {
            Self::put_session(&txn, session)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn put_check(txn: &WriteTransaction, check: &Check) -> StorageResult<()> {
        let mut table = txn.open_table(CHECKS_TABLE)?;
        let value = serde_json::to_vec(check)?;
        table.insert(check.id.as_str(), value.as_slice())?;
        Ok(())
    }

    fn put_session(txn: &WriteTransaction, session: &Session) -> StorageResult<()> {
        let mut table = txn.open_table(SESSIONS_TABLE)?;
        let value = serde_json::to_vec(session)?;
        table.insert(session.id.as_str(), value.as_slice())?;
        Ok(())
    }

    // ========== Reads ==========

    pub fn get_check(&self, check_id: &str) -> StorageResult<Option<Check>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CHECKS_TABLE)?;
        match table.get(check_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_session(&self, session_id: &str) -> StorageResult<Option<Session>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SESSIONS_TABLE)?;
        match table.get(session_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Load every non-closed session that still has its check
    ///
    /// Ordered by `opened_at`. Sessions whose check record is missing are
    /// skipped.
    pub fn load_active(&self) -> StorageResult<Vec<StoredSession>> {
        let read_txn = self.db.begin_read()?;
        let sessions = read_txn.open_table(SESSIONS_TABLE)?;
        let checks = read_txn.open_table(CHECKS_TABLE)?;

        let mut restored = Vec::new();
        for result in sessions.iter()? {
            let (_key, value) = result?;
            let session: Session = serde_json::from_slice(value.value())?;
            if !session.is_active() {
                continue;
            }
            match checks.get(session.check_id.as_str())? {
                Some(raw) => {
                    let check: Check = serde_json::from_slice(raw.value())?;
                    restored.push(StoredSession { session, check });
                }
                None => {
                    tracing::warn!(
                        session_id = %session.id,
                        check_id = %session.check_id,
                        "Active session has no stored check, skipping"
                    );
                }
            }
        }

        restored.sort_by_key(|s| s.session.opened_at);
        Ok(restored)
    }
}
