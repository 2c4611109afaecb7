//! redb-backed complaint slot
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `complaint_slot` | `"complaints"` | JSON `Vec<Complaint>` | The whole collection |
//!
//! redb serializes write transactions, so `transact` is an exclusive
//! read-modify-write. Commits use the default immediate durability.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::models::Complaint;
use std::path::Path;
use std::sync::Arc;

use super::{ComplaintRepository, StorageResult};

/// File name of the slot database inside `WORK_DIR`
pub const SLOT_FILE: &str = "complaints.redb";

const COMPLAINT_SLOT: TableDefinition<&str, &[u8]> = TableDefinition::new("complaint_slot");

const SLOT_KEY: &str = "complaints";

/// Complaint storage backed by redb
#[derive(Clone)]
pub struct RedbComplaintStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbComplaintStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbComplaintStore").finish_non_exhaustive()
    }
}

impl RedbComplaintStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COMPLAINT_SLOT)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn read_slot(&self) -> StorageResult<Vec<Complaint>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COMPLAINT_SLOT)?;

        match table.get(SLOT_KEY)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the slot with arbitrary bytes
    #[cfg(test)]
    pub(crate) fn write_raw(&self, bytes: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COMPLAINT_SLOT)?;
            table.insert(SLOT_KEY, bytes)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl ComplaintRepository for RedbComplaintStore {
    fn load(&self) -> Vec<Complaint> {
        match self.read_slot() {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "Complaint slot unreadable, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, complaints: &[Complaint]) -> StorageResult<()> {
        let bytes = serde_json::to_vec(complaints)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COMPLAINT_SLOT)?;
            table.insert(SLOT_KEY, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn transact(&self, f: &mut dyn FnMut(&mut Vec<Complaint>) -> bool) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        let changed = {
            let mut table = write_txn.open_table(COMPLAINT_SLOT)?;
            let current = table.get(SLOT_KEY)?.map(|guard| guard.value().to_vec());

            let mut items: Vec<Complaint> = match current {
                Some(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Complaint slot corrupt, mutating from empty");
                    Vec::new()
                }),
                None => Vec::new(),
            };

            let changed = f(&mut items);
            if changed {
                let bytes = serde_json::to_vec(&items)?;
                table.insert(SLOT_KEY, bytes.as_slice())?;
            }
            changed
        };

        if changed {
            write_txn.commit()?;
        } else {
            write_txn.abort()?;
        }
        Ok(())
    }
}
