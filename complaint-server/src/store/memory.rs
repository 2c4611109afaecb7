//! In-memory complaint slot

use parking_lot::Mutex;
use shared::models::Complaint;

use super::{ComplaintRepository, StorageResult};

/// Complaint storage held in process memory
///
/// A mutex around the collection gives `transact` the same exclusivity as a
/// redb write transaction.
#[derive(Debug, Default)]
pub struct MemoryComplaintStore {
    items: Mutex<Vec<Complaint>>,
}

impl MemoryComplaintStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_complaints(items: Vec<Complaint>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }
}

impl ComplaintRepository for MemoryComplaintStore {
    fn load(&self) -> Vec<Complaint> {
        self.items.lock().clone()
    }

    fn save(&self, complaints: &[Complaint]) -> StorageResult<()> {
        *self.items.lock() = complaints.to_vec();
        Ok(())
    }

    fn transact(&self, f: &mut dyn FnMut(&mut Vec<Complaint>) -> bool) -> StorageResult<()> {
        let mut guard = self.items.lock();
        let mut working = guard.clone();
        if f(&mut working) {
            *guard = working;
        }
        Ok(())
    }
}
