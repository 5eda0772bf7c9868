use crate::store::errors::StoreError;
use crate::store::record::{StoredRecord, SubmissionRecord};
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub records: RwLock<Vec<StoredRecord>>,
}

impl InMemoryStore {
    pub fn init() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: SubmissionRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.push(StoredRecord {
            id: Uuid::new_v4(),
            record,
        });
        Ok(())
    }

    pub fn records(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }
}
