mod errors;
pub mod in_memory;
mod record;
pub mod remote;
mod traits;

use crate::configuration::{StoreSettings, StoreType};
use crate::errors::Error;
use in_memory::InMemoryStore;
use remote::RemoteStore;

pub use errors::StoreError;
pub use record::{ContactRequest, StoredRecord, SubmissionRecord, SOURCE};
pub use traits::ExternalText;

#[derive(Debug)]
pub enum Store {
    InMemory(InMemoryStore),
    Remote(RemoteStore),
}

impl Store {
    /// Builds the store once at startup. Fails when the settings are incomplete.
    pub fn try_from(settings: &StoreSettings) -> Result<Self, Error> {
        settings.check_if_valid()?;
        match settings.store_type {
            StoreType::InMemory => Ok(Self::InMemory(InMemoryStore::init())),
            StoreType::Remote => {
                let url = settings.url_unchecked()?;
                let store =
                    RemoteStore::init(&url, &settings.service_key_unchecked(), &settings.collection)?;
                Ok(Self::Remote(store))
            }
        }
    }

    pub async fn insert(&self, record: SubmissionRecord) -> Result<(), StoreError> {
        match self {
            Store::InMemory(store) => store.insert(record),
            Store::Remote(store) => store.insert(record).await,
        }
    }
}
