use std::collections::HashMap;
use std::sync::Mutex;

use super::{DocumentStore, MessageRecord};
use crate::utils::error::PersistError;

/// In-process document store. Nothing survives a restart; used where a sled
/// directory would only get in the way, such as tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<MessageRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn insert_one(&self, collection: &str, record: &MessageRecord) -> Result<(), PersistError> {
        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        collections
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn find_all(&self, collection: &str) -> Result<Vec<MessageRecord>, PersistError> {
        let collections = self
            .collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }
}
