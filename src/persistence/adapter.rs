use std::sync::Arc;

use tracing::info;

use super::{DocumentStore, MessageRecord};
use crate::utils::error::PersistError;

/// Turns raw form payloads into stored documents.
///
/// Holds the store handle and the collection every record goes to. Cloning
/// shares the underlying store.
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl Persistence {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Parses `payload`, stamps it with the receipt time and inserts it as a
    /// new document. Returns the record as stored.
    pub fn save_message(&self, payload: &[u8]) -> Result<MessageRecord, PersistError> {
        let mut record = MessageRecord::from_urlencoded(payload)?;
        record.stamp();

        info!("Data to be written to db: {:?}", record);
        self.store.insert_one(&self.collection, &record)?;
        Ok(record)
    }

    /// All documents in the configured collection, oldest first.
    pub fn load_messages(&self) -> Result<Vec<MessageRecord>, PersistError> {
        self.store.find_all(&self.collection)
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("collection", &self.collection)
            .finish()
    }
}
