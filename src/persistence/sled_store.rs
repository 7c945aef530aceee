//! Document store backed by `sled`
//!
//! Each collection is a sled tree. Document keys are prefixed with a
//! microsecond timestamp so iteration yields documents in receipt order; a
//! uuid suffix keeps two documents stored in the same microsecond apart.

use chrono::Utc;
use sled::Db;
use uuid::Uuid;

use super::{DocumentStore, MessageRecord};
use crate::utils::error::PersistError;

#[derive(Clone)]
pub struct SledStore {
    db: Db,
}

impl SledStore {
    /// Open or create a sled database at `path`.
    pub fn open(path: &str) -> Result<Self, PersistError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }
}

impl DocumentStore for SledStore {
    fn insert_one(&self, collection: &str, record: &MessageRecord) -> Result<(), PersistError> {
        let serialized = serde_json::to_vec(record)?;
        let tree = self.db.open_tree(collection)?;

        let key = format!("{:020}_{}", Utc::now().timestamp_micros(), Uuid::new_v4());
        tree.insert(key.as_bytes(), serialized)?;
        tree.flush()?;
        Ok(())
    }

    fn find_all(&self, collection: &str) -> Result<Vec<MessageRecord>, PersistError> {
        let tree = self.db.open_tree(collection)?;

        let mut records = Vec::with_capacity(tree.len());
        for entry in tree.iter() {
            let (_, value) = entry?;
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }
}

impl std::fmt::Debug for SledStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledStore")
            .field("db", &"sled::Db")
            .finish()
    }
}
