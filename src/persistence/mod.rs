//! The `persistence` module stores submitted forms as documents.
//!
//! A [`DocumentStore`] is anything that can insert a record into a named
//! collection and list a collection back. `sled` provides the durable
//! implementation; [`MemoryStore`] keeps everything in process.
//! [`Persistence`] sits on top and turns raw url-encoded payloads into
//! timestamped records.

pub mod adapter;
pub mod memory;
pub mod record;
pub mod sled_store;

pub use adapter::Persistence;
pub use memory::MemoryStore;
pub use record::MessageRecord;
pub use sled_store::SledStore;

use crate::utils::error::PersistError;

pub trait DocumentStore: Send + Sync {
    /// Inserts `record` as a new document in `collection`.
    fn insert_one(&self, collection: &str, record: &MessageRecord) -> Result<(), PersistError>;

    /// Every document in `collection` in insertion order. An unknown
    /// collection is empty.
    fn find_all(&self, collection: &str) -> Result<Vec<MessageRecord>, PersistError>;
}
