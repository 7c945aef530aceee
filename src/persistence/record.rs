use std::collections::BTreeMap;

use chrono::Local;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::utils::error::PersistError;

/// Field the persistence adapter stamps onto every record.
pub const DATE_FIELD: &str = "date";

/// Format of the `date` field, local wall clock with microseconds.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A submitted form, one string value per field name.
///
/// Stored as a flat JSON object, so the document in the store has exactly
/// the submitted fields plus `date`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct MessageRecord(BTreeMap<String, String>);

impl MessageRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a url-encoded payload such as `name=Alice&message=Hi+there`.
    ///
    /// Pairs are split on `&`, then on the first `=`; keys and values are
    /// percent and `+` decoded. A later duplicate key overwrites an earlier
    /// one. An empty segment or a segment without `=` is rejected, as is a
    /// payload that is not UTF-8.
    pub fn from_urlencoded(payload: &[u8]) -> Result<Self, PersistError> {
        let text = std::str::from_utf8(payload)
            .map_err(|e| PersistError::Parse(format!("payload is not utf-8: {e}")))?;

        let mut record = Self::new();
        for segment in text.split('&') {
            if !segment.contains('=') {
                return Err(PersistError::Parse(format!(
                    "field '{segment}' has no '=' separator"
                )));
            }
            // a single segment always yields exactly one decoded pair
            for (key, value) in form_urlencoded::parse(segment.as_bytes()) {
                record.insert(key.into_owned(), value.into_owned());
            }
        }
        Ok(record)
    }

    /// Re-encodes the record as a url-encoded form, fields in key order.
    pub fn to_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }

    /// Sets `date` to the current local time, replacing any submitted value.
    pub fn stamp(&mut self) {
        self.insert(DATE_FIELD.to_string(), timestamp());
    }

    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.0.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Current local time rendered with [`DATE_FORMAT`].
pub fn timestamp() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}
