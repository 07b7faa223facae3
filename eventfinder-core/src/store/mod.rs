//! Key-value persistence.
//!
//! Everything eventfinder remembers between runs (the last search, saved
//! events, reminder ids) lives in a flat string-to-string store, keyed by
//! the conventions below.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::collections::HashSet;

use crate::error::FinderResult;

/// City of the most recent search.
pub const SEARCHED_CITY_KEY: &str = "searchedCity";
/// JSON array of the events returned by the most recent search.
pub const SEARCHED_EVENTS_KEY: &str = "searchedEvents";
/// Prefix for bookmarked events; followed by the event id, value is the event JSON.
pub const SAVED_EVENT_PREFIX: &str = "@event_";
/// Prefix for reminder ids; followed by the event id, value is the notification id.
pub const NOTIFICATION_PREFIX: &str = "@notification_";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> FinderResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> FinderResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> FinderResult<()>;

    fn all_keys(&self) -> FinderResult<Vec<String>>;

    /// Fetch several keys at once. Missing keys are skipped.
    fn multi_get(&self, keys: &[String]) -> FinderResult<Vec<(String, String)>> {
        let mut pairs = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = self.get(key)? {
                pairs.push((key.clone(), value));
            }
        }
        Ok(pairs)
    }
}

/// All keys starting with `prefix`, sorted.
pub fn keys_with_prefix(store: &dyn KeyValueStore, prefix: &str) -> FinderResult<Vec<String>> {
    let mut keys: Vec<String> = store
        .all_keys()?
        .into_iter()
        .filter(|k| k.starts_with(prefix))
        .collect();
    keys.sort();
    Ok(keys)
}

/// The ids encoded in keys of the form `<prefix><id>`.
pub fn ids_with_prefix(store: &dyn KeyValueStore, prefix: &str) -> FinderResult<HashSet<String>> {
    Ok(keys_with_prefix(store, prefix)?
        .into_iter()
        .filter_map(|k| k.strip_prefix(prefix).map(String::from))
        .collect())
}
