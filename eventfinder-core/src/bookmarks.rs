//! Saved events.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{FinderError, FinderResult};
use crate::event::Event;
use crate::reminders::Reminders;
use crate::store::{KeyValueStore, SAVED_EVENT_PREFIX, ids_with_prefix, keys_with_prefix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkToggle {
    Saved,
    Removed,
}

/// Bookmarked events, each stored as JSON under `@event_<id>`.
#[derive(Clone)]
pub struct Bookmarks {
    store: Arc<dyn KeyValueStore>,
}

fn bookmark_key(event_id: &str) -> String {
    format!("{SAVED_EVENT_PREFIX}{event_id}")
}

impl Bookmarks {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Bookmarks { store }
    }

    pub fn saved_ids(&self) -> FinderResult<HashSet<String>> {
        ids_with_prefix(self.store.as_ref(), SAVED_EVENT_PREFIX)
    }

    pub fn is_saved(&self, event_id: &str) -> FinderResult<bool> {
        Ok(self.store.get(&bookmark_key(event_id))?.is_some())
    }

    pub fn save(&self, event: &Event) -> FinderResult<()> {
        let json = serde_json::to_string(event)?;
        self.store.set(&bookmark_key(&event.id), &json)
    }

    /// Save the event, or remove it if it is already saved.
    pub fn toggle(&self, event: &Event) -> FinderResult<BookmarkToggle> {
        if self.is_saved(&event.id)? {
            self.store.remove(&bookmark_key(&event.id))?;
            tracing::info!(event_id = event.id.as_str(), "event removed from saved events");
            Ok(BookmarkToggle::Removed)
        } else {
            self.save(event)?;
            tracing::info!(event_id = event.id.as_str(), "event saved");
            Ok(BookmarkToggle::Saved)
        }
    }

    pub fn get(&self, event_id: &str) -> FinderResult<Option<Event>> {
        self.store
            .get(&bookmark_key(event_id))?
            .map(|json| serde_json::from_str(&json).map_err(FinderError::from))
            .transpose()
    }

    /// All saved events, ordered by key.
    pub fn list(&self) -> FinderResult<Vec<Event>> {
        let keys = keys_with_prefix(self.store.as_ref(), SAVED_EVENT_PREFIX)?;

        self.store
            .multi_get(&keys)?
            .into_iter()
            .map(|(key, json)| {
                serde_json::from_str(&json).map_err(|e| {
                    FinderError::Serialization(format!("Saved event '{key}' is unreadable: {e}"))
                })
            })
            .collect()
    }

    /// Delete a saved event together with its reminder. Returns whether the
    /// event was saved.
    pub fn delete(&self, event_id: &str, reminders: &Reminders) -> FinderResult<bool> {
        reminders.cancel(event_id)?;

        if !self.is_saved(event_id)? {
            return Ok(false);
        }

        self.store.remove(&bookmark_key(event_id))?;
        tracing::info!(event_id, "saved event deleted");
        Ok(true)
    }
}
