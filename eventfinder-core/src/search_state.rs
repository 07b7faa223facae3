//! The most recent search, shared between the search and map views.
//!
//! [`SearchStateChannel`] owns the state: publishing persists it to the
//! key-value store and notifies every subscriber through a watch channel.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::FinderResult;
use crate::event::Event;
use crate::store::{KeyValueStore, SEARCHED_CITY_KEY, SEARCHED_EVENTS_KEY};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    /// No search has been run (or it was cleared).
    #[default]
    NeverSearched,
    /// A search ran and the API found nothing.
    NoResults { city: String },
    Results { city: String, events: Vec<Event> },
}

impl SearchState {
    /// Build the state for a finished search.
    pub fn from_search(city: &str, events: Vec<Event>) -> Self {
        if events.is_empty() {
            SearchState::NoResults {
                city: city.to_string(),
            }
        } else {
            SearchState::Results {
                city: city.to_string(),
                events,
            }
        }
    }

    /// Read the persisted state. A missing city or event list means
    /// nothing was searched; an empty list means the search found nothing.
    pub fn load(store: &dyn KeyValueStore) -> FinderResult<Self> {
        let city = store.get(SEARCHED_CITY_KEY)?;
        let events = store.get(SEARCHED_EVENTS_KEY)?;

        let (Some(city), Some(events)) = (city, events) else {
            return Ok(SearchState::NeverSearched);
        };

        let events: Vec<Event> = serde_json::from_str(&events)?;
        Ok(SearchState::from_search(&city, events))
    }

    pub fn persist(&self, store: &dyn KeyValueStore) -> FinderResult<()> {
        match self {
            SearchState::NeverSearched => {
                store.remove(SEARCHED_CITY_KEY)?;
                store.remove(SEARCHED_EVENTS_KEY)?;
            }
            SearchState::NoResults { city } => {
                store.set(SEARCHED_CITY_KEY, city)?;
                store.set(SEARCHED_EVENTS_KEY, "[]")?;
            }
            SearchState::Results { city, events } => {
                store.set(SEARCHED_CITY_KEY, city)?;
                store.set(SEARCHED_EVENTS_KEY, &serde_json::to_string(events)?)?;
            }
        }
        Ok(())
    }

    pub fn city(&self) -> Option<&str> {
        match self {
            SearchState::NeverSearched => None,
            SearchState::NoResults { city } | SearchState::Results { city, .. } => Some(city),
        }
    }

    pub fn events(&self) -> &[Event] {
        match self {
            SearchState::Results { events, .. } => events.as_slice(),
            _ => &[],
        }
    }

    pub fn find_event(&self, id: &str) -> Option<&Event> {
        self.events().iter().find(|e| e.id == id)
    }
}

/// Owner of the current [`SearchState`].
#[derive(Clone)]
pub struct SearchStateChannel {
    store: Arc<dyn KeyValueStore>,
    tx: Arc<watch::Sender<SearchState>>,
}

impl SearchStateChannel {
    /// Open the channel seeded with whatever the store currently holds.
    pub fn open(store: Arc<dyn KeyValueStore>) -> FinderResult<Self> {
        let initial = SearchState::load(&*store)?;
        let (tx, _) = watch::channel(initial);

        Ok(SearchStateChannel {
            store,
            tx: Arc::new(tx),
        })
    }

    pub fn current(&self) -> SearchState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.tx.subscribe()
    }

    /// Persist `state` and notify subscribers if it differs from the current one.
    pub fn publish(&self, state: SearchState) -> FinderResult<()> {
        state.persist(self.store.as_ref())?;
        self.replace(state);
        Ok(())
    }

    pub fn clear(&self) -> FinderResult<()> {
        self.publish(SearchState::NeverSearched)
    }

    /// Re-read the store, picking up searches made by another process.
    /// Returns whether subscribers were notified.
    pub fn refresh(&self) -> FinderResult<bool> {
        let state = SearchState::load(self.store.as_ref())?;
        Ok(self.replace(state))
    }

    fn replace(&self, state: SearchState) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        })
    }
}
