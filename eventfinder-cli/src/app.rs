use std::sync::Arc;

use anyhow::{Context, Result};
use eventfinder_core::bookmarks::Bookmarks;
use eventfinder_core::config::FinderConfig;
use eventfinder_core::event::Event;
use eventfinder_core::reminders::Reminders;
use eventfinder_core::scheduler::LocalScheduler;
use eventfinder_core::search_state::SearchStateChannel;
use eventfinder_core::store::{FileStore, KeyValueStore};
use eventfinder_core::ticketmaster::TicketmasterClient;

/// Everything a command needs: config plus the stores under `data_dir`.
pub struct App {
    pub config: FinderConfig,
    store: Arc<dyn KeyValueStore>,
    scheduler: Arc<LocalScheduler>,
}

impl App {
    pub fn load() -> Result<Self> {
        let config = FinderConfig::load()?;

        let store = FileStore::open(config.store_path())
            .with_context(|| format!("Could not open store at {}", config.store_path().display()))?;
        let scheduler = LocalScheduler::open(config.notifications_path())?;
        tracing::debug!(store = %store.path().display(), "opened store");

        Ok(App {
            config,
            store: Arc::new(store),
            scheduler: Arc::new(scheduler),
        })
    }

    pub fn bookmarks(&self) -> Bookmarks {
        Bookmarks::new(self.store.clone())
    }

    pub fn reminders(&self) -> Reminders {
        Reminders::new(self.store.clone(), self.scheduler.clone())
    }

    pub fn search_state(&self) -> Result<SearchStateChannel> {
        Ok(SearchStateChannel::open(self.store.clone())?)
    }

    pub fn client(&self) -> Result<TicketmasterClient> {
        Ok(TicketmasterClient::from_config(&self.config)?)
    }

    /// Look an event up in the latest search results, then in saved events.
    pub fn find_event(&self, id: &str) -> Result<Event> {
        if let Some(event) = self.search_state()?.current().find_event(id) {
            return Ok(event.clone());
        }

        match self.bookmarks().get(id)? {
            Some(event) => Ok(event),
            None => anyhow::bail!(
                "Event '{}' not found in the last search or your saved events",
                id
            ),
        }
    }
}
