//! Reminders for saved events.
//!
//! At most one reminder per event. The scheduler's notification id is kept
//! under `@notification_<event id>` so it can be cancelled later.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{FinderError, FinderResult};
use crate::event::Event;
use crate::scheduler::{NotificationContent, NotificationScheduler};
use crate::store::{KeyValueStore, NOTIFICATION_PREFIX, ids_with_prefix};

pub const REMINDER_TITLE: &str = "Event Reminder";

#[derive(Debug, Clone, PartialEq)]
pub enum ReminderToggle {
    /// A reminder was scheduled with this notification id.
    Scheduled(String),
    Cancelled,
}

#[derive(Clone)]
pub struct Reminders {
    store: Arc<dyn KeyValueStore>,
    scheduler: Arc<dyn NotificationScheduler>,
}

fn reminder_key(event_id: &str) -> String {
    format!("{NOTIFICATION_PREFIX}{event_id}")
}

impl Reminders {
    pub fn new(store: Arc<dyn KeyValueStore>, scheduler: Arc<dyn NotificationScheduler>) -> Self {
        Reminders { store, scheduler }
    }

    /// Ids of events with an active reminder.
    pub fn reminder_ids(&self) -> FinderResult<HashSet<String>> {
        ids_with_prefix(self.store.as_ref(), NOTIFICATION_PREFIX)
    }

    pub fn has_reminder(&self, event_id: &str) -> FinderResult<bool> {
        Ok(self.store.get(&reminder_key(event_id))?.is_some())
    }

    /// Cancel the event's reminder if it has one, otherwise schedule one at
    /// the event's start time.
    pub fn toggle(&self, event: &Event) -> FinderResult<ReminderToggle> {
        if self.cancel(&event.id)? {
            return Ok(ReminderToggle::Cancelled);
        }

        let trigger = event.start_date_time()?;
        let content = NotificationContent {
            title: REMINDER_TITLE.to_string(),
            body: format!("Don't forget the event: {} today!", event.name),
        };

        let notification_id = self.scheduler.schedule(content, trigger)?;
        if let Err(e) = self.store.set(&reminder_key(&event.id), &notification_id) {
            // Without the key nothing could ever cancel this notification.
            if let Err(cancel_err) = self.scheduler.cancel(&notification_id) {
                tracing::warn!(
                    event_id = event.id.as_str(),
                    notification_id = notification_id.as_str(),
                    error = %cancel_err,
                    "could not withdraw orphaned reminder"
                );
            }
            return Err(e);
        }

        tracing::info!(event_id = event.id.as_str(), %trigger, "reminder scheduled");
        Ok(ReminderToggle::Scheduled(notification_id))
    }

    /// Cancel the event's reminder. Returns whether there was one.
    pub fn cancel(&self, event_id: &str) -> FinderResult<bool> {
        let key = reminder_key(event_id);
        let Some(notification_id) = self.store.get(&key)? else {
            return Ok(false);
        };

        self.scheduler.cancel(&notification_id).map_err(|e| {
            FinderError::Scheduler(format!("Could not cancel reminder for {event_id}: {e}"))
        })?;
        self.store.remove(&key)?;

        tracing::info!(event_id, "reminder cancelled");
        Ok(true)
    }
}
