//! Local notification scheduling.
//!
//! Scheduled notifications are written to a JSON file in the data directory.
//! The `eventfinder-notify` daemon reads the same file and shows whatever is
//! due.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FinderError, FinderResult};
use crate::file_lock::{FileLock, write_atomic};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledNotification {
    pub id: String,
    pub content: NotificationContent,
    pub trigger: DateTime<Utc>,
}

pub trait NotificationScheduler: Send + Sync {
    /// Schedule `content` for `trigger`, returning an id for cancellation.
    fn schedule(&self, content: NotificationContent, trigger: DateTime<Utc>)
    -> FinderResult<String>;

    /// Cancel a scheduled notification. Unknown ids (e.g. already delivered)
    /// are ignored.
    fn cancel(&self, id: &str) -> FinderResult<()>;
}

pub struct LocalScheduler {
    path: PathBuf,
}

impl LocalScheduler {
    pub fn open(path: impl Into<PathBuf>) -> FinderResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(LocalScheduler { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All scheduled notifications, soonest first.
    pub fn pending(&self) -> FinderResult<Vec<ScheduledNotification>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut pending: Vec<ScheduledNotification> =
            serde_json::from_str(&content).map_err(|e| {
                FinderError::Scheduler(format!("Corrupt schedule {}: {e}", self.path.display()))
            })?;
        pending.sort_by_key(|n| n.trigger);
        Ok(pending)
    }

    /// Notifications whose trigger time is at or before `now`.
    pub fn due(&self, now: DateTime<Utc>) -> FinderResult<Vec<ScheduledNotification>> {
        Ok(self
            .pending()?
            .into_iter()
            .filter(|n| n.trigger <= now)
            .collect())
    }

    pub fn mark_delivered(&self, id: &str) -> FinderResult<()> {
        self.update(|pending| pending.retain(|n| n.id != id))
    }

    fn update(&self, f: impl FnOnce(&mut Vec<ScheduledNotification>)) -> FinderResult<()> {
        // The notify daemon rewrites this file while the CLI schedules.
        let _lock = FileLock::acquire(&self.path)?;

        let mut pending = self.pending()?;
        f(&mut pending);
        write_atomic(&self.path, &serde_json::to_string_pretty(&pending)?)
    }
}

impl NotificationScheduler for LocalScheduler {
    fn schedule(
        &self,
        content: NotificationContent,
        trigger: DateTime<Utc>,
    ) -> FinderResult<String> {
        let id = Uuid::new_v4().to_string();
        let notification = ScheduledNotification {
            id: id.clone(),
            content,
            trigger,
        };

        self.update(|pending| pending.push(notification))?;
        tracing::debug!(id = id.as_str(), %trigger, "scheduled notification");
        Ok(id)
    }

    fn cancel(&self, id: &str) -> FinderResult<()> {
        tracing::debug!(id, "cancelled notification");
        self.mark_delivered(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn content(title: &str) -> NotificationContent {
        NotificationContent {
            title: title.to_string(),
            body: "body".to_string(),
        }
    }

    #[test]
    fn test_schedule_and_cancel() {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = LocalScheduler::open(dir.path().join("notifications.json")).unwrap();
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();

        let id = scheduler.schedule(content("a"), at).unwrap();
        assert_eq!(scheduler.pending().unwrap().len(), 1);

        scheduler.cancel(&id).unwrap();
        assert!(scheduler.pending().unwrap().is_empty());
    }

    #[test]
    fn test_cancel_unknown_id_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = LocalScheduler::open(dir.path().join("notifications.json")).unwrap();
        scheduler.cancel("does-not-exist").unwrap();
    }

    #[test]
    fn test_due_returns_only_past_triggers() {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = LocalScheduler::open(dir.path().join("notifications.json")).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 14, 12, 0, 0).unwrap();

        scheduler.schedule(content("later"), now + Duration::hours(1)).unwrap();
        scheduler.schedule(content("earlier"), now - Duration::hours(1)).unwrap();
        scheduler.schedule(content("now"), now).unwrap();

        let due: Vec<_> = scheduler
            .due(now)
            .unwrap()
            .into_iter()
            .map(|n| n.content.title)
            .collect();
        assert_eq!(due, vec!["earlier", "now"]);
    }

    #[test]
    fn test_concurrent_schedulers_on_one_file_keep_every_notification() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notifications.json");
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();

        let ids: Vec<String> = std::thread::scope(|s| {
            let workers: Vec<_> = (0..2)
                .map(|_| {
                    let scheduler = LocalScheduler::open(&path).unwrap();
                    s.spawn(move || {
                        (0..50)
                            .map(|i| scheduler.schedule(content(&format!("n{i}")), at).unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            workers
                .into_iter()
                .flat_map(|w| w.join().unwrap())
                .collect()
        });

        let pending = LocalScheduler::open(&path).unwrap().pending().unwrap();
        assert_eq!(ids.len(), 100);
        assert_eq!(pending.len(), 100);
        for id in &ids {
            assert!(pending.iter().any(|n| &n.id == id), "lost notification {id}");
        }
    }

    #[test]
    fn test_schedule_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notifications.json");
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();

        let id = LocalScheduler::open(&path)
            .unwrap()
            .schedule(content("a"), at)
            .unwrap();

        let pending = LocalScheduler::open(&path).unwrap().pending().unwrap();
        assert_eq!(pending[0].id, id);
        assert_eq!(pending[0].trigger, at);
    }
}
