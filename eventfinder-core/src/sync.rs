//! Bridge searches made by other processes into a [`SearchStateChannel`].
//!
//! `eventfinder search` and `eventfinder map --watch` run as separate
//! processes, so the map view can't be handed the new state directly. A
//! [`StoreWatcher`] re-reads the store on a fixed interval and republishes
//! into the channel only when the state actually changed; views just
//! subscribe to the channel.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::search_state::SearchStateChannel;

/// A running watcher. Stop it with [`StoreWatcher::stop`]; dropping the
/// handle also cancels the task, so a watcher never outlives its owner.
pub struct StoreWatcher {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl StoreWatcher {
    /// Start polling. Must be called from within a tokio runtime.
    pub fn spawn(channel: SearchStateChannel, interval: Duration) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            debug!(interval = %humantime::format_duration(interval), "store watcher started");

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => match channel.refresh() {
                        Ok(true) => debug!("search state changed"),
                        Ok(false) => {}
                        Err(e) => warn!(error = %e, "failed to read search state"),
                    },
                }
            }

            debug!("store watcher stopped");
        });

        StoreWatcher {
            token,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the watcher and wait for its task to exit.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for StoreWatcher {
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
