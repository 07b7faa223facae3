//! Shows desktop notifications for eventfinder reminders when they fall due.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use eventfinder_core::config::FinderConfig;
use eventfinder_core::scheduler::{LocalScheduler, ScheduledNotification};
use notify_rust::Notification;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eventfinder-notify")]
#[command(about = "Deliver eventfinder reminders as desktop notifications")]
struct Args {
    /// How often to check for due reminders (e.g. "30s", "2m")
    #[arg(short, long, default_value = "30s", value_parser = humantime::parse_duration)]
    interval: Duration,

    /// Deliver whatever is due and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("EVENTFINDER_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = FinderConfig::load()?;
    let scheduler = LocalScheduler::open(config.notifications_path())?;

    info!(
        schedule = %scheduler.path().display(),
        interval = %humantime::format_duration(args.interval),
        "eventfinder-notify started"
    );

    let mut ticker = tokio::time::interval(args.interval);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                match deliver_due(&scheduler, Utc::now(), show) {
                    Ok(0) => {}
                    Ok(n) => info!(count = n, "delivered reminders"),
                    Err(e) => warn!(error = %e, "failed to check reminders"),
                }
                if args.once {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn show(notification: &ScheduledNotification) -> Result<()> {
    Notification::new()
        .appname("eventfinder")
        .summary(&notification.content.title)
        .body(&notification.content.body)
        .show()
        .with_context(|| format!("Could not show notification {}", notification.id))?;
    Ok(())
}

/// Deliver every notification due at `now`. Failed deliveries stay scheduled
/// and are retried on the next tick.
fn deliver_due(
    scheduler: &LocalScheduler,
    now: DateTime<Utc>,
    mut deliver: impl FnMut(&ScheduledNotification) -> Result<()>,
) -> Result<usize> {
    let mut delivered = 0;

    for notification in scheduler.due(now)? {
        match deliver(&notification) {
            Ok(()) => {
                scheduler.mark_delivered(&notification.id)?;
                delivered += 1;
            }
            Err(e) => warn!(id = notification.id.as_str(), error = %e, "delivery failed"),
        }
    }

    Ok(delivered)
}
