use anyhow::Result;
use chrono::{Local, Utc};
use eventfinder_core::reminders::ReminderToggle;
use owo_colors::OwoColorize;

use crate::app::App;

pub fn run(app: &App, id: &str) -> Result<()> {
    let Some(event) = app.bookmarks().get(id)? else {
        anyhow::bail!(
            "Event '{}' is not saved.\n\n\
            Save it first with:\n  \
            eventfinder save {}",
            id,
            id
        );
    };

    match app.reminders().toggle(&event)? {
        ReminderToggle::Scheduled(_) => {
            // toggle() only schedules when the start time is known
            let start = event.start_date_time()?;
            println!(
                "⏰ You will be reminded of {} on {}",
                event.name.bold(),
                start.with_timezone(&Local).format("%a %b %-d %H:%M")
            );
            if start <= Utc::now() {
                println!(
                    "{}",
                    "   The event has already started; the reminder fires right away.".yellow()
                );
            }
        }
        ReminderToggle::Cancelled => {
            println!("{} {}", "Reminder removed for".dimmed(), event.name.bold());
        }
    }

    Ok(())
}
