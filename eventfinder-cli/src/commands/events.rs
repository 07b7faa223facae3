use anyhow::Result;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::render_saved_row;

pub fn run(app: &App) -> Result<()> {
    let events = app.bookmarks().list()?;

    if events.is_empty() {
        println!("{}", "No saved events".dimmed());
        return Ok(());
    }

    let reminders = app.reminders().reminder_ids()?;

    for event in &events {
        println!("{}", render_saved_row(event, reminders.contains(&event.id)));
    }

    Ok(())
}
