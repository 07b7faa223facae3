use anyhow::Result;
use owo_colors::OwoColorize;

use crate::app::App;

pub fn run(app: &App, id: &str) -> Result<()> {
    let reminders = app.reminders();

    if !app.bookmarks().delete(id, &reminders)? {
        anyhow::bail!("Event '{}' is not in your saved events", id);
    }

    println!("{}", format!("Deleted saved event {id}").red());
    Ok(())
}
