use anyhow::Result;
use eventfinder_core::bookmarks::BookmarkToggle;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::Render;

pub fn run(app: &App, id: &str) -> Result<()> {
    let event = app.find_event(id)?;

    match app.bookmarks().toggle(&event)? {
        BookmarkToggle::Saved => {
            println!("{} {}", "★ Saved".yellow(), event.render());
        }
        BookmarkToggle::Removed => {
            println!("{} {}", "☆ Removed".dimmed(), event.render());
        }
    }

    Ok(())
}
