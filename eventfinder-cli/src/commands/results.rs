use anyhow::Result;
use eventfinder_core::search_state::SearchState;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::{render_search_row, render_search_status};

pub fn run(app: &App) -> Result<()> {
    let state = app.search_state()?.current();
    print_state(app, &state)
}

/// Print the search results with bookmark markers.
pub fn print_state(app: &App, state: &SearchState) -> Result<()> {
    if let Some(status) = render_search_status(state) {
        println!("{}", status.dimmed());
        return Ok(());
    }

    let saved = app.bookmarks().saved_ids()?;
    for event in state.events() {
        println!("{}", render_search_row(event, saved.contains(&event.id)));
    }

    Ok(())
}
