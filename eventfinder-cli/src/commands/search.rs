use anyhow::Result;
use eventfinder_core::search_state::SearchState;
use eventfinder_core::ticketmaster::search_and_publish;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::commands::results;
use crate::utils::tui;

pub async fn run(app: &App, city: &str) -> Result<()> {
    let client = app.client()?;
    let channel = app.search_state()?;

    let spinner = tui::create_spinner(format!("Searching events in {}", city.trim()));
    let result = search_and_publish(&client, &channel, city).await;
    spinner.finish_and_clear();

    let state = result?;
    if let SearchState::Results { city, events } = &state {
        println!(
            "{}",
            format!("Found {} events in {}", events.len(), city).green()
        );
    }

    results::print_state(app, &state)
}
