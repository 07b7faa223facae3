use anyhow::Result;
use owo_colors::OwoColorize;

use crate::app::App;

pub fn run(app: &App) -> Result<()> {
    app.search_state()?.clear()?;
    println!("{}", "Cleared the last search".dimmed());
    Ok(())
}
