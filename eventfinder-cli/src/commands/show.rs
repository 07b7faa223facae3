use anyhow::Result;

use crate::app::App;
use crate::render::render_details;

pub fn run(app: &App, id: &str) -> Result<()> {
    let event = app.find_event(id)?;

    for line in render_details(&event) {
        println!("{line}");
    }

    Ok(())
}
