use anyhow::Result;
use eventfinder_core::map::MapView;
use eventfinder_core::search_state::SearchState;
use eventfinder_core::sync::StoreWatcher;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::Render;

pub async fn run(app: &App, watch: bool) -> Result<()> {
    let channel = app.search_state()?;

    if !watch {
        print_map(&channel.current());
        return Ok(());
    }

    let mut rx = channel.subscribe();
    let watcher = StoreWatcher::spawn(channel.clone(), app.config.poll_interval());

    print_map(&rx.borrow_and_update().clone());
    println!("{}", "Watching for new searches (Ctrl-C to stop)".dimmed());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                println!();
                print_map(&state);
            }
        }
    }

    watcher.stop().await;
    Ok(())
}

fn print_map(state: &SearchState) {
    match MapView::from_state(state) {
        Ok(view) => println!("{}", view.render()),
        Err(e) => println!("{}", e.to_string().red()),
    }
}
