use crate::api::ApiClient;
use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use super::action_queue::{channel, Action};
use super::actions::run_action;
use super::views::handle_view_key;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &ApiClient,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let _ = action_tx.send(Action::LoadActivities);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_loading {
            app.throbber_state.calc_next();
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_view_key(key, app, &action_tx);
                }
            }
        }

        let now = Instant::now();
        app.timer.tick(now);
        app.expire_status(now);

        while let Ok(action) = action_rx.try_recv() {
            tracing::debug!(?action, "Running action");
            app.is_loading = true;
            app.throbber_state.calc_next();
            terminal.draw(|f| ui::render(f, app))?;
            run_action(action, app, client).await;
            app.is_loading = false;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
