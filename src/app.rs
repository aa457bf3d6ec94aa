//! The command loop: draws the session, feeds it key commands and runs the effects it asks for.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, instrument, warn};

use crate::error::FetchError;
use crate::model::fixture::FixtureRecord;
use crate::session::{Command, Effect, Session};
use crate::source::FixtureSource;
use crate::store::Store;
use crate::tui::{self, Tui};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

type RefreshTask = JoinHandle<Result<Vec<FixtureRecord>, FetchError>>;

/// Build the starting session from disk. A file that fails to load counts as empty and the
/// failure is shown in the status line.
#[instrument(level = "info", skip(store), fields(dir = %store.dir().display()))]
pub fn load_session(store: &Store) -> Session {
    let mut problems = Vec::new();
    let fixtures = store.load_fixtures().unwrap_or_else(|e| {
        problems.push(e.to_string());
        Vec::new()
    });
    let filters = store.load_filters().unwrap_or_else(|e| {
        problems.push(e.to_string());
        Vec::new()
    });
    let session = Session::new(fixtures, filters);
    if problems.is_empty() {
        session
    } else {
        warn!(problems = ?problems, "Started with unreadable data files");
        session.with_message(format!("Error: {}", problems.join("; ")))
    }
}

/// Turn a finished fetch into session commands, persisting the new list on success.
pub fn finish_refresh(joined: Result<Result<Vec<FixtureRecord>, FetchError>, JoinError>, store: &Store) -> Vec<Command> {
    let at = Utc::now();
    match joined {
        Ok(Ok(fixtures)) => {
            let save = store.save_fixtures(&fixtures);
            let mut commands = vec![Command::RefreshDone { result: Ok(fixtures), at }];
            if let Err(e) = save {
                commands.push(Command::SaveFailed(e.to_string()));
            }
            commands
        }
        Ok(Err(e)) => {
            error!(error = %e, "Refresh failed");
            vec![Command::RefreshDone { result: Err(e.to_string()), at }]
        }
        Err(e) => {
            let e = FetchError::Join(e.to_string());
            error!(error = %e, "Refresh task did not complete");
            vec![Command::RefreshDone { result: Err(e.to_string()), at }]
        }
    }
}

fn spawn_refresh(source: Arc<dyn FixtureSource>) -> RefreshTask {
    info!(source = %source.describe(), "Starting refresh");
    tokio::task::spawn_blocking(move || source.fetch())
}

pub async fn run(terminal: &mut Tui, mut session: Session, store: Store, source: Arc<dyn FixtureSource>) -> std::io::Result<()> {
    let mut pending: Option<RefreshTask> = None;

    loop {
        terminal.draw(|frame| tui::draw(frame, &session))?;

        if let Some(task) = pending.take_if(|task| task.is_finished()) {
            for command in finish_refresh(task.await, &store) {
                session = session.handle(command).0;
            }
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(command) = tui::command_for(session.view(), key) else {
            continue;
        };

        let (next, effect) = session.handle(command);
        session = next;
        match effect {
            Some(Effect::Refresh) => pending = Some(spawn_refresh(Arc::clone(&source))),
            Some(Effect::Quit) => {
                info!("Quit requested");
                break;
            }
            None => {}
        }
    }

    Ok(())
}
