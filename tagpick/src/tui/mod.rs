//! Terminal front end for [`Session`]: crossterm input, ratatui output.

mod keymap;
mod render;

use crate::cli::GlobalArgs;
use anyhow::{Context, Result};
use crossterm::ExecutableCommand;
use crossterm::event::{Event as TerminalEvent, EventStream};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures_util::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tagpick_lib::config::Config;
use tagpick_lib::github::GitHubSource;
use tagpick_lib::jobs::TaskExecutor;
use tagpick_lib::logging::{LOG_FILE_NAME, initialize_file_logging};
use tagpick_lib::session::{Command, Event, Session};
use tagpick_lib::source::ReleaseSource;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(100);

pub async fn run(global_args: GlobalArgs) -> Result<()> {
    let log_path = Config::default_log_dir().join(LOG_FILE_NAME);
    initialize_file_logging(&log_path)?;

    let config = global_args.load_config()?;
    tracing::info!(
        "Starting session for {}/{} (asset {})",
        config.owner,
        config.repo,
        config.asset
    );
    let source = Arc::new(GitHubSource::new()?);

    let mut terminal = setup_terminal().context("Failed to set up the terminal")?;
    let result = event_loop(&mut terminal, Session::new(config), source).await;
    restore_terminal(&mut terminal).context("Failed to restore the terminal")?;
    result
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Applies one event and launches whatever it asks for. Returns `false` once the session quits.
fn dispatch<S>(session: &mut Session, executor: &TaskExecutor<S>, event: Event) -> bool
where
    S: ReleaseSource + Send + Sync + 'static,
{
    match session.update(event) {
        Some(Command::Run(job)) => {
            executor.launch(job);
            true
        }
        Some(Command::Quit) => false,
        None => true,
    }
}

async fn event_loop<S>(terminal: &mut Tui, mut session: Session, source: Arc<S>) -> Result<()>
where
    S: ReleaseSource + Send + Sync + 'static,
{
    let (completions_tx, mut completions) = mpsc::unbounded_channel();
    let executor = TaskExecutor::new(source, completions_tx);
    let mut terminal_events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let size = terminal.size()?;
    dispatch(
        &mut session,
        &executor,
        Event::Resize {
            width: size.width,
            height: size.height,
        },
    );
    dispatch(&mut session, &executor, Event::Startup);

    loop {
        terminal.draw(|frame| render::draw(frame, &session.view()))?;

        let event = tokio::select! {
            terminal_event = terminal_events.next() => match terminal_event {
                Some(Ok(TerminalEvent::Key(key))) => keymap::translate(&key).map(Event::Key),
                Some(Ok(TerminalEvent::Resize(width, height))) => Some(Event::Resize { width, height }),
                Some(Ok(_)) => None,
                Some(Err(err)) => return Err(err).context("Failed to read terminal input"),
                None => {
                    session.quit();
                    return Ok(());
                }
            },
            Some(completion) = completions.recv() => Some(Event::Completed(completion)),
            _ = ticker.tick() => Some(Event::Tick),
        };

        if let Some(event) = event
            && !dispatch(&mut session, &executor, event)
        {
            tracing::info!("Session closed");
            return Ok(());
        }
    }
}
