//! Terminal UI for Strictly Chess

mod app;
mod input;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use strictly_chess::Side;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use crate::config::ClientConfig;
use crate::orchestrator::{Command, GameEvent, Orchestrator};
use crate::protocol::{HttpAuthority, MoveProtocolClient};
use app::App;

/// How long to wait for a key before redrawing.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Run the TUI client
pub async fn run_tui(config: ClientConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("creating log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(server_url = %config.server_url(), "Starting Strictly Chess TUI");

    let authority = HttpAuthority::from_config(&config)?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let orchestrator = Orchestrator::new(
        MoveProtocolClient::new(Arc::new(authority)),
        config.timings(),
        Side::White,
        event_tx,
    );
    let orchestration = tokio::spawn(orchestrator.run(command_rx));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = run_app(&mut terminal, &mut app, &command_tx, &mut event_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    orchestration.abort();

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Strictly Chess TUI stopped");
    res
}

/// Draw, forward keys as commands, and fold orchestrator events into the view.
#[instrument(skip_all)]
async fn run_app<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    commands: &mpsc::UnboundedSender<Command>,
    events: &mut mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| ui::draw(frame, app))?;

        if !event::poll(INPUT_POLL)? {
            tokio::task::yield_now().await;
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let command = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                return Ok(());
            }
            KeyCode::Char('r') => Command::Reset,
            KeyCode::Enter | KeyCode::Char(' ') => Command::Click(app.cursor()),
            other => {
                app.move_cursor(other);
                continue;
            }
        };
        commands
            .send(command)
            .context("orchestrator stopped unexpectedly")?;
    }
}
