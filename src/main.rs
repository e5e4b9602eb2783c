mod controller;
mod error;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use reqwest::Url;

use controller::AppController;
use model::{AppModel, CatalogClient};
use view::AppView;

/// Terminal client for a music-catalog server.
#[derive(Parser, Debug)]
#[command(name = "tunedeck", version, about)]
struct Args {
    /// Base URL of the catalog server
    #[arg(long, default_value = "http://localhost:8000")]
    server: String,

    /// Results per page
    #[arg(long, default_value_t = 5)]
    page_size: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!(server = %args.server, page_size = args.page_size, "=== tunedeck starting ===");

    let base = Url::parse(&args.server)
        .with_context(|| format!("invalid server URL: {}", args.server))?;
    let page_size = args.page_size.max(1);

    let model = Arc::new(AppModel::new(page_size));
    let gateway = Arc::new(CatalogClient::new(base));
    let controller = AppController::new(model.clone(), gateway);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("tunedeck shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Get current state
        let ui_state = model.get_ui_state().await;
        let content_state = model.get_content_state().await;
        let page_controls = model.page_controls().await;
        let should_quit = model.should_quit().await;

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &ui_state, &content_state, page_controls.as_ref());
        })?;

        // Handle input with a short poll time for smooth UI updates
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let _ = controller.handle_key_event(key).await;
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
