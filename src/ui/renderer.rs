//! Terminal setup and the main UI loop

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;

use super::app_component::AppComponent;
use super::core::{EventHandler, EventType};
use crate::backend::local::LocalBackend;
use crate::config::Config;
use crate::constants::BOAT_MESSAGE_CHANNEL;
use crate::logger::Logger;
use crate::message_channel::MessageChannel;
use crate::notifications::ToastQueue;
use crate::storage::{CatalogSeed, LocalStorage};

/// Open (and seed if empty) the catalog described by the configuration
pub async fn open_catalog(config: &Config) -> Result<LocalStorage> {
    let storage = match &config.catalog.database_url {
        Some(url) => LocalStorage::open(url).await?,
        None => LocalStorage::new().await?,
    };

    if !storage.has_data().await? {
        let seed = match &config.catalog.seed_file {
            Some(path) => CatalogSeed::from_file(path)?,
            None => CatalogSeed::demo(),
        };
        seed.apply(&storage).await.context("Failed to seed catalog")?;
    }

    Ok(storage)
}

/// Run the main TUI application
pub async fn run_app(config: Config) -> Result<()> {
    let logger = Logger::from_config(config.logging.enabled)?;
    logger.log("Starting boatyard".to_string());

    let storage = open_catalog(&config).await?;
    let service = Arc::new(LocalBackend::new(storage));
    let channel = MessageChannel::new(BOAT_MESSAGE_CHANNEL);
    let toasts = ToastQueue::new(config.notifications.toast_duration());

    let mut app = AppComponent::new(&config, service, channel, toasts, logger);
    app.init()?;

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    if config.ui.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main application loop
    let res = run_ui(&mut terminal, &mut app).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

/// Main UI loop
async fn run_ui(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut AppComponent) -> Result<()> {
    let mut events = EventHandler::new();

    loop {
        terminal.draw(|f| app.render(f))?;

        match events.next_event().await? {
            EventType::Key(key) => app.handle_key(key),
            EventType::Resize(_, _) | EventType::Tick | EventType::Other => {}
        }

        app.tick();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
