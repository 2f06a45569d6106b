use crate::backend::BoatDataService;
use crate::boat::BoatType;
use crate::config::Config;
use crate::constants::{ERROR_TITLE, LABEL_ALL_TYPES};
use crate::logger::Logger;
use crate::message_channel::MessageChannel;
use crate::notifications::{Notifier, Toast, ToastQueue, ToastVariant};
use crate::ui::components::{BoatMapComponent, BoatSearchResultsComponent, BoatTileComponent, LogsPanel, StatusBar};
use crate::ui::core::{Action, Component, ResultsView, TaskManager, WidgetId};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Application state separate from UI concerns
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: ResultsView,
    pub boat_types: Vec<BoatType>,
    /// Widgets currently between a loading and a doneloading signal
    pub loading: HashSet<WidgetId>,
    pub gallery_cursor: usize,
    pub gallery_columns: usize,
    pub show_logs: bool,
}

impl AppState {
    pub fn is_loading(&self) -> bool {
        !self.loading.is_empty()
    }

    /// Human-readable name of a filter key
    pub fn filter_label(&self, boat_type_id: &str) -> String {
        if boat_type_id.is_empty() {
            return LABEL_ALL_TYPES.to_string();
        }
        self.boat_types
            .iter()
            .find(|boat_type| boat_type.id == boat_type_id)
            .map(|boat_type| boat_type.name.clone())
            .unwrap_or_else(|| boat_type_id.to_string())
    }

    /// Filter key following `current`, cycling through "all types"
    pub fn next_boat_type(&self, current: &str) -> String {
        if current.is_empty() {
            return self.boat_types.first().map(|t| t.id.clone()).unwrap_or_default();
        }
        let position = self.boat_types.iter().position(|t| t.id == current);
        match position.and_then(|index| self.boat_types.get(index + 1)) {
            Some(next) => next.id.clone(),
            None => String::new(),
        }
    }
}

/// Container for the gallery tiles, the results grid and the map.
///
/// Tiles are rebuilt from the results list after every change and receive the
/// selected id as a plain property. Tile clicks come back as `BoatSelect` and
/// are forwarded to the results, which publish them on the boat channel.
pub struct AppComponent {
    results: BoatSearchResultsComponent,
    map: BoatMapComponent,
    tiles: Vec<BoatTileComponent>,

    state: AppState,

    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,
    toasts: ToastQueue,
    logger: Logger,

    should_quit: bool,
}

impl AppComponent {
    pub fn new(
        config: &Config,
        service: Arc<dyn BoatDataService>,
        channel: MessageChannel,
        toasts: ToastQueue,
        logger: Logger,
    ) -> Self {
        let notifier: Arc<dyn Notifier> = Arc::new(toasts.clone());
        let results = BoatSearchResultsComponent::new(channel.clone(), notifier)
            .with_boat_type(config.ui.default_boat_type.clone());

        let high_resolution = config.map.resolution == "high";
        let map = match config.map.fixed_record_id() {
            Some(record_id) => BoatMapComponent::with_record_id(channel, record_id),
            None => BoatMapComponent::new(channel),
        }
        .with_high_resolution(high_resolution);

        let (task_manager, background_action_rx) = TaskManager::new(service);

        let state = AppState {
            view: if config.ui.start_view == "editor" {
                ResultsView::Editor
            } else {
                ResultsView::Gallery
            },
            gallery_columns: 1,
            ..Default::default()
        };

        Self {
            results,
            map,
            tiles: Vec::new(),
            state,
            task_manager,
            background_action_rx,
            toasts,
            logger,
            should_quit: false,
        }
    }

    /// Activate the widgets and issue the initial requests
    pub fn init(&mut self) -> anyhow::Result<()> {
        self.logger.log("AppComponent: activating widgets".to_string());
        self.map.init()?;
        self.results.init()?;
        self.handle_action(Action::LoadBoatTypes);
        self.pump();
        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn results(&self) -> &BoatSearchResultsComponent {
        &self.results
    }

    pub fn map(&self) -> &BoatMapComponent {
        &self.map
    }

    pub fn tiles(&self) -> &[BoatTileComponent] {
        &self.tiles
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Get the number of active background tasks
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Process everything that arrived since the last tick
    pub fn tick(&mut self) {
        while let Ok(action) = self.background_action_rx.try_recv() {
            self.handle_action(action);
        }
        if self.map.poll_messages() > 0 {
            self.pump();
        }
        self.task_manager.cleanup_finished_tasks();
    }

    /// Wait for the next background result and process it
    pub async fn next_background_action(&mut self) -> bool {
        match self.background_action_rx.recv().await {
            Some(action) => {
                self.handle_action(action);
                if self.map.poll_messages() > 0 {
                    self.pump();
                }
                true
            }
            None => false,
        }
    }

    /// Route one action to its owner
    pub fn handle_action(&mut self, action: Action) {
        if action.is_request() {
            self.task_manager.dispatch(action);
            return;
        }

        match action {
            Action::BoatLocationLoaded { .. } => self.map.update(&action),
            Action::BoatsLoaded { .. } | Action::BoatsUpdated(_) => {
                self.results.update(&action);
                self.sync_tiles();
            }
            Action::BoatTypesLoaded(Ok(boat_types)) => {
                self.logger.log(format!("Loaded {} boat type(s)", boat_types.len()));
                self.state.boat_types = boat_types;
            }
            Action::BoatTypesLoaded(Err(error)) => {
                self.logger.log(format!("Failed to load boat types: {}", error));
                self.toasts
                    .notify(Toast::new(ERROR_TITLE, error.message(), ToastVariant::Error));
            }
            Action::Loading(widget) => {
                self.state.loading.insert(widget);
            }
            Action::DoneLoading(widget) => {
                self.state.loading.remove(&widget);
            }
            Action::BoatSelect { boat_id: Some(boat_id) } => {
                self.logger.log(format!("Boat selected: {}", boat_id));
                self.results.update_selected_tile(boat_id);
                self.sync_tiles();
            }
            Action::BoatSelect { boat_id: None } => {}
            Action::SwitchView(view) => self.state.view = view,
            Action::NextBoatType => {
                let next = self.state.next_boat_type(self.results.boat_type_id());
                self.logger
                    .log(format!("Filter changed to '{}'", self.state.filter_label(&next)));
                self.state.gallery_cursor = 0;
                self.results.search_boats(next);
            }
            Action::ToggleLogs => self.state.show_logs = !self.state.show_logs,
            Action::Quit => self.should_quit = true,
            _ => {}
        }

        self.pump();
    }

    /// Move queued widget actions into the router until all outboxes are empty
    fn pump(&mut self) {
        loop {
            let mut pending = self.results.drain_actions();
            pending.extend(self.map.drain_actions());
            if pending.is_empty() {
                break;
            }
            for action in pending {
                self.handle_action(action);
            }
        }
    }

    fn sync_tiles(&mut self) {
        let selected = self.results.selected_boat_id().map(str::to_string);
        self.tiles = self
            .results
            .boats()
            .iter()
            .map(|boat| BoatTileComponent::new(boat.clone(), selected.clone()))
            .collect();
        if self.state.gallery_cursor >= self.tiles.len() {
            self.state.gallery_cursor = self.tiles.len().saturating_sub(1);
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.state.show_logs {
            if matches!(key.code, KeyCode::Char('G') | KeyCode::Esc) {
                self.handle_action(Action::ToggleLogs);
            }
            return;
        }

        // An open cell editor captures every key
        if self.state.view == ResultsView::Editor && self.results.editor().is_some() {
            self.results.handle_key_events(key);
            self.pump();
            return;
        }

        let action = self.handle_global_key(key);
        if action != Action::None {
            self.handle_action(action);
            return;
        }

        match self.state.view {
            ResultsView::Gallery => self.handle_gallery_key(key),
            ResultsView::Editor => {
                if self.results.handle_key_events(key) {
                    // Grid selection changes the tiles' selected id
                    self.sync_tiles();
                    self.pump();
                }
            }
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Tab => Action::SwitchView(match self.state.view {
                ResultsView::Gallery => ResultsView::Editor,
                ResultsView::Editor => ResultsView::Gallery,
            }),
            KeyCode::Char('t') => Action::NextBoatType,
            KeyCode::Char('G') => Action::ToggleLogs,
            KeyCode::Char('r') => {
                self.logger.log("Global key: 'r' - refreshing boats".to_string());
                self.results.refresh();
                self.pump();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_gallery_key(&mut self, key: KeyEvent) {
        if self.tiles.is_empty() {
            return;
        }
        let last = self.tiles.len() - 1;
        let columns = self.state.gallery_columns.max(1);
        let cursor = self.state.gallery_cursor;

        self.state.gallery_cursor = match key.code {
            KeyCode::Left | KeyCode::Char('h') => cursor.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => (cursor + 1).min(last),
            KeyCode::Up | KeyCode::Char('k') => cursor.saturating_sub(columns),
            KeyCode::Down | KeyCode::Char('j') => (cursor + columns).min(last),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let action = self.tiles[cursor].select_boat();
                self.handle_action(action);
                cursor
            }
            _ => cursor,
        };
    }

    fn render_gallery(&mut self, f: &mut Frame, area: Rect) {
        let title = format!(
            " Boats • {} ({}) ",
            self.state.filter_label(self.results.boat_type_id()),
            self.tiles.len()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        f.render_widget(block, area);

        self.state.gallery_columns = LayoutManager::tile_columns(inner);
        let slots = LayoutManager::tile_grid(inner);
        if slots.is_empty() {
            return;
        }

        let page_start = (self.state.gallery_cursor / slots.len()) * slots.len();
        for (offset, slot) in slots.iter().enumerate() {
            let index = page_start + offset;
            let Some(tile) = self.tiles.get(index) else {
                break;
            };
            tile.render(f, *slot);
            if index == self.state.gallery_cursor {
                let cursor_area = Rect::new(slot.x, slot.y, 1, 1);
                f.render_widget(
                    Paragraph::new(Span::styled("▶", Style::default().fg(Color::Cyan))),
                    cursor_area,
                );
            }
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        let chunks = LayoutManager::main_layout(area);
        let content = LayoutManager::content_layout(chunks[0]);

        match self.state.view {
            ResultsView::Gallery => self.render_gallery(f, content[0]),
            ResultsView::Editor => self.results.render(f, content[0]),
        }
        self.map.render(f, content[1]);

        let toast = self.toasts.current();
        let filter_label = self.state.filter_label(self.results.boat_type_id());
        StatusBar::render(f, chunks[1], self.state.is_loading(), toast.as_ref(), &filter_label);

        if self.state.show_logs {
            LogsPanel::render(f, area, &self.logger);
        }
    }
}
