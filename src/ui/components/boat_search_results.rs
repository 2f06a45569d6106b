//! Search results: the boat list, its editable grid and the selection publisher.
//!
//! The list is fetched per boat type. Every query gets a fresh request id and
//! only the response to the newest request is applied, so a slow response to
//! an old filter can never overwrite the current one.

use crate::backend::BackendError;
use crate::boat::{Boat, BoatDraft, BoatField, BoatId, FieldParseError};
use crate::constants::{ERROR_TITLE, MESSAGE_SHIP_IT, SUCCESS_TITLE};
use crate::message_channel::{BoatMessage, MessageChannel};
use crate::notifications::{Notifier, Toast, ToastVariant};
use crate::ui::core::{Action, Component, LoadingState, RequestId, WidgetId};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState},
    Frame,
};
use std::sync::Arc;

/// An in-progress edit of one grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellEditor {
    pub boat_id: BoatId,
    pub field: BoatField,
    pub buffer: String,
}

pub struct BoatSearchResultsComponent {
    channel: MessageChannel,
    notifier: Arc<dyn Notifier>,
    boat_type_id: String,
    boats: Vec<Boat>,
    selected_boat_id: Option<BoatId>,
    draft_values: Vec<BoatDraft>,
    error: Option<BackendError>,
    loading: LoadingState,
    last_request: RequestId,
    saving: bool,

    // Grid state
    table_state: TableState,
    focused_row: usize,
    focused_column: usize,
    editor: Option<CellEditor>,
    edit_error: Option<FieldParseError>,

    outbox: Vec<Action>,
}

impl BoatSearchResultsComponent {
    pub fn new(channel: MessageChannel, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            channel,
            notifier,
            boat_type_id: String::new(),
            boats: Vec::new(),
            selected_boat_id: None,
            draft_values: Vec::new(),
            error: None,
            loading: LoadingState::new(WidgetId::SearchResults),
            last_request: 0,
            saving: false,
            table_state: TableState::default(),
            focused_row: 0,
            focused_column: 0,
            editor: None,
            edit_error: None,
            outbox: Vec::new(),
        }
    }

    pub fn with_boat_type(mut self, boat_type_id: impl Into<String>) -> Self {
        self.boat_type_id = boat_type_id.into();
        self
    }

    pub fn boat_type_id(&self) -> &str {
        &self.boat_type_id
    }

    pub fn boats(&self) -> &[Boat] {
        &self.boats
    }

    pub fn selected_boat_id(&self) -> Option<&str> {
        self.selected_boat_id.as_deref()
    }

    pub fn draft_values(&self) -> &[BoatDraft] {
        &self.draft_values
    }

    pub fn error(&self) -> Option<&BackendError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn editor(&self) -> Option<&CellEditor> {
        self.editor.as_ref()
    }

    pub fn edit_error(&self) -> Option<&FieldParseError> {
        self.edit_error.as_ref()
    }

    /// Id of the newest list query
    pub fn last_request(&self) -> RequestId {
        self.last_request
    }

    fn notify_loading(&mut self, loading: bool) {
        self.outbox.extend(self.loading.notify(loading));
    }

    fn query(&mut self) {
        self.last_request += 1;
        self.outbox.push(Action::QueryBoats {
            request: self.last_request,
            boat_type_id: self.boat_type_id.clone(),
        });
    }

    /// Initial load with the current filter
    pub fn load(&mut self) {
        self.notify_loading(true);
        self.query();
    }

    /// Change the filter and fetch the matching boats
    pub fn search_boats(&mut self, boat_type_id: impl Into<String>) {
        self.boat_type_id = boat_type_id.into();
        log::info!("SearchResults: searching boat type '{}'", self.boat_type_id);
        self.notify_loading(true);
        self.query();
    }

    /// Re-run the current query
    pub fn refresh(&mut self) {
        self.notify_loading(true);
        self.query();
    }

    /// Apply a list query response
    pub fn on_boats_loaded(&mut self, request: RequestId, result: Result<Vec<Boat>, BackendError>) {
        if request != self.last_request {
            log::debug!(
                "SearchResults: dropping response {} (latest is {})",
                request,
                self.last_request
            );
            return;
        }

        match result {
            Ok(boats) => {
                self.error = None;
                self.boats = boats;
            }
            Err(error) => {
                log::warn!("SearchResults: query failed: {}", error);
                self.error = Some(error);
                self.boats.clear();
            }
        }
        self.clamp_focus();
        self.notify_loading(false);
    }

    /// Record a selection and announce it on the boat channel
    pub fn update_selected_tile(&mut self, boat_id: impl Into<BoatId>) {
        let boat_id = boat_id.into();
        self.selected_boat_id = Some(boat_id.clone());
        self.send_message_service(boat_id);
    }

    /// Select the boat shown in grid row `index`
    pub fn select_row(&mut self, index: usize) {
        if let Some(boat_id) = self.boats.get(index).map(|boat| boat.id.clone()) {
            self.focused_row = index;
            self.update_selected_tile(boat_id);
        }
    }

    fn send_message_service(&self, boat_id: BoatId) {
        self.channel.publish(BoatMessage::new(boat_id));
    }

    /// Record a cell edit in the draft buffer
    pub fn edit_field(&mut self, boat_id: &str, field: BoatField, raw: &str) -> Result<(), FieldParseError> {
        let position = self.draft_values.iter().position(|draft| draft.id == boat_id);
        let mut draft = match position {
            Some(index) => self.draft_values[index].clone(),
            None => BoatDraft::new(boat_id),
        };
        draft.set_field(field, raw)?;

        match position {
            Some(index) => self.draft_values[index] = draft,
            None => self.draft_values.push(draft),
        }
        Ok(())
    }

    /// Discard every unsaved edit; not allowed while a save is in flight
    pub fn cancel_drafts(&mut self) {
        if self.saving {
            return;
        }
        self.draft_values.clear();
        self.editor = None;
        self.edit_error = None;
    }

    /// Submit all drafts as one batch
    pub fn handle_save(&mut self) {
        if self.draft_values.is_empty() || self.saving {
            return;
        }
        self.saving = true;
        self.notify_loading(true);
        self.outbox.push(Action::UpdateBoats {
            drafts: self.draft_values.clone(),
        });
    }

    /// Apply the outcome of a batch update
    pub fn on_save_completed(&mut self, result: Result<(), BackendError>) {
        self.saving = false;
        match result {
            Ok(()) => {
                self.notifier
                    .notify(Toast::new(SUCCESS_TITLE, MESSAGE_SHIP_IT, ToastVariant::Success));
                self.draft_values.clear();
                // Loading stays on until the refreshed list arrives
                self.refresh();
            }
            Err(error) => {
                self.notifier
                    .notify(Toast::new(ERROR_TITLE, error.message(), ToastVariant::Error));
                self.notify_loading(false);
            }
        }
    }

    /// Boat as displayed, with drafted values overlaid
    pub fn display_boat(&self, boat: &Boat) -> Boat {
        let mut shown = boat.clone();
        if let Some(draft) = self.draft_for(&boat.id) {
            draft.apply_to(&mut shown);
        }
        shown
    }

    fn draft_for(&self, boat_id: &str) -> Option<&BoatDraft> {
        self.draft_values.iter().find(|draft| draft.id == boat_id)
    }

    fn clamp_focus(&mut self) {
        if self.boats.is_empty() {
            self.focused_row = 0;
            self.table_state.select(None);
        } else {
            self.focused_row = self.focused_row.min(self.boats.len() - 1);
            self.table_state.select(Some(self.focused_row));
        }
    }

    fn move_row(&mut self, delta: isize) {
        if self.boats.is_empty() {
            return;
        }
        let last = self.boats.len() as isize - 1;
        self.focused_row = (self.focused_row as isize + delta).clamp(0, last) as usize;
        self.table_state.select(Some(self.focused_row));
    }

    fn move_column(&mut self, delta: isize) {
        let last = BoatField::ALL.len() as isize - 1;
        self.focused_column = (self.focused_column as isize + delta).clamp(0, last) as usize;
    }

    fn begin_edit(&mut self) {
        if self.saving {
            return;
        }
        let Some(boat) = self.boats.get(self.focused_row) else {
            return;
        };
        let field = BoatField::ALL[self.focused_column];
        if !field.is_editable() {
            return;
        }
        let current = field.display(&self.display_boat(boat));
        self.editor = Some(CellEditor {
            boat_id: boat.id.clone(),
            field,
            buffer: current,
        });
        self.edit_error = None;
    }

    fn commit_edit(&mut self) {
        let Some(editor) = self.editor.take() else {
            return;
        };
        if let Err(error) = self.edit_field(&editor.boat_id, editor.field, &editor.buffer) {
            log::debug!("SearchResults: rejected edit: {}", error);
            self.edit_error = Some(error);
            self.editor = Some(editor);
        } else {
            self.edit_error = None;
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) -> bool {
        let Some(editor) = self.editor.as_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Char(c) => editor.buffer.push(c),
            KeyCode::Backspace => {
                editor.buffer.pop();
            }
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Esc => {
                self.editor = None;
                self.edit_error = None;
            }
            _ => {}
        }
        true
    }

    fn render_title(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            " Boat Editor ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if !self.draft_values.is_empty() {
            spans.push(Span::styled(
                format!("[{} unsaved] ", self.draft_values.len()),
                Style::default().fg(Color::Yellow),
            ));
        }
        if self.saving {
            spans.push(Span::styled("[saving] ", Style::default().fg(Color::Yellow)));
        }
        if let Some(error) = &self.edit_error {
            spans.push(Span::styled(format!("{} ", error), Style::default().fg(Color::Red)));
        } else if let Some(error) = &self.error {
            spans.push(Span::styled(format!("{} ", error), Style::default().fg(Color::Red)));
        }
        Line::from(spans)
    }
}

impl Component for BoatSearchResultsComponent {
    fn init(&mut self) -> anyhow::Result<()> {
        self.load();
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> bool {
        if self.handle_editor_key(key) {
            return true;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_row(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_row(1),
            KeyCode::Left => self.move_column(-1),
            KeyCode::Right => self.move_column(1),
            KeyCode::Enter => self.select_row(self.focused_row),
            KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Char('s') => self.handle_save(),
            KeyCode::Char('x') => self.cancel_drafts(),
            _ => return false,
        }
        true
    }

    fn update(&mut self, action: &Action) {
        match action {
            Action::BoatsLoaded { request, result } => self.on_boats_loaded(*request, result.clone()),
            Action::BoatsUpdated(result) => self.on_save_completed(result.clone()),
            _ => {}
        }
    }

    fn drain_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.outbox)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let header = Row::new(BoatField::ALL.iter().map(|field| {
            Cell::from(field.label()).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        }));

        let rows: Vec<Row> = self
            .boats
            .iter()
            .enumerate()
            .map(|(row_index, boat)| {
                let shown = self.display_boat(boat);
                let draft = self.draft_for(&boat.id);
                let is_selected = self.selected_boat_id.as_deref() == Some(boat.id.as_str());

                let cells = BoatField::ALL.iter().enumerate().map(|(column, field)| {
                    let editing = self
                        .editor
                        .as_ref()
                        .filter(|editor| editor.boat_id == boat.id && editor.field == *field);
                    let text = match editing {
                        Some(editor) => format!("{}█", editor.buffer),
                        None => field.display(&shown),
                    };

                    let mut style = Style::default().fg(Color::White);
                    if draft.map(|draft| draft.has_field(*field)).unwrap_or(false) {
                        style = style.fg(Color::Yellow).add_modifier(Modifier::ITALIC);
                    }
                    if row_index == self.focused_row && column == self.focused_column {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Cell::from(text).style(style)
                });

                let row = Row::new(cells);
                if is_selected {
                    row.style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    row
                }
            })
            .collect();

        let widths = [
            Constraint::Percentage(25),
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Min(20),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(self.render_title()),
            )
            .row_highlight_style(Style::default().bg(Color::DarkGray));

        f.render_stateful_widget(table, rect, &mut self.table_state);
    }
}
