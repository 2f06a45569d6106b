use crate::boat::{format_currency, format_number, Boat, BoatId};
use crate::constants::{TILE_WRAPPER_SELECTED_CLASS, TILE_WRAPPER_UNSELECTED_CLASS};
use crate::ui::core::Action;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// A selectable card for one boat.
///
/// Holds no state of its own: both inputs are assigned by the container and
/// every visual property is derived from them.
#[derive(Debug, Clone, Default)]
pub struct BoatTileComponent {
    pub boat: Option<Boat>,
    pub selected_boat_id: Option<BoatId>,
}

impl BoatTileComponent {
    pub fn new(boat: Boat, selected_boat_id: Option<BoatId>) -> Self {
        Self {
            boat: Some(boat),
            selected_boat_id,
        }
    }

    pub fn boat_id(&self) -> Option<&str> {
        self.boat.as_ref().map(|boat| boat.id.as_str())
    }

    /// Background style pointing at the boat's picture
    pub fn background_style(&self) -> String {
        let picture = self.boat.as_ref().map(|boat| boat.picture.as_str()).unwrap_or_default();
        format!("background-image:url({})", picture)
    }

    pub fn is_selected(&self) -> bool {
        self.selected_boat_id.as_deref() == self.boat_id()
    }

    pub fn tile_class(&self) -> &'static str {
        if self.is_selected() {
            TILE_WRAPPER_SELECTED_CLASS
        } else {
            TILE_WRAPPER_UNSELECTED_CLASS
        }
    }

    /// The notification a click on this tile sends to its container
    pub fn select_boat(&self) -> Action {
        Action::BoatSelect {
            boat_id: self.boat_id().map(str::to_string),
        }
    }

    pub fn render(&self, f: &mut Frame, rect: Rect) {
        let selected = self.tile_class() == TILE_WRAPPER_SELECTED_CLASS;
        let (border_type, border_style) = if selected {
            (
                BorderType::Thick,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            (BorderType::Rounded, Style::default().fg(Color::Gray))
        };

        let Some(boat) = &self.boat else {
            f.render_widget(Block::default().borders(Borders::ALL).border_type(border_type), rect);
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style)
            .title(format!(" {} ", boat.name))
            .title_style(border_style);

        let lines = vec![
            Line::from(Span::styled(
                format_currency(boat.price),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Length: {} ft", format_number(boat.length)),
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                boat.description.clone(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                boat.picture.clone(),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        f.render_widget(Paragraph::new(lines).block(block).alignment(Alignment::Left), rect);
    }
}
