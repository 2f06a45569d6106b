//! Layout management and calculations

use crate::constants::{TILE_HEIGHT, TILE_WIDTH};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Manages layout calculations and constraints for the UI
pub struct LayoutManager;

impl LayoutManager {
    /// Calculate the main layout areas (content on top, status bar below)
    #[must_use]
    pub fn main_layout(area: Rect) -> Vec<Rect> {
        let top_height = area.height.saturating_sub(1);
        let top_area = Rect::new(area.x, area.y, area.width, top_height);
        let status_area = Rect::new(area.x, area.y + top_height, area.width, 1);

        vec![top_area, status_area]
    }

    /// Calculate the content layout (results on the left, map on the right)
    #[must_use]
    pub fn content_layout(area: Rect) -> Vec<Rect> {
        let map_width = std::cmp::max(area.width * 2 / 5, std::cmp::min(area.width, 30));
        let results_width = area.width.saturating_sub(map_width);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(results_width), Constraint::Length(map_width)])
            .split(area)
            .to_vec()
    }

    /// Split the gallery area into tile slots, row by row
    #[must_use]
    pub fn tile_grid(area: Rect) -> Vec<Rect> {
        let columns = std::cmp::max(area.width / TILE_WIDTH, 1);
        let rows = area.height / TILE_HEIGHT;
        let mut slots = Vec::new();
        for row in 0..rows {
            for column in 0..columns {
                let x = area.x + column * TILE_WIDTH;
                let width = std::cmp::min(TILE_WIDTH, area.width.saturating_sub(column * TILE_WIDTH));
                slots.push(Rect::new(x, area.y + row * TILE_HEIGHT, width, TILE_HEIGHT));
            }
        }
        slots
    }

    /// Number of tiles per gallery row for this area
    #[must_use]
    pub fn tile_columns(area: Rect) -> usize {
        std::cmp::max(area.width / TILE_WIDTH, 1) as usize
    }

    /// Calculate a centered rectangle within the given area
    #[must_use]
    pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
