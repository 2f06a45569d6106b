//! Status bar component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::constants::{STATUS_HINTS, STATUS_LOADING};
use crate::notifications::{Toast, ToastVariant};

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar; a live toast wins over the loading indicator
    pub fn render(f: &mut Frame, area: Rect, loading: bool, toast: Option<&Toast>, filter_label: &str) {
        let (status_text, status_color) = match toast {
            Some(toast) => {
                let color = match toast.variant {
                    ToastVariant::Success => Color::Green,
                    ToastVariant::Error => Color::Red,
                };
                (format!("{}: {}", toast.title, toast.message), color)
            }
            None if loading => (STATUS_LOADING.to_string(), Color::Yellow),
            None => (format!("[{}] {}", filter_label, STATUS_HINTS), Color::Gray),
        };

        let status_bar = Paragraph::new(status_text)
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(status_color));

        f.render_widget(status_bar, area);
    }
}
