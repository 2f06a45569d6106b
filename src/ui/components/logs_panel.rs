//! Log viewer overlay

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::logger::Logger;
use crate::ui::layout::LayoutManager;

pub struct LogsPanel;

impl LogsPanel {
    /// Render the newest log entries in a centered overlay
    pub fn render(f: &mut Frame, area: Rect, logger: &Logger) {
        let panel_area = LayoutManager::centered_rect(80, 70, area);
        let visible = panel_area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = logger.get_logs().into_iter().take(visible).map(Line::from).collect();

        let panel = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(" Logs (G to close) ")
                    .style(Style::default().fg(Color::Gray)),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(Clear, panel_area);
        f.render_widget(panel, panel_area);
    }
}
