use boatyard::notifications::{Toast, ToastVariant};
use boatyard::ui::components::StatusBar;
use ratatui::{backend::TestBackend, Terminal};

fn render_status(loading: bool, toast: Option<&Toast>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
    terminal
        .draw(|f| {
            let area = f.area();
            StatusBar::render(f, area, loading, toast, "All Types");
        })
        .unwrap();
    terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
}

#[test]
fn test_toast_wins_over_loading() {
    let toast = Toast::new("Error", "offline", ToastVariant::Error);
    assert!(render_status(true, Some(&toast)).contains("Error: offline"));

    let toast = Toast::new("Success", "Ship it!", ToastVariant::Success);
    assert!(render_status(false, Some(&toast)).contains("Success: Ship it!"));
}

#[test]
fn test_loading_without_toast() {
    assert!(render_status(true, None).contains("Loading boats"));
}
