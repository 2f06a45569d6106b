use super::actions::Action;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

pub trait Component {
    /// Activation hook, called once the component is placed in the app
    fn init(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Returns `true` when the key was consumed
    fn handle_key_events(&mut self, _key: KeyEvent) -> bool {
        false
    }

    /// Deliver a facility result or app action to this component
    fn update(&mut self, _action: &Action) {}

    /// Take every action queued since the last call
    fn drain_actions(&mut self) -> Vec<Action>;

    fn render(&mut self, f: &mut Frame, rect: Rect);
}
