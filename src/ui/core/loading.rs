use super::actions::{Action, WidgetId};

/// Loading flag that only reports transitions.
///
/// Entering "loading" while already loading is a no-op, as is finishing when
/// idle, so overlapping triggers never produce unbalanced signals.
#[derive(Debug, Clone, Copy)]
pub struct LoadingState {
    widget: WidgetId,
    loading: bool,
}

impl LoadingState {
    pub fn new(widget: WidgetId) -> Self {
        Self { widget, loading: false }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Set the flag, returning the signal to emit if it changed
    pub fn notify(&mut self, loading: bool) -> Option<Action> {
        if self.loading == loading {
            return None;
        }
        self.loading = loading;
        Some(if loading {
            Action::Loading(self.widget)
        } else {
            Action::DoneLoading(self.widget)
        })
    }
}
