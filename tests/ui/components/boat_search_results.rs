use crate::common::{sailboats, sample_boats};
use boatyard::backend::BackendError;
use boatyard::boat::{BoatDraft, BoatField};
use boatyard::message_channel::{BoatMessage, MessageChannel};
use boatyard::notifications::{ToastQueue, ToastVariant};
use boatyard::ui::components::BoatSearchResultsComponent;
use boatyard::ui::core::{Action, Component, WidgetId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

fn results_with(channel: &MessageChannel, toasts: &ToastQueue) -> BoatSearchResultsComponent {
    BoatSearchResultsComponent::new(channel.clone(), Arc::new(toasts.clone()))
}

/// A results widget that has already loaded the sample boats
fn loaded(channel: &MessageChannel, toasts: &ToastQueue) -> BoatSearchResultsComponent {
    let mut results = results_with(channel, toasts);
    results.load();
    results.on_boats_loaded(results.last_request(), Ok(sample_boats()));
    results.drain_actions();
    results
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn count_signals(actions: &[Action], signal: &Action) -> usize {
    actions.iter().filter(|action| *action == signal).count()
}

#[test]
fn test_load_issues_query_for_current_filter() {
    let toasts = ToastQueue::default();
    let mut results = results_with(&MessageChannel::new("test"), &toasts).with_boat_type("motor");
    results.init().unwrap();

    assert!(results.is_loading());
    assert_eq!(
        results.drain_actions(),
        vec![
            Action::Loading(WidgetId::SearchResults),
            Action::QueryBoats {
                request: 1,
                boat_type_id: "motor".to_string()
            }
        ]
    );
}

#[test]
fn test_boats_loaded() {
    let channel = MessageChannel::new("test");
    let toasts = ToastQueue::default();
    let mut results = results_with(&channel, &toasts);
    results.load();
    results.drain_actions();

    results.update(&Action::BoatsLoaded {
        request: 1,
        result: Ok(sample_boats()),
    });

    assert_eq!(results.boats().len(), 3);
    assert!(results.error().is_none());
    assert!(!results.is_loading());
    assert_eq!(results.drain_actions(), vec![Action::DoneLoading(WidgetId::SearchResults)]);
}

#[test]
fn test_query_failure_clears_boats() {
    let channel = MessageChannel::new("test");
    let toasts = ToastQueue::default();
    let mut results = loaded(&channel, &toasts);

    results.refresh();
    results.on_boats_loaded(results.last_request(), Err(BackendError::Storage("disk full".to_string())));

    assert!(results.boats().is_empty());
    assert_eq!(results.error(), Some(&BackendError::Storage("disk full".to_string())));
    assert!(!results.is_loading());
}

#[test]
fn test_filter_change_discards_stale_results() {
    let toasts = ToastQueue::default();
    let mut results = results_with(&MessageChannel::new("test"), &toasts);

    results.load();
    results.search_boats("sail");
    let actions = results.drain_actions();

    // Overlapping queries produce a single loading signal
    assert_eq!(count_signals(&actions, &Action::Loading(WidgetId::SearchResults)), 1);
    assert!(actions.contains(&Action::QueryBoats {
        request: 2,
        boat_type_id: "sail".to_string()
    }));
    assert_eq!(results.boat_type_id(), "sail");

    // The newer query answers first
    results.on_boats_loaded(2, Ok(sailboats()));
    assert_eq!(results.boats().len(), 2);
    assert!(!results.is_loading());

    // The older, unfiltered answer arrives late and is dropped
    results.on_boats_loaded(1, Ok(sample_boats()));
    assert_eq!(results.boats(), sailboats().as_slice());
    assert_eq!(
        results.drain_actions(),
        vec![Action::DoneLoading(WidgetId::SearchResults)]
    );
}

#[test]
fn test_select_row_publishes_once() {
    let channel = MessageChannel::new("test");
    let mut listener = channel.subscribe();
    let toasts = ToastQueue::default();
    let mut results = loaded(&channel, &toasts);

    results.select_row(1);

    assert_eq!(results.selected_boat_id(), Some("b2"));
    assert_eq!(listener.try_recv(), Some(BoatMessage::new("b2")));
    assert_eq!(listener.try_recv(), None);
}

#[test]
fn test_select_row_out_of_range_is_ignored() {
    let channel = MessageChannel::new("test");
    let mut listener = channel.subscribe();
    let toasts = ToastQueue::default();
    let mut results = loaded(&channel, &toasts);

    results.select_row(10);
    assert!(results.selected_boat_id().is_none());
    assert_eq!(listener.try_recv(), None);
}

#[test]
fn test_update_selected_tile_publishes_every_time() {
    let channel = MessageChannel::new("test");
    let mut listener = channel.subscribe();
    let toasts = ToastQueue::default();
    let mut results = loaded(&channel, &toasts);

    results.update_selected_tile("b1");
    results.update_selected_tile("b1");

    assert_eq!(listener.try_recv(), Some(BoatMessage::new("b1")));
    assert_eq!(listener.try_recv(), Some(BoatMessage::new("b1")));
}

#[test]
fn test_edits_merge_per_boat() {
    let toasts = ToastQueue::default();
    let mut results = loaded(&MessageChannel::new("test"), &toasts);

    results.edit_field("b2", BoatField::Price, "250,000").unwrap();
    results.edit_field("b1", BoatField::Name, "Albatross II").unwrap();
    results.edit_field("b2", BoatField::Length, "40").unwrap();

    let drafts = results.draft_values();
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].id, "b2");
    assert_eq!(drafts[0].price, Some(250000.0));
    assert_eq!(drafts[0].length, Some(40.0));
    assert_eq!(drafts[1].name.as_deref(), Some("Albatross II"));

    let shown = results.display_boat(&results.boats()[1]);
    assert_eq!(shown.price, 250000.0);
    // The loaded list itself is untouched until a save succeeds
    assert_eq!(results.boats()[1].price, 100000.0);
}

#[test]
fn test_invalid_edit_is_rejected() {
    let toasts = ToastQueue::default();
    let mut results = loaded(&MessageChannel::new("test"), &toasts);

    assert!(results.edit_field("b1", BoatField::Length, "long").is_err());
    assert!(results.edit_field("b1", BoatField::Price, "-5").is_err());
    assert!(results.draft_values().is_empty());
}

#[test]
fn test_save_without_drafts_does_nothing() {
    let toasts = ToastQueue::default();
    let mut results = loaded(&MessageChannel::new("test"), &toasts);

    results.handle_save();
    assert!(!results.is_saving());
    assert!(results.drain_actions().is_empty());
}

#[test]
fn test_save_success() {
    let toasts = ToastQueue::default();
    let mut results = loaded(&MessageChannel::new("test"), &toasts);
    results.edit_field("b1", BoatField::Price, "99").unwrap();

    results.handle_save();
    assert!(results.is_saving());
    let mut expected = BoatDraft::new("b1");
    expected.price = Some(99.0);
    assert_eq!(
        results.drain_actions(),
        vec![
            Action::Loading(WidgetId::SearchResults),
            Action::UpdateBoats { drafts: vec![expected] }
        ]
    );

    // A second save while the first is in flight is ignored
    results.handle_save();
    assert!(results.drain_actions().is_empty());

    results.update(&Action::BoatsUpdated(Ok(())));
    assert!(!results.is_saving());
    assert!(results.draft_values().is_empty());

    let shown = toasts.drain();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, "Success");
    assert_eq!(shown[0].message, "Ship it!");
    assert_eq!(shown[0].variant, ToastVariant::Success);

    // The list is refreshed and loading stays on until it arrives
    let request = results.last_request();
    assert_eq!(
        results.drain_actions(),
        vec![Action::QueryBoats {
            request,
            boat_type_id: String::new()
        }]
    );
    assert!(results.is_loading());
    results.on_boats_loaded(request, Ok(sample_boats()));
    assert_eq!(results.drain_actions(), vec![Action::DoneLoading(WidgetId::SearchResults)]);
}

#[test]
fn test_save_failure_keeps_drafts() {
    let toasts = ToastQueue::default();
    let mut results = loaded(&MessageChannel::new("test"), &toasts);
    results.edit_field("b1", BoatField::Length, "12").unwrap();
    results.handle_save();
    results.drain_actions();
    let request = results.last_request();

    results.on_save_completed(Err(BackendError::InvalidData("length out of range".to_string())));

    assert!(!results.is_saving());
    assert_eq!(results.draft_values().len(), 1);
    assert_eq!(results.last_request(), request);

    let shown = toasts.drain();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, "Error");
    assert_eq!(shown[0].message, "length out of range");
    assert_eq!(shown[0].variant, ToastVariant::Error);

    assert_eq!(results.drain_actions(), vec![Action::DoneLoading(WidgetId::SearchResults)]);
}

#[test]
fn test_cancel_drafts() {
    let toasts = ToastQueue::default();
    let mut results = loaded(&MessageChannel::new("test"), &toasts);
    results.edit_field("b1", BoatField::Name, "Gone").unwrap();

    assert!(results.handle_key_events(key(KeyCode::Char('x'))));
    assert!(results.draft_values().is_empty());
}

#[test]
fn test_drafts_cannot_be_discarded_during_save() {
    let toasts = ToastQueue::default();
    let mut results = loaded(&MessageChannel::new("test"), &toasts);
    results.edit_field("b1", BoatField::Price, "10").unwrap();
    results.handle_save();

    results.handle_key_events(key(KeyCode::Char('x')));
    results.cancel_drafts();
    assert_eq!(results.draft_values().len(), 1);

    // The failed batch is still there to retry
    results.on_save_completed(Err(BackendError::Other("offline".to_string())));
    assert_eq!(results.draft_values().len(), 1);

    results.cancel_drafts();
    assert!(results.draft_values().is_empty());
}

#[test]
fn test_keyboard_cell_edit() {
    let toasts = ToastQueue::default();
    let mut results = loaded(&MessageChannel::new("test"), &toasts);

    // Row 0, Length column
    results.handle_key_events(key(KeyCode::Right));
    results.handle_key_events(key(KeyCode::Char('e')));
    let editor = results.editor().unwrap();
    assert_eq!(editor.boat_id, "b1");
    assert_eq!(editor.field, BoatField::Length);
    assert_eq!(editor.buffer, "30");

    results.handle_key_events(key(KeyCode::Backspace));
    results.handle_key_events(key(KeyCode::Backspace));
    results.handle_key_events(key(KeyCode::Char('3')));
    results.handle_key_events(key(KeyCode::Char('5')));
    results.handle_key_events(key(KeyCode::Enter));

    assert!(results.editor().is_none());
    assert_eq!(results.draft_values()[0].length, Some(35.0));
}

#[test]
fn test_keyboard_edit_rejects_bad_input() {
    let toasts = ToastQueue::default();
    let mut results = loaded(&MessageChannel::new("test"), &toasts);

    results.handle_key_events(key(KeyCode::Right));
    results.handle_key_events(key(KeyCode::Char('e')));
    results.handle_key_events(key(KeyCode::Char('x')));
    results.handle_key_events(key(KeyCode::Enter));

    // The editor stays open with the error shown
    assert!(results.editor().is_some());
    assert!(results.edit_error().is_some());
    assert!(results.draft_values().is_empty());

    results.handle_key_events(key(KeyCode::Esc));
    assert!(results.editor().is_none());
    assert!(results.edit_error().is_none());
}

#[test]
fn test_enter_selects_focused_row() {
    let channel = MessageChannel::new("test");
    let mut listener = channel.subscribe();
    let toasts = ToastQueue::default();
    let mut results = loaded(&channel, &toasts);

    results.handle_key_events(key(KeyCode::Down));
    results.handle_key_events(key(KeyCode::Enter));

    assert_eq!(results.selected_boat_id(), Some("b2"));
    assert_eq!(listener.try_recv(), Some(BoatMessage::new("b2")));
}
