use boatyard::backend::{BackendError, BOAT_LOCATION_FIELDS};
use boatyard::boat::{RecordData, RecordField};
use boatyard::message_channel::{BoatMessage, MessageChannel};
use boatyard::ui::components::BoatMapComponent;
use boatyard::ui::core::{Action, Component, WidgetId};
use serde_json::json;

fn location(latitude: f64, longitude: f64) -> RecordData {
    RecordData::new()
        .with_field(RecordField::Latitude, json!(latitude))
        .with_field(RecordField::Longitude, json!(longitude))
}

fn fetch(boat_id: &str) -> Action {
    Action::FetchBoatLocation {
        boat_id: boat_id.to_string(),
        fields: BOAT_LOCATION_FIELDS.to_vec(),
    }
}

#[test]
fn test_fixed_record_id_never_subscribes() {
    let channel = MessageChannel::new("test");
    let mut map = BoatMapComponent::with_record_id(channel.clone(), "b1");
    map.init().unwrap();
    map.connect();

    assert!(!map.is_subscribed());
    assert_eq!(channel.subscriber_count(), 0);
    assert_eq!(map.record_id(), Some("b1"));
    assert_eq!(
        map.drain_actions(),
        vec![Action::Loading(WidgetId::Map), fetch("b1")]
    );

    // Broadcasts are ignored
    channel.publish(BoatMessage::new("b2"));
    assert_eq!(map.poll_messages(), 0);
    assert_eq!(map.boat_id(), Some("b1"));
}

#[test]
fn test_connect_subscribes_once() {
    let channel = MessageChannel::new("test");
    let mut map = BoatMapComponent::new(channel.clone());

    map.connect();
    map.connect();
    map.init().unwrap();

    assert!(map.is_subscribed());
    assert_eq!(channel.subscriber_count(), 1);
    assert!(map.drain_actions().is_empty());
}

#[test]
fn test_published_id_reaches_every_subscribed_map() {
    let channel = MessageChannel::new("test");
    let mut first = BoatMapComponent::new(channel.clone());
    let mut second = BoatMapComponent::new(channel.clone());
    let mut pinned = BoatMapComponent::with_record_id(channel.clone(), "b9");
    first.connect();
    second.connect();
    pinned.connect();
    pinned.drain_actions();

    assert_eq!(channel.publish(BoatMessage::new("X")), 2);

    for map in [&mut first, &mut second] {
        assert_eq!(map.poll_messages(), 1);
        assert_eq!(map.boat_id(), Some("X"));
        assert_eq!(map.drain_actions(), vec![Action::Loading(WidgetId::Map), fetch("X")]);
    }
    assert_eq!(pinned.poll_messages(), 0);
    assert!(pinned.drain_actions().is_empty());
}

#[test]
fn test_successful_lookup_shows_one_marker() {
    let channel = MessageChannel::new("test");
    let mut map = BoatMapComponent::new(channel);
    map.handle_message(BoatMessage::new("b1"));
    map.drain_actions();

    map.update(&Action::BoatLocationLoaded {
        boat_id: "b1".to_string(),
        result: Ok(location(37.8, -122.4)),
    });

    assert_eq!(map.map_markers().len(), 1);
    assert_eq!(map.map_markers()[0].location.latitude, 37.8);
    assert_eq!(map.map_markers()[0].location.longitude, -122.4);
    assert!(map.show_map());
    assert!(map.error().is_none());
    assert!(!map.is_loading());
    assert_eq!(map.drain_actions(), vec![Action::DoneLoading(WidgetId::Map)]);
}

#[test]
fn test_failed_lookup_clears_boat() {
    let channel = MessageChannel::new("test");
    let mut map = BoatMapComponent::new(channel.clone());
    map.connect();

    // A good lookup first, so there is something to clear
    map.handle_message(BoatMessage::new("b1"));
    map.on_location_loaded("b1", Ok(location(1.0, 2.0)));
    map.handle_message(BoatMessage::new("b2"));
    map.drain_actions();

    let error = BackendError::NotFound("No boat with id 'b2'".to_string());
    map.on_location_loaded("b2", Err(error.clone()));

    assert_eq!(map.error(), Some(&error));
    assert!(map.boat_id().is_none());
    assert!(map.map_markers().is_empty());
    assert!(!map.show_map());
    assert_eq!(map.drain_actions(), vec![Action::DoneLoading(WidgetId::Map)]);

    // Still listening after a failure
    channel.publish(BoatMessage::new("b1"));
    assert_eq!(map.poll_messages(), 1);
    assert_eq!(map.boat_id(), Some("b1"));
}

#[test]
fn test_success_clears_previous_error() {
    let mut map = BoatMapComponent::new(MessageChannel::new("test"));
    map.handle_message(BoatMessage::new("b1"));
    map.on_location_loaded("b1", Err(BackendError::Other("offline".to_string())));
    assert!(map.error().is_some());

    map.handle_message(BoatMessage::new("b1"));
    map.on_location_loaded("b1", Ok(location(1.0, 2.0)));
    assert!(map.error().is_none());
    assert_eq!(map.map_markers().len(), 1);
}

#[test]
fn test_missing_coordinates_are_an_error() {
    let mut map = BoatMapComponent::new(MessageChannel::new("test"));
    map.handle_message(BoatMessage::new("b3"));

    let data = RecordData::new()
        .with_field(RecordField::Latitude, serde_json::Value::Null)
        .with_field(RecordField::Longitude, serde_json::Value::Null);
    map.on_location_loaded("b3", Ok(data));

    assert!(matches!(map.error(), Some(BackendError::InvalidData(_))));
    assert!(map.map_markers().is_empty());
}

#[test]
fn test_stale_location_is_ignored() {
    let mut map = BoatMapComponent::new(MessageChannel::new("test"));
    map.handle_message(BoatMessage::new("b1"));
    map.handle_message(BoatMessage::new("b2"));
    assert_eq!(map.drain_actions(), vec![Action::Loading(WidgetId::Map), fetch("b1"), fetch("b2")]);

    map.on_location_loaded("b1", Ok(location(1.0, 1.0)));
    assert!(map.map_markers().is_empty());
    assert!(map.is_loading());
    assert!(map.drain_actions().is_empty());

    map.on_location_loaded("b2", Ok(location(2.0, 2.0)));
    assert_eq!(map.map_markers()[0].location.latitude, 2.0);
}

#[test]
fn test_pinning_releases_subscription() {
    let channel = MessageChannel::new("test");
    let mut map = BoatMapComponent::new(channel.clone());
    map.connect();
    assert_eq!(channel.subscriber_count(), 1);

    map.set_record_id("b5");
    assert!(!map.is_subscribed());
    assert_eq!(channel.subscriber_count(), 0);
    assert_eq!(map.boat_id(), Some("b5"));

    // Pinned maps cannot be re-activated
    map.connect();
    assert_eq!(channel.subscriber_count(), 0);
}

#[test]
fn test_clearing_boat_id() {
    let mut map = BoatMapComponent::new(MessageChannel::new("test"));
    map.handle_message(BoatMessage::new("b1"));
    map.on_location_loaded("b1", Ok(location(1.0, 2.0)));
    map.drain_actions();

    map.set_boat_id(None);
    assert!(map.map_markers().is_empty());
    assert!(map.drain_actions().is_empty());
}
