//! Map pane showing the location of one boat.
//!
//! The map works in one of two modes. Given a fixed record id it always shows
//! that boat. Otherwise it listens on the boat channel once activated and
//! follows whatever boat is announced there.

use crate::backend::{BackendError, BOAT_LOCATION_FIELDS};
use crate::boat::{format_number, BoatId, Geolocation, MapMarker, RecordData, RecordField};
use crate::message_channel::{BoatMessage, MessageChannel, Subscription};
use crate::ui::core::{Action, Component, LoadingState, WidgetId};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, BorderType, Borders, Paragraph, Wrap,
    },
    Frame,
};

pub struct BoatMapComponent {
    channel: MessageChannel,
    subscription: Option<Subscription>,
    record_id: Option<BoatId>,
    boat_id: Option<BoatId>,
    error: Option<BackendError>,
    map_markers: Vec<MapMarker>,
    loading: LoadingState,
    resolution: MapResolution,
    outbox: Vec<Action>,
}

impl BoatMapComponent {
    pub fn new(channel: MessageChannel) -> Self {
        Self {
            channel,
            subscription: None,
            record_id: None,
            boat_id: None,
            error: None,
            map_markers: Vec::new(),
            loading: LoadingState::new(WidgetId::Map),
            resolution: MapResolution::Low,
            outbox: Vec::new(),
        }
    }

    /// Map pinned to one boat; it will never follow the channel
    pub fn with_record_id(channel: MessageChannel, record_id: impl Into<BoatId>) -> Self {
        let mut map = Self::new(channel);
        map.set_record_id(record_id);
        map
    }

    pub fn with_high_resolution(mut self, high: bool) -> Self {
        self.resolution = if high { MapResolution::High } else { MapResolution::Low };
        self
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    /// Pin the map to a boat.
    ///
    /// A fixed id and a channel subscription never coexist, so an active
    /// subscription is released here.
    pub fn set_record_id(&mut self, record_id: impl Into<BoatId>) {
        let record_id = record_id.into();
        if let Some(subscription) = self.subscription.take() {
            log::info!("BoatMap: pinned to {}, leaving {}", record_id, self.channel.name());
            self.channel.unsubscribe(subscription);
        }
        self.record_id = Some(record_id.clone());
        self.set_boat_id(Some(record_id));
    }

    pub fn boat_id(&self) -> Option<&str> {
        self.boat_id.as_deref()
    }

    /// Replace the working identifier and resolve its location
    pub fn set_boat_id(&mut self, boat_id: Option<BoatId>) {
        self.boat_id = boat_id;
        match &self.boat_id {
            Some(boat_id) => {
                self.outbox.extend(self.loading.notify(true));
                self.outbox.push(Action::FetchBoatLocation {
                    boat_id: boat_id.clone(),
                    fields: BOAT_LOCATION_FIELDS.to_vec(),
                });
            }
            None => {
                self.map_markers.clear();
                self.outbox.extend(self.loading.notify(false));
            }
        }
    }

    /// Activation: join the channel unless pinned or already joined
    pub fn connect(&mut self) {
        if self.subscription.is_some() || self.record_id.is_some() {
            return;
        }
        self.subscription = Some(self.channel.subscribe());
        log::info!("BoatMap: subscribed to {}", self.channel.name());
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn handle_message(&mut self, message: BoatMessage) {
        log::debug!("BoatMap: received recordId={}", message.record_id);
        self.set_boat_id(Some(message.record_id));
    }

    /// Apply every message delivered since the last poll, in order
    pub fn poll_messages(&mut self) -> usize {
        let mut messages = Vec::new();
        if let Some(subscription) = self.subscription.as_mut() {
            while let Some(message) = subscription.try_recv() {
                messages.push(message);
            }
        }
        let count = messages.len();
        for message in messages {
            self.handle_message(message);
        }
        count
    }

    /// Apply the outcome of a location fetch
    pub fn on_location_loaded(&mut self, boat_id: &str, result: Result<RecordData, BackendError>) {
        if self.boat_id.as_deref() != Some(boat_id) {
            log::debug!("BoatMap: ignoring stale location for {}", boat_id);
            return;
        }

        let location = result.and_then(|data| {
            match (data.number(RecordField::Latitude), data.number(RecordField::Longitude)) {
                (Some(latitude), Some(longitude)) => Ok(Geolocation { latitude, longitude }),
                _ => Err(BackendError::InvalidData(format!("Boat {} has no geolocation", boat_id))),
            }
        });

        match location {
            Ok(location) => {
                self.error = None;
                self.update_map(location);
            }
            Err(error) => {
                log::warn!("BoatMap: failed to resolve {}: {}", boat_id, error);
                self.error = Some(error);
                self.boat_id = None;
                self.map_markers.clear();
            }
        }
        self.outbox.extend(self.loading.notify(false));
    }

    fn update_map(&mut self, location: Geolocation) {
        self.map_markers = vec![MapMarker { location }];
    }

    pub fn map_markers(&self) -> &[MapMarker] {
        &self.map_markers
    }

    pub fn show_map(&self) -> bool {
        !self.map_markers.is_empty()
    }

    pub fn error(&self) -> Option<&BackendError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    fn title(&self) -> String {
        match (&self.record_id, &self.boat_id) {
            (Some(_), _) => " Boat Location (pinned) ".to_string(),
            (None, Some(_)) => " Boat Location ".to_string(),
            (None, None) => " Boat Location (select a boat) ".to_string(),
        }
    }
}

impl Component for BoatMapComponent {
    fn init(&mut self) -> anyhow::Result<()> {
        self.connect();
        Ok(())
    }

    fn update(&mut self, action: &Action) {
        if let Action::BoatLocationLoaded { boat_id, result } = action {
            self.on_location_loaded(boat_id, result.clone());
        }
    }

    fn drain_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.outbox)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(self.title())
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        if !self.show_map() {
            let text = match &self.error {
                Some(error) => Line::styled(error.to_string(), Style::default().fg(Color::Red)),
                None if self.is_loading() => Line::styled("Locating boat...", Style::default().fg(Color::Yellow)),
                None => Line::styled("Select a boat to see where it is moored", Style::default().fg(Color::Gray)),
            };
            let paragraph = Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, rect);
            return;
        }

        let coords: Vec<(f64, f64)> = self
            .map_markers
            .iter()
            .map(|marker| (marker.location.longitude, marker.location.latitude))
            .collect();
        let caption = self.map_markers.first().map(|marker| {
            format!(
                "⛵ {}, {}",
                format_number(marker.location.latitude),
                format_number(marker.location.longitude)
            )
        });
        let resolution = self.resolution;

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([-180.0, 180.0])
            .y_bounds([-90.0, 90.0])
            .paint(move |ctx| {
                ctx.draw(&Map {
                    color: Color::DarkGray,
                    resolution,
                });
                ctx.layer();
                ctx.draw(&Points {
                    coords: &coords,
                    color: Color::Yellow,
                });
                if let (Some(caption), Some((x, y))) = (&caption, coords.first()) {
                    ctx.print(*x, *y, caption.clone());
                }
            });
        f.render_widget(canvas, rect);
    }
}
