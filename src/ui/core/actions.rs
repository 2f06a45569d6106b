use crate::backend::BackendError;
use crate::boat::{Boat, BoatDraft, BoatId, BoatType, RecordData, RecordField};

/// Identifies which widget raised a loading signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetId {
    Map,
    SearchResults,
}

/// Sequence number of a list query; only the latest one is applied
pub type RequestId = u64;

/// Which pane of the results is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultsView {
    #[default]
    Gallery,
    Editor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Facility requests raised by widgets
    FetchBoatLocation {
        boat_id: BoatId,
        fields: Vec<RecordField>,
    },
    QueryBoats {
        request: RequestId,
        boat_type_id: String,
    },
    UpdateBoats {
        drafts: Vec<BoatDraft>,
    },
    LoadBoatTypes,

    // Facility results delivered back to widgets
    BoatLocationLoaded {
        boat_id: BoatId,
        result: Result<RecordData, BackendError>,
    },
    BoatsLoaded {
        request: RequestId,
        result: Result<Vec<Boat>, BackendError>,
    },
    BoatsUpdated(Result<(), BackendError>),
    BoatTypesLoaded(Result<Vec<BoatType>, BackendError>),

    // Upward UI events
    Loading(WidgetId),
    DoneLoading(WidgetId),
    BoatSelect {
        boat_id: Option<BoatId>,
    },

    // App control
    SwitchView(ResultsView),
    NextBoatType,
    ToggleLogs,
    Quit,
    None,
}

impl Action {
    /// Whether this action asks a facility for work
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Self::FetchBoatLocation { .. } | Self::QueryBoats { .. } | Self::UpdateBoats { .. } | Self::LoadBoatTypes
        )
    }
}
