//! Data facility abstraction layer.
//!
//! The widgets never talk to a store directly. They describe what they need as
//! actions and the task manager calls one of the facilities defined here:
//! record fetch (single record, selected fields), list query (boats by type)
//! and batch update (draft edits, all-or-nothing).

use async_trait::async_trait;

use crate::boat::{Boat, BoatDraft, BoatType, RecordData, RecordField};

pub mod local;

/// Common error types for facility operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Backend error: {0}")]
    Other(String),
}

impl BackendError {
    /// Human-readable message without the category prefix, shown in toasts
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg) | Self::InvalidData(msg) | Self::Storage(msg) | Self::Other(msg) => msg,
        }
    }
}

impl From<anyhow::Error> for BackendError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Fields the map asks for when resolving a boat's position
pub const BOAT_LOCATION_FIELDS: [RecordField; 2] = [RecordField::Latitude, RecordField::Longitude];

/// Fetch selected fields of one record.
#[async_trait]
pub trait RecordFetch: Send + Sync {
    async fn get_record(&self, record_id: &str, fields: &[RecordField]) -> Result<RecordData, BackendError>;
}

/// Query the boat list, optionally filtered by boat type.
#[async_trait]
pub trait BoatQuery: Send + Sync {
    /// An empty `boat_type_id` returns every boat
    async fn get_boats(&self, boat_type_id: &str) -> Result<Vec<Boat>, BackendError>;

    async fn get_boat_types(&self) -> Result<Vec<BoatType>, BackendError>;
}

/// Apply a batch of draft edits. Either every draft is applied or none is.
#[async_trait]
pub trait BoatUpdate: Send + Sync {
    async fn update_boat_list(&self, data: &[BoatDraft]) -> Result<(), BackendError>;
}

/// Everything the application needs from a catalog backend.
pub trait BoatDataService: RecordFetch + BoatQuery + BoatUpdate {}

impl<T> BoatDataService for T where T: RecordFetch + BoatQuery + BoatUpdate {}
