//! Local catalog backend implementation.

use async_trait::async_trait;
use sea_orm::TransactionTrait;
use serde_json::Value;

use super::{BackendError, BoatQuery, BoatUpdate, RecordFetch};
use crate::boat::{Boat, BoatDraft, BoatType, Geolocation, RecordData, RecordField};
use crate::entities::{boat, boat_type};
use crate::repositories::{BoatRepository, BoatTypeRepository};
use crate::storage::LocalStorage;

/// Facility implementation over the local SQLite catalog.
#[derive(Clone)]
pub struct LocalBackend {
    storage: LocalStorage,
}

impl LocalBackend {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    // Helper: Transform stored boat → domain boat
    fn boat_from_model(model: boat::Model) -> Boat {
        let geolocation = match (model.latitude, model.longitude) {
            (Some(latitude), Some(longitude)) => Some(Geolocation { latitude, longitude }),
            _ => None,
        };
        Boat {
            id: model.id,
            name: model.name,
            boat_type_id: model.boat_type_id,
            length: model.length,
            price: model.price,
            description: model.description,
            picture: model.picture,
            geolocation,
        }
    }

    fn boat_type_from_model(model: boat_type::Model) -> BoatType {
        BoatType {
            id: model.id,
            name: model.name,
        }
    }

    fn field_value(model: &boat::Model, field: RecordField) -> Value {
        match field {
            RecordField::Name => Value::from(model.name.clone()),
            RecordField::Length => Value::from(model.length),
            RecordField::Price => Value::from(model.price),
            RecordField::Description => Value::from(model.description.clone()),
            RecordField::Picture => Value::from(model.picture.clone()),
            RecordField::Latitude => model.latitude.map(Value::from).unwrap_or(Value::Null),
            RecordField::Longitude => model.longitude.map(Value::from).unwrap_or(Value::Null),
        }
    }

    /// Reject drafts the store would not accept
    fn validate_draft(draft: &BoatDraft) -> Result<(), BackendError> {
        if let Some(name) = &draft.name {
            if name.trim().is_empty() {
                return Err(BackendError::InvalidData(format!("Boat {}: name cannot be empty", draft.id)));
            }
        }
        for (label, value) in [("length", draft.length), ("price", draft.price)] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(BackendError::InvalidData(format!(
                        "Boat {}: {} must be a non-negative number",
                        draft.id, label
                    )));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RecordFetch for LocalBackend {
    async fn get_record(&self, record_id: &str, fields: &[RecordField]) -> Result<RecordData, BackendError> {
        let model = BoatRepository::get_by_id(&self.storage.conn, record_id)
            .await?
            .ok_or_else(|| BackendError::NotFound(format!("No boat with id '{}'", record_id)))?;

        Ok(fields.iter().fold(RecordData::new(), |data, field| {
            data.with_field(*field, Self::field_value(&model, *field))
        }))
    }
}

#[async_trait]
impl BoatQuery for LocalBackend {
    async fn get_boats(&self, boat_type_id: &str) -> Result<Vec<Boat>, BackendError> {
        let models = if boat_type_id.is_empty() {
            BoatRepository::get_all(&self.storage.conn).await?
        } else {
            BoatRepository::get_for_type(&self.storage.conn, boat_type_id).await?
        };
        log::debug!("Loaded {} boat(s) for type '{}'", models.len(), boat_type_id);
        Ok(models.into_iter().map(Self::boat_from_model).collect())
    }

    async fn get_boat_types(&self) -> Result<Vec<BoatType>, BackendError> {
        let models = BoatTypeRepository::get_all(&self.storage.conn).await?;
        Ok(models.into_iter().map(Self::boat_type_from_model).collect())
    }
}

#[async_trait]
impl BoatUpdate for LocalBackend {
    async fn update_boat_list(&self, data: &[BoatDraft]) -> Result<(), BackendError> {
        for draft in data {
            Self::validate_draft(draft)?;
        }

        let txn = self
            .storage
            .conn
            .begin()
            .await
            .map_err(|e| BackendError::Storage(e.to_string()))?;

        for draft in data.iter().filter(|draft| !draft.is_empty()) {
            let failure = match BoatRepository::apply_draft(&txn, draft).await {
                Ok(Some(_)) => continue,
                Ok(None) => BackendError::NotFound(format!("No boat with id '{}'", draft.id)),
                Err(e) => BackendError::from(e),
            };
            log::warn!("Batch update rolled back: {}", failure);
            txn.rollback().await.map_err(|e| BackendError::Storage(e.to_string()))?;
            return Err(failure);
        }

        txn.commit().await.map_err(|e| BackendError::Storage(e.to_string()))?;
        log::info!("Updated {} boat(s)", data.len());
        Ok(())
    }
}
