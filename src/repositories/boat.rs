//! Boat repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set};

use crate::boat::BoatDraft;
use crate::entities::boat;

/// Repository for boat-related database operations.
pub struct BoatRepository;

impl BoatRepository {
    /// Get all boats ordered by name.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<boat::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(boat::Entity::find().order_by_asc(boat::Column::Name).all(conn).await?)
    }

    /// Get all boats of one type ordered by name.
    pub async fn get_for_type<C>(conn: &C, boat_type_id: &str) -> Result<Vec<boat::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(boat::Entity::find()
            .filter(boat::Column::BoatTypeId.eq(boat_type_id))
            .order_by_asc(boat::Column::Name)
            .all(conn)
            .await?)
    }

    /// Get a single boat by id.
    pub async fn get_by_id<C>(conn: &C, id: &str) -> Result<Option<boat::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(boat::Entity::find_by_id(id.to_string()).one(conn).await?)
    }

    /// Insert a new boat.
    pub async fn insert<C>(conn: &C, model: boat::Model) -> Result<boat::Model>
    where
        C: ConnectionTrait,
    {
        Ok(model.into_active_model().reset_all().insert(conn).await?)
    }

    /// Apply the drafted fields to an existing boat, `None` if it does not exist.
    pub async fn apply_draft<C>(conn: &C, draft: &BoatDraft) -> Result<Option<boat::Model>>
    where
        C: ConnectionTrait,
    {
        let Some(existing) = Self::get_by_id(conn, &draft.id).await? else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        if let Some(name) = &draft.name {
            active.name = Set(name.clone());
        }
        if let Some(length) = draft.length {
            active.length = Set(length);
        }
        if let Some(price) = draft.price {
            active.price = Set(price);
        }
        if let Some(description) = &draft.description {
            active.description = Set(description.clone());
        }

        Ok(Some(active.update(conn).await?))
    }

    /// Count stored boats.
    pub async fn count<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        use sea_orm::PaginatorTrait;
        Ok(boat::Entity::find().count(conn).await?)
    }
}
