//! Boat type repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryOrder};

use crate::entities::boat_type;

/// Repository for boat type database operations.
pub struct BoatTypeRepository;

impl BoatTypeRepository {
    /// Get all boat types ordered by name.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<boat_type::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(boat_type::Entity::find()
            .order_by_asc(boat_type::Column::Name)
            .all(conn)
            .await?)
    }

    /// Insert a new boat type.
    pub async fn insert<C>(conn: &C, model: boat_type::Model) -> Result<boat_type::Model>
    where
        C: ConnectionTrait,
    {
        Ok(model.into_active_model().reset_all().insert(conn).await?)
    }
}
