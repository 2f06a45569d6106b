use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;

use crate::entities::{boat, boat_type};
use crate::repositories::BoatRepository;

/// Local catalog storage backed by SQLite
#[derive(Clone)]
pub struct LocalStorage {
    pub(crate) conn: DatabaseConnection,
    // Keeps a shared in-memory database alive while the pool recycles connections
    _anchor: Option<DatabaseConnection>,
}

impl LocalStorage {
    /// Open a private in-memory catalog
    pub async fn new() -> Result<Self> {
        let database_url = format!("sqlite:file:boatyard_{}?mode=memory&cache=shared", uuid::Uuid::new_v4().simple());
        let anchor = Database::connect(Self::connect_options(&database_url))
            .await
            .context("Failed to open in-memory catalog")?;
        let mut storage = Self::open(&database_url).await?;
        storage._anchor = Some(anchor);
        Ok(storage)
    }

    /// Open (and create if needed) the catalog at `database_url`
    pub async fn open(database_url: &str) -> Result<Self> {
        let conn = Database::connect(Self::connect_options(database_url))
            .await
            .with_context(|| format!("Failed to connect to catalog database: {}", database_url))?;

        let storage = LocalStorage { conn, _anchor: None };
        storage.init_schema().await?;
        log::info!("Catalog storage ready at {}", database_url);
        Ok(storage)
    }

    fn connect_options(database_url: &str) -> ConnectOptions {
        let mut options = ConnectOptions::new(database_url.to_string());
        options
            .min_connections(1)
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .sqlx_logging(false);
        options
    }

    /// Initialize database schema
    async fn init_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut boat_types = schema.create_table_from_entity(boat_type::Entity);
        boat_types.if_not_exists();
        self.conn.execute(backend.build(&boat_types)).await?;

        let mut boats = schema.create_table_from_entity(boat::Entity);
        boats.if_not_exists();
        self.conn.execute(backend.build(&boats)).await?;

        Ok(())
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Check if the catalog has any boats
    pub async fn has_data(&self) -> Result<bool> {
        Ok(BoatRepository::count(&self.conn).await? > 0)
    }
}
