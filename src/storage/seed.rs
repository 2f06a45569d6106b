//! Catalog seeding.
//!
//! An empty catalog is filled either from a JSON seed file or from the demo
//! fleet below. Boats may omit their `id`; one is generated on insert.

use anyhow::{Context, Result};
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::LocalStorage;
use crate::entities::{boat, boat_type};
use crate::repositories::{BoatRepository, BoatTypeRepository};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub boat_types: Vec<SeedBoatType>,
    #[serde(default)]
    pub boats: Vec<SeedBoat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedBoatType {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedBoat {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub boat_type_id: Option<String>,
    pub length: f64,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl CatalogSeed {
    /// Read a seed from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read seed file: {}", path.as_ref().display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse seed file: {}", path.as_ref().display()))
    }

    /// The built-in demo fleet
    pub fn demo() -> Self {
        let types = [("sail", "Sailboat"), ("motor", "Motorboat"), ("fish", "Fishing Boat"), ("party", "Party Barge")];

        #[allow(clippy::type_complexity)]
        let boats: [(&str, &str, f64, f64, &str, (f64, f64)); 8] = [
            ("Sea Breeze", "sail", 32.0, 145000.0, "Classic sloop rigged cruiser", (37.8087, -122.4098)),
            ("Windward", "sail", 41.0, 289000.0, "Blue water ketch, sleeps six", (41.4901, -71.3128)),
            ("Full Throttle", "motor", 28.0, 98000.0, "Twin outboard center console", (25.7617, -80.1918)),
            ("Harbor Master", "motor", 36.0, 210000.0, "Express cruiser with hardtop", (47.6062, -122.3321)),
            ("Reel Deal", "fish", 24.0, 56000.0, "Bay boat with live well", (29.9511, -90.0715)),
            ("Tuna Town", "fish", 31.0, 134000.0, "Offshore sportfisher", (41.6688, -70.2962)),
            ("Good Times", "party", 22.0, 38000.0, "Pontoon with bimini top", (43.6591, -70.2568)),
            ("Sunset Cruiser", "party", 26.0, 47500.0, "Tritoon, seats fourteen", (44.9778, -93.2650)),
        ];

        Self {
            boat_types: types
                .iter()
                .map(|(id, name)| SeedBoatType {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            boats: boats
                .iter()
                .map(|(name, boat_type, length, price, description, (lat, lon))| SeedBoat {
                    id: None,
                    name: name.to_string(),
                    boat_type_id: Some(boat_type.to_string()),
                    length: *length,
                    price: *price,
                    description: description.to_string(),
                    picture: format!("/resource/boats/{}.jpg", name.to_lowercase().replace(' ', "_")),
                    latitude: Some(*lat),
                    longitude: Some(*lon),
                })
                .collect(),
        }
    }

    /// Insert the seed into `storage` in a single transaction
    pub async fn apply(&self, storage: &LocalStorage) -> Result<usize> {
        let txn = storage.conn.begin().await?;

        for boat_type in &self.boat_types {
            BoatTypeRepository::insert(
                &txn,
                boat_type::Model {
                    id: boat_type.id.clone(),
                    name: boat_type.name.clone(),
                },
            )
            .await
            .with_context(|| format!("Failed to insert boat type '{}'", boat_type.id))?;
        }

        for seed in &self.boats {
            let id = seed
                .id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            BoatRepository::insert(
                &txn,
                boat::Model {
                    id,
                    name: seed.name.clone(),
                    boat_type_id: seed.boat_type_id.clone(),
                    length: seed.length,
                    price: seed.price,
                    description: seed.description.clone(),
                    picture: seed.picture.clone(),
                    latitude: seed.latitude,
                    longitude: seed.longitude,
                },
            )
            .await
            .with_context(|| format!("Failed to insert boat '{}'", seed.name))?;
        }

        txn.commit().await?;
        log::info!(
            "Seeded catalog with {} boat type(s) and {} boat(s)",
            self.boat_types.len(),
            self.boats.len()
        );
        Ok(self.boats.len())
    }
}
