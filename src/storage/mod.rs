//! Local storage module for the boat catalog
//!
//! This module provides database operations using SeaORM for:
//! - Boat types
//! - Boats (including geolocation)
//!
//! and seeding of an empty catalog from a JSON file or the demo fleet.

pub mod db;
pub mod seed;

pub use db::LocalStorage;
pub use seed::CatalogSeed;
