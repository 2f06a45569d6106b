//! Boatyard - A terminal boat rental and sales catalog
//!
//! Browse boats as a gallery of tiles, bulk-edit them in a grid and see the
//! selected boat on a world map. The three widgets never reference each other:
//! selections travel over an application-scoped broadcast channel and data is
//! requested from pluggable catalog facilities.
//!
//! # Modules
//!
//! * [`boat`] - Boat records, drafts and field helpers
//! * [`backend`] - Record fetch, list query and batch update facilities
//! * [`message_channel`] - Application-scoped publish/subscribe registry
//! * [`notifications`] - Toast notifications
//! * [`storage`] - Local SQLite catalog
//! * [`ui`] - Terminal user interface components

/// Facility traits and the local catalog backend
pub mod backend;

/// Boat domain types
pub mod boat;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Broadcast channel shared by the widgets
pub mod message_channel;

/// Toast notification facility
pub mod notifications;

/// Repository layer for database operations
pub mod repositories;

/// Local storage layer for the boat catalog
pub mod storage;

/// Terminal user interface components and rendering
pub mod ui;
