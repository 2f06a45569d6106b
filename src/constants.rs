//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

// Application
pub const APP_NAME: &str = "boatyard";
pub const CONFIG_FILE_NAME: &str = "boatyard.toml";
pub const LOG_FILE_NAME: &str = "boatyard.log";

// Broadcast channel carrying the selected boat
pub const BOAT_MESSAGE_CHANNEL: &str = "BoatMessageChannel";

// Tile classes
pub const TILE_WRAPPER_SELECTED_CLASS: &str = "tile-wrapper selected";
pub const TILE_WRAPPER_UNSELECTED_CLASS: &str = "tile-wrapper";

// Save outcome toasts
pub const SUCCESS_TITLE: &str = "Success";
pub const MESSAGE_SHIP_IT: &str = "Ship it!";
pub const ERROR_TITLE: &str = "Error";

// Toast lifetime bounds (seconds)
pub const DEFAULT_TOAST_SECONDS: u64 = 4;
pub const TOAST_MIN_SECONDS: u64 = 1;
pub const TOAST_MAX_SECONDS: u64 = 60;

// Gallery tile geometry (terminal cells)
pub const TILE_WIDTH: u16 = 28;
pub const TILE_HEIGHT: u16 = 7;

// Status bar text
pub const STATUS_LOADING: &str = "⏳ Loading boats...";
pub const STATUS_HINTS: &str = "Tab: view • ↑↓: move • Enter: select • e: edit • s: save • x: discard • t: type • r: refresh • q: quit";
pub const LABEL_ALL_TYPES: &str = "All Types";

// Config messages
pub const CONFIG_GENERATED: &str = "✅ Configuration file generated";
