//! Reusable UI components

pub mod boat_map;
pub mod boat_search_results;
pub mod boat_tile;
pub mod logs_panel;
pub mod status_bar;

// Component exports
pub use boat_map::BoatMapComponent;
pub use boat_search_results::BoatSearchResultsComponent;
pub use boat_tile::BoatTileComponent;
pub use logs_panel::LogsPanel;
pub use status_bar::StatusBar;
