//! Core UI functionality for the Boatyard application.
//!
//! This module contains the building blocks every widget is made of:
//!
//! - [`actions`] - Requests, facility results and upward UI events
//! - [`component`] - Base component trait and rendering abstraction
//! - [`event_handler`] - Terminal input polling
//! - [`loading`] - Transition-only loading/doneloading signalling
//! - [`task_manager`] - Background execution of facility requests
//!
//! # Architecture
//!
//! Widgets never perform I/O. They queue [`Action`]s describing the facility
//! call they need, the container hands those to the [`TaskManager`], and the
//! results come back as actions routed to the widget that asked. Upward
//! events (selection, loading signals) travel the same way.

pub mod actions;
pub mod component;
pub mod event_handler;
pub mod loading;
pub mod task_manager;

// Re-export core types for easier access from other modules
pub use actions::{Action, RequestId, ResultsView, WidgetId};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
pub use loading::LoadingState;
pub use task_manager::{TaskId, TaskManager};
