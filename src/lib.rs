// Time Grid Interaction Library
// Drag-to-create/move/resize engine for a weekly time grid

pub mod clamp;
pub mod collision;
pub mod config;
pub mod drag;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod models;
pub mod snap;
pub mod utils;

pub use config::GridConfig;
pub use engine::{CalendarType, EditionMode, GridCallbacks, GridView, TimeGridEngine};
pub use error::GridError;
