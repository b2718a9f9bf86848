// src/interaction/mod.rs
pub mod events;
pub mod plugin;
pub mod state;
pub mod systems;

pub use plugin::InteractionPlugin;
pub use state::{CellMode, CellRef, GridInteractionState};
