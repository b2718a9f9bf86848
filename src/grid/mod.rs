// src/grid/mod.rs
pub mod definitions;
pub mod error;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod systems;
pub mod validation;

pub use plugin::{GridPlugin, GridSystemSet};
