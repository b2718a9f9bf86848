// src/lib.rs
//! Headless engine for an interactive report grid: a tabular dataset whose
//! column set is editable at runtime, with validated cell edits, a cell/column
//! selection state machine, and an optional service-backed column synthesis
//! flow. Front-ends drive it by sending request events and observing feedback
//! and notification events.

pub mod grid;
pub mod interaction;

use bevy::prelude::*;

pub use grid::definitions::{ColumnDefinition, MetricType, RowId, RowRecord};
pub use grid::events::GridOperationFeedback;
pub use grid::resources::{RowRegistry, SchemaRegistry};
pub use grid::{GridPlugin, GridSystemSet};
pub use interaction::{CellMode, CellRef, GridInteractionState, InteractionPlugin};

/// Adds the full editor engine: registries, interaction state, and every
/// request handler.
pub struct GridEditorPlugin;

impl Plugin for GridEditorPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((GridPlugin, InteractionPlugin));
    }
}
