// src/grid/systems/logic/add_row.rs
use bevy::prelude::*;

use crate::grid::{
    events::{AddRowRequest, GridOperationFeedback},
    resources::{RowRegistry, SchemaRegistry},
};

/// Appends a fresh row with every currently defined field set to the empty
/// string.
pub fn handle_add_row_request(
    mut events: EventReader<AddRowRequest>,
    schema: Res<SchemaRegistry>,
    mut rows: ResMut<RowRegistry>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for _ in events.read() {
        let id = rows.add_row(schema.columns().iter().map(|c| c.field.as_str()));
        info!("Added row {} ({} rows total).", id, rows.len());
        feedback_writer.write(GridOperationFeedback {
            message: "Row added.".to_string(),
            is_error: false,
        });
    }
}

/// Seeds the session with one empty row over the default schema, matching
/// the state a new workspace opens with.
pub fn seed_initial_row(schema: Res<SchemaRegistry>, mut rows: ResMut<RowRegistry>) {
    if rows.is_empty() {
        let id = rows.add_row(schema.columns().iter().map(|c| c.field.as_str()));
        trace!("Seeded initial row {}.", id);
    }
}
