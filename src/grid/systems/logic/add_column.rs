// src/grid/systems/logic/add_column.rs
use bevy::prelude::*;

use crate::grid::{
    events::{ColumnAddedEvent, GridOperationFeedback, RequestInsertColumn},
    resources::SchemaRegistry,
};
use crate::interaction::state::GridInteractionState;

/// Inserts a fresh generated metric column before/after the current column
/// selection (appended at the end when nothing is selected). Row back-fill is
/// triggered through `ColumnAddedEvent`.
pub fn handle_insert_column_request(
    mut events: EventReader<RequestInsertColumn>,
    mut schema: ResMut<SchemaRegistry>,
    selection: Res<GridInteractionState>,
    mut column_added_writer: EventWriter<ColumnAddedEvent>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for event in events.read() {
        let anchor = selection.selected_column().map(|s| s.to_string());
        let field = schema.insert_metric(anchor.as_deref(), event.side);

        let position = schema.position(&field).unwrap_or(0);
        info!(
            "Added column '{}' at position {} ({:?} of anchor {:?}).",
            field, position, event.side, anchor
        );
        column_added_writer.write(ColumnAddedEvent {
            field: field.clone(),
        });
        feedback_writer.write(GridOperationFeedback {
            message: format!("Added column '{}'.", field),
            is_error: false,
        });
    }
}
