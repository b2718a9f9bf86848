// src/grid/systems/logic/delete_column.rs
use bevy::prelude::*;

use crate::grid::{
    events::{
        ColumnRemovedEvent, GridOperationFeedback, RequestDeleteColumn,
        RequestDeleteSelectedColumn,
    },
    resources::{SchemaRegistry, METRIC_FIELD_PREFIX},
};
use crate::interaction::state::GridInteractionState;

/// Removes a column by field identity. Row strip and selection cleanup are
/// driven by the `ColumnRemovedEvent` notification.
pub fn handle_delete_column_request(
    mut events: EventReader<RequestDeleteColumn>,
    mut schema: ResMut<SchemaRegistry>,
    mut column_removed_writer: EventWriter<ColumnRemovedEvent>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for event in events.read() {
        match schema.remove_column(&event.field) {
            Ok(removed) => {
                info!("Deleted column '{}' ('{}').", removed.field, removed.header);
                column_removed_writer.write(ColumnRemovedEvent {
                    field: removed.field.clone(),
                });
                feedback_writer.write(GridOperationFeedback {
                    message: format!("Deleted column '{}'.", removed.header),
                    is_error: false,
                });
            }
            Err(err) => {
                warn!("Delete column failed: {}", err);
                feedback_writer.write(GridOperationFeedback {
                    message: format!("Delete column failed: {}", err),
                    is_error: true,
                });
            }
        }
    }
}

/// Removes the currently selected column. The selection path only deletes
/// generated `metric*` columns; default columns stay untouchable from here.
pub fn handle_delete_selected_column_request(
    mut events: EventReader<RequestDeleteSelectedColumn>,
    selection: Res<GridInteractionState>,
    mut delete_writer: EventWriter<RequestDeleteColumn>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for _ in events.read() {
        let Some(field) = selection.selected_column() else {
            feedback_writer.write(GridOperationFeedback {
                message: "No column selected for deletion.".to_string(),
                is_error: true,
            });
            continue;
        };
        if !field.starts_with(METRIC_FIELD_PREFIX) {
            feedback_writer.write(GridOperationFeedback {
                message: format!("Column '{}' is a default column and cannot be deleted.", field),
                is_error: true,
            });
            continue;
        }
        delete_writer.write(RequestDeleteColumn {
            field: field.to_string(),
        });
    }
}
