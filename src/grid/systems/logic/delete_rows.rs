// src/grid/systems/logic/delete_rows.rs
use bevy::prelude::*;

use crate::grid::{
    events::{GridOperationFeedback, RequestClearRows, RequestDeleteRows, RowsRemovedEvent},
    resources::RowRegistry,
};

/// Removes specific rows by identity; unknown ids are skipped.
pub fn handle_delete_rows_request(
    mut events: EventReader<RequestDeleteRows>,
    mut rows: ResMut<RowRegistry>,
    mut rows_removed_writer: EventWriter<RowsRemovedEvent>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for event in events.read() {
        if event.row_ids.is_empty() {
            trace!("Skipping delete rows request: no ids provided.");
            continue;
        }
        let removed = rows.remove_rows(&event.row_ids);
        if removed == 0 {
            feedback_writer.write(GridOperationFeedback {
                message: "No matching rows to delete.".to_string(),
                is_error: true,
            });
            continue;
        }
        rows_removed_writer.write(RowsRemovedEvent {
            row_ids: event.row_ids.clone(),
        });
        feedback_writer.write(GridOperationFeedback {
            message: format!("Deleted {} row(s).", removed),
            is_error: false,
        });
    }
}

/// Clears every row. The confirmation step guarding this lives in the
/// presentation layer.
pub fn handle_clear_rows_request(
    mut events: EventReader<RequestClearRows>,
    mut rows: ResMut<RowRegistry>,
    mut rows_removed_writer: EventWriter<RowsRemovedEvent>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for _ in events.read() {
        let removed_ids = rows.clear();
        info!("Cleared table ({} rows removed).", removed_ids.len());
        if !removed_ids.is_empty() {
            rows_removed_writer.write(RowsRemovedEvent {
                row_ids: removed_ids,
            });
        }
        feedback_writer.write(GridOperationFeedback {
            message: "Table cleared.".to_string(),
            is_error: false,
        });
    }
}
