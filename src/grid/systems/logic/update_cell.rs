// src/grid/systems/logic/update_cell.rs
use bevy::prelude::*;

use crate::grid::{
    error::RowError,
    events::{GridOperationFeedback, RowSnapshotEdited, UpdateCellEvent},
    resources::{RowRegistry, SchemaRegistry},
};

/// Validated single-cell commit. On rejection the row is left exactly as it
/// was and the error is labeled with the column's display header.
pub fn handle_update_cell_request(
    mut events: EventReader<UpdateCellEvent>,
    schema: Res<SchemaRegistry>,
    mut rows: ResMut<RowRegistry>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for event in events.read() {
        apply_cell_update(
            &schema,
            &mut rows,
            event,
            &mut feedback_writer,
        );
    }
}

/// Snapshot commit path: a grid widget hands back the whole proposed row; we
/// apply only the first field that differs from the stored row, reflecting
/// the single-cell-at-a-time editing model.
pub fn handle_row_snapshot_edited(
    mut events: EventReader<RowSnapshotEdited>,
    schema: Res<SchemaRegistry>,
    mut rows: ResMut<RowRegistry>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for event in events.read() {
        let Some((field, new_value)) = rows.first_changed_field(event.row_id, &event.proposed)
        else {
            trace!("Row {} snapshot unchanged; skipping.", event.row_id);
            continue;
        };
        apply_cell_update(
            &schema,
            &mut rows,
            &UpdateCellEvent {
                row_id: event.row_id,
                field,
                new_value,
            },
            &mut feedback_writer,
        );
    }
}

fn apply_cell_update(
    schema: &SchemaRegistry,
    rows: &mut RowRegistry,
    event: &UpdateCellEvent,
    feedback_writer: &mut EventWriter<GridOperationFeedback>,
) {
    let Some(column) = schema.column(&event.field) else {
        feedback_writer.write(GridOperationFeedback {
            message: format!("Cell update failed: no column with field '{}'.", event.field),
            is_error: true,
        });
        return;
    };

    match rows.update_cell(
        event.row_id,
        &event.field,
        &event.new_value,
        column.metric_type,
        &column.options,
    ) {
        Ok(()) => {
            trace!(
                "Cell [{}, {}] updated to '{}'.",
                event.row_id,
                event.field,
                event.new_value
            );
            feedback_writer.write(GridOperationFeedback {
                message: "Cell updated.".to_string(),
                is_error: false,
            });
        }
        Err(RowError::InvalidValue { value, .. }) => {
            feedback_writer.write(GridOperationFeedback {
                message: format!("Invalid value '{}' for \"{}\".", value, column.header),
                is_error: true,
            });
        }
        Err(err) => {
            warn!("Cell update failed: {}", err);
            feedback_writer.write(GridOperationFeedback {
                message: format!("Cell update failed: {}", err),
                is_error: true,
            });
        }
    }
}
