// src/grid/systems/logic/retype_column.rs
use bevy::prelude::*;

use crate::grid::{
    definitions::MetricType,
    events::{GridOperationFeedback, OpenOptionsEditorEvent, RequestRetypeColumn},
    resources::{RowRegistry, SchemaRegistry},
    validation::validate_cell_value,
};

/// Changes a column's value type, all-or-nothing: every existing row value
/// must pass validation against the new type (with the current options), or
/// the whole operation is rejected and the offending values reported.
pub fn handle_retype_column_request(
    mut events: EventReader<RequestRetypeColumn>,
    mut schema: ResMut<SchemaRegistry>,
    rows: Res<RowRegistry>,
    mut options_editor_writer: EventWriter<OpenOptionsEditorEvent>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for event in events.read() {
        let Some(column) = schema.column(&event.field) else {
            feedback_writer.write(GridOperationFeedback {
                message: format!("Retype failed: no column with field '{}'.", event.field),
                is_error: true,
            });
            continue;
        };
        let header = column.header.clone();
        let options = column.options.clone();

        let invalid_values: Vec<String> = rows
            .values_for_field(&event.field)
            .filter(|v| !validate_cell_value(v, event.new_type, &options))
            .map(|v| format!("'{}'", v))
            .collect();
        if !invalid_values.is_empty() {
            warn!(
                "Retype of '{}' to {} rejected: {} invalid value(s).",
                event.field,
                event.new_type,
                invalid_values.len()
            );
            feedback_writer.write(GridOperationFeedback {
                message: format!(
                    "Cannot change '{}' to {}: existing values {} do not match the new type.",
                    header,
                    event.new_type,
                    invalid_values.join(", ")
                ),
                is_error: true,
            });
            continue;
        }

        if let Err(err) = schema.retype_column(&event.field, event.new_type) {
            feedback_writer.write(GridOperationFeedback {
                message: format!("Retype failed: {}", err),
                is_error: true,
            });
            continue;
        }

        info!("Column '{}' is now type {}.", event.field, event.new_type);
        if event.new_type == MetricType::Select {
            // Options are populated by the external options dialog.
            options_editor_writer.write(OpenOptionsEditorEvent {
                field: event.field.clone(),
            });
        }
        feedback_writer.write(GridOperationFeedback {
            message: format!("Column '{}' is now type {}.", header, event.new_type),
            is_error: false,
        });
    }
}
