// src/grid/systems/logic/rename_column.rs
use bevy::prelude::*;

use crate::grid::{
    events::{GridOperationFeedback, RequestRenameColumn},
    resources::SchemaRegistry,
};

/// Updates a column's display label. Cosmetic only; the field identity and
/// every row key stay untouched.
pub fn handle_rename_column_request(
    mut events: EventReader<RequestRenameColumn>,
    mut schema: ResMut<SchemaRegistry>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for event in events.read() {
        let old_header = schema.header_for(&event.field);
        match schema.rename_column(&event.field, &event.new_header) {
            Ok(()) => {
                let msg = format!(
                    "Renamed column '{}' to '{}'.",
                    old_header,
                    event.new_header.trim()
                );
                info!("{}", msg);
                feedback_writer.write(GridOperationFeedback {
                    message: msg,
                    is_error: false,
                });
            }
            Err(err) => {
                feedback_writer.write(GridOperationFeedback {
                    message: format!("Rename failed for '{}': {}", event.field, err),
                    is_error: true,
                });
            }
        }
    }
}
