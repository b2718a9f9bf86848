// src/grid/systems/logic/resize_column.rs
use bevy::prelude::*;

use crate::grid::{
    events::{GridOperationFeedback, RequestResizeColumn},
    resources::SchemaRegistry,
};

/// Updates a column's rendered width. Presentation-only; never validated
/// against content, only against positivity.
pub fn handle_resize_column_request(
    mut events: EventReader<RequestResizeColumn>,
    mut schema: ResMut<SchemaRegistry>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for event in events.read() {
        match schema.resize_column(&event.field, event.new_width) {
            Ok(()) => {
                trace!(
                    "Column '{}' resized to {}px.",
                    event.field,
                    event.new_width
                );
            }
            Err(err) => {
                feedback_writer.write(GridOperationFeedback {
                    message: format!("Resize failed for '{}': {}", event.field, err),
                    is_error: true,
                });
            }
        }
    }
}
