// src/grid/systems/logic/set_options.rs
use bevy::prelude::*;

use crate::grid::{
    events::{GridOperationFeedback, RequestSetColumnOptions},
    resources::SchemaRegistry,
};

/// Replaces a column's option list wholesale. Existing row values are not
/// revalidated; a value orphaned by the new list stays in place and is
/// rejected on its next edit attempt.
pub fn handle_set_options_request(
    mut events: EventReader<RequestSetColumnOptions>,
    mut schema: ResMut<SchemaRegistry>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for event in events.read() {
        match schema.set_options(&event.field, event.options.clone()) {
            Ok(()) => {
                info!(
                    "Column '{}' now has {} option(s).",
                    event.field,
                    event.options.len()
                );
                feedback_writer.write(GridOperationFeedback {
                    message: format!("Options updated for '{}'.", schema.header_for(&event.field)),
                    is_error: false,
                });
            }
            Err(err) => {
                feedback_writer.write(GridOperationFeedback {
                    message: format!("Option update failed for '{}': {}", event.field, err),
                    is_error: true,
                });
            }
        }
    }
}
