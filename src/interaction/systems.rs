// src/interaction/systems.rs
use bevy::prelude::*;

use crate::grid::definitions::MetricType;
use crate::grid::events::{ColumnRemovedEvent, OpenOptionsEditorEvent, RowsRemovedEvent};
use crate::grid::resources::SchemaRegistry;

use super::events::{
    CellClicked, CellCommitKeyPressed, CellEditStopped, ColumnHeaderClicked,
};
use super::state::{CellRef, GridInteractionState};

/// Handles cell clicks. Clicking a Select cell whose option list is empty
/// does not enter Edit mode; it asks the presentation layer to open the
/// options dialog instead.
pub fn handle_cell_clicked(
    mut events: EventReader<CellClicked>,
    mut state: ResMut<GridInteractionState>,
    schema: Res<SchemaRegistry>,
    mut options_editor_writer: EventWriter<OpenOptionsEditorEvent>,
) {
    for event in events.read() {
        let cell = CellRef::new(event.row_id, event.field.clone());
        if state.active_cell() == Some(&cell) {
            continue;
        }

        if let Some(column) = schema.column(&event.field) {
            if column.metric_type == MetricType::Select && column.options.is_empty() {
                trace!(
                    "Select column '{}' has no options; opening options editor instead of edit mode.",
                    event.field
                );
                options_editor_writer.write(OpenOptionsEditorEvent {
                    field: event.field.clone(),
                });
                continue;
            }
        }

        state.activate_cell(cell);
    }
}

/// Commit key returns the cell to View; the active-cell slot is cleared by
/// the independent editing-stop trigger.
pub fn handle_cell_commit_key(
    mut events: EventReader<CellCommitKeyPressed>,
    mut state: ResMut<GridInteractionState>,
) {
    for event in events.read() {
        let cell = CellRef::new(event.row_id, event.field.clone());
        state.commit_cell(&cell);
    }
}

/// Focus loss or cancel key: back to View, clearing the active cell when it
/// is the one that stopped.
pub fn handle_cell_edit_stopped(
    mut events: EventReader<CellEditStopped>,
    mut state: ResMut<GridInteractionState>,
) {
    for event in events.read() {
        let cell = CellRef::new(event.row_id, event.field.clone());
        state.deactivate_cell(&cell);
    }
}

pub fn handle_column_header_clicked(
    mut events: EventReader<ColumnHeaderClicked>,
    mut state: ResMut<GridInteractionState>,
) {
    for event in events.read() {
        state.select_column(event.field.clone());
    }
}

/// Keeps the interaction state consistent with structural mutations: a
/// removed column drops its selection and modes, removed rows drop theirs.
pub fn handle_structural_cleanup(
    mut column_removed: EventReader<ColumnRemovedEvent>,
    mut rows_removed: EventReader<RowsRemovedEvent>,
    mut state: ResMut<GridInteractionState>,
) {
    for event in column_removed.read() {
        state.purge_field(&event.field);
    }
    for event in rows_removed.read() {
        state.purge_rows(&event.row_ids);
    }
}
