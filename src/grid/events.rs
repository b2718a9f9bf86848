// src/grid/events.rs
use bevy::prelude::Event;
use std::collections::HashMap;
use std::path::PathBuf;

use super::definitions::{MetricType, RowId};
use super::systems::ai::service::ResolvedProposal;

/// Which side of the selected column a new column is spliced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertSide {
    Before,
    After,
}

/// Insert a fresh generated `metric{N}` column relative to the current column
/// selection; appended at the end when nothing is selected.
#[derive(Event, Debug, Clone)]
pub struct RequestInsertColumn {
    pub side: InsertSide,
}

/// Remove a specific column by field identity.
#[derive(Event, Debug, Clone)]
pub struct RequestDeleteColumn {
    pub field: String,
}

/// Remove the currently selected column. Only generated `metric*` columns can
/// be removed through the selection path; the confirmation dialog is owned by
/// the presentation layer.
#[derive(Event, Debug, Clone)]
pub struct RequestDeleteSelectedColumn;

/// Change a column's value type. Rejected wholesale if any existing row value
/// fails validation against the new type.
#[derive(Event, Debug, Clone)]
pub struct RequestRetypeColumn {
    pub field: String,
    pub new_type: MetricType,
}

/// Change a column's display label. Cosmetic; field identity is untouched.
#[derive(Event, Debug, Clone)]
pub struct RequestRenameColumn {
    pub field: String,
    pub new_header: String,
}

/// Change a column's rendered width. Presentation-only.
#[derive(Event, Debug, Clone)]
pub struct RequestResizeColumn {
    pub field: String,
    pub new_width: u32,
}

/// Replace a column's option list wholesale. Existing row values are not
/// revalidated; stale values surface on the next edit attempt.
#[derive(Event, Debug, Clone)]
pub struct RequestSetColumnOptions {
    pub field: String,
    pub options: Vec<String>,
}

/// Append a fresh empty row over the current field set.
#[derive(Event, Debug, Clone)]
pub struct AddRowRequest;

/// Remove specific rows by identity.
#[derive(Event, Debug, Clone)]
pub struct RequestDeleteRows {
    pub row_ids: Vec<RowId>,
}

/// Remove every row ("clear table"; confirmation is presentation's job).
#[derive(Event, Debug, Clone)]
pub struct RequestClearRows;

/// Commit a single cell value after validation.
#[derive(Event, Debug, Clone)]
pub struct UpdateCellEvent {
    pub row_id: RowId,
    pub field: String,
    pub new_value: String,
}

/// Commit path used by grid widgets that hand back a whole row snapshot:
/// only the first field that differs from the stored row is applied.
#[derive(Event, Debug, Clone)]
pub struct RowSnapshotEdited {
    pub row_id: RowId,
    pub proposed: HashMap<String, String>,
}

/// Notification that a column now exists; the row store back-fills it.
#[derive(Event, Debug, Clone)]
pub struct ColumnAddedEvent {
    pub field: String,
}

/// Notification that a column is gone; the row store strips it and the
/// interaction state drops any selection/modes referring to it.
#[derive(Event, Debug, Clone)]
pub struct ColumnRemovedEvent {
    pub field: String,
}

/// Notification that rows were removed (or all cleared); interaction state
/// drops any modes referring to them.
#[derive(Event, Debug, Clone)]
pub struct RowsRemovedEvent {
    pub row_ids: Vec<RowId>,
}

/// Ask the presentation layer to open the option-editing dialog for a Select
/// column (emitted on retype-to-select and on clicking a Select cell whose
/// option list is empty).
#[derive(Event, Debug, Clone)]
pub struct OpenOptionsEditorEvent {
    pub field: String,
}

/// Operation outcome surfaced to the presentation layer as a transient,
/// auto-dismissing message.
#[derive(Event, Debug, Clone)]
pub struct GridOperationFeedback {
    pub message: String,
    pub is_error: bool,
}

/// Kick off a column-synthesis batch from the current instructions text.
/// Refused (not queued) while a batch is already in flight.
#[derive(Event, Debug, Clone)]
pub struct RequestColumnSynthesis;

/// Resolved outcome of one synthesis batch, delivered back on the main
/// thread. `generation` identifies the request; stale results are discarded.
#[derive(Event, Debug, Clone)]
pub struct SynthesisTaskResult {
    pub generation: u64,
    pub result: Result<Vec<ResolvedProposal>, String>,
}

/// Load the instructions text from a plain-text file (`.txt`, at most 5 MB).
#[derive(Event, Debug, Clone)]
pub struct RequestLoadInstructionsFile {
    pub path: PathBuf,
}

/// Empty the instructions text.
#[derive(Event, Debug, Clone)]
pub struct RequestClearInstructions;
