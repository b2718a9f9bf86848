// src/interaction/events.rs
use bevy::prelude::Event;

use crate::grid::definitions::RowId;

/// Pointer click on a cell body.
#[derive(Event, Debug, Clone)]
pub struct CellClicked {
    pub row_id: RowId,
    pub field: String,
}

/// Commit key (Enter) pressed while a cell is being edited.
#[derive(Event, Debug, Clone)]
pub struct CellCommitKeyPressed {
    pub row_id: RowId,
    pub field: String,
}

/// Why the grid widget reported that editing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStopReason {
    FocusLost,
    CancelKey,
}

/// The grid widget's editing-stop notification (focus loss or Escape).
#[derive(Event, Debug, Clone)]
pub struct CellEditStopped {
    pub row_id: RowId,
    pub field: String,
    pub reason: EditStopReason,
}

/// Pointer click on a column header: selects that column.
#[derive(Event, Debug, Clone)]
pub struct ColumnHeaderClicked {
    pub field: String,
}
