// src/interaction/state.rs
use bevy::prelude::Resource;
use std::collections::HashMap;

use crate::grid::definitions::RowId;

/// Address of one cell in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row_id: RowId,
    pub field: String,
}

impl CellRef {
    pub fn new(row_id: RowId, field: impl Into<String>) -> Self {
        CellRef {
            row_id,
            field: field.into(),
        }
    }
}

/// Edit mode of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellMode {
    #[default]
    View,
    Edit,
}

/// Selection and per-cell edit-mode state for one grid session.
///
/// Invariant: at most one cell is in `Edit` at any instant. `activate_cell`
/// always demotes the previous active cell before promoting the new one, so
/// the invariant holds across any sequence of click events.
#[derive(Resource, Default, Debug)]
pub struct GridInteractionState {
    active_cell: Option<CellRef>,
    selected_column: Option<String>,
    cell_modes: HashMap<CellRef, CellMode>,
}

impl GridInteractionState {
    pub fn active_cell(&self) -> Option<&CellRef> {
        self.active_cell.as_ref()
    }

    pub fn selected_column(&self) -> Option<&str> {
        self.selected_column.as_deref()
    }

    pub fn cell_mode(&self, cell: &CellRef) -> CellMode {
        self.cell_modes.get(cell).copied().unwrap_or_default()
    }

    /// Cells currently tracked in an explicit mode (the presentation
    /// boundary's edit-mode map).
    pub fn cell_modes(&self) -> &HashMap<CellRef, CellMode> {
        &self.cell_modes
    }

    pub fn select_column(&mut self, field: impl Into<String>) {
        self.selected_column = Some(field.into());
    }

    pub fn clear_column_selection(&mut self) {
        self.selected_column = None;
    }

    /// Transitions `cell` to Edit, demoting the previous active cell to View
    /// first. Clicking the already-active cell is a no-op.
    pub fn activate_cell(&mut self, cell: CellRef) {
        if self.active_cell.as_ref() == Some(&cell) {
            return;
        }
        if let Some(previous) = self.active_cell.take() {
            self.cell_modes.insert(previous, CellMode::View);
        }
        self.cell_modes.insert(cell.clone(), CellMode::Edit);
        self.active_cell = Some(cell);
        self.debug_assert_single_edit();
    }

    /// Commit-key transition: the cell returns to View but stays the active
    /// cell; the edit-stop trigger clears it independently. Both triggers may
    /// target the same cell without a double transition.
    pub fn commit_cell(&mut self, cell: &CellRef) {
        self.cell_modes.insert(cell.clone(), CellMode::View);
        self.debug_assert_single_edit();
    }

    /// Focus-loss / cancel transition: View, and the active cell is cleared
    /// if it is the one that stopped editing.
    pub fn deactivate_cell(&mut self, cell: &CellRef) {
        self.cell_modes.insert(cell.clone(), CellMode::View);
        if self.active_cell.as_ref() == Some(cell) {
            self.active_cell = None;
        }
        self.debug_assert_single_edit();
    }

    /// Drops all state referring to a removed column.
    pub fn purge_field(&mut self, field: &str) {
        self.cell_modes.retain(|cell, _| cell.field != field);
        if self
            .active_cell
            .as_ref()
            .is_some_and(|cell| cell.field == field)
        {
            self.active_cell = None;
        }
        if self.selected_column.as_deref() == Some(field) {
            self.selected_column = None;
        }
    }

    /// Drops all state referring to removed rows.
    pub fn purge_rows(&mut self, row_ids: &[RowId]) {
        self.cell_modes.retain(|cell, _| !row_ids.contains(&cell.row_id));
        if self
            .active_cell
            .as_ref()
            .is_some_and(|cell| row_ids.contains(&cell.row_id))
        {
            self.active_cell = None;
        }
    }

    fn debug_assert_single_edit(&self) {
        debug_assert!(
            self.cell_modes
                .values()
                .filter(|m| **m == CellMode::Edit)
                .count()
                <= 1,
            "more than one cell in Edit mode"
        );
    }
}
