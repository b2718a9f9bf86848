// src/grid/systems/logic/row_sync.rs
use bevy::prelude::*;

use crate::grid::{
    events::{ColumnAddedEvent, ColumnRemovedEvent},
    resources::RowRegistry,
};

/// Keeps every row's key set equal to the schema's field set by reacting to
/// column change notifications. The row store never reads the schema store
/// directly, so both stay independently testable.
pub fn sync_rows_with_schema(
    mut added: EventReader<ColumnAddedEvent>,
    mut removed: EventReader<ColumnRemovedEvent>,
    mut rows: ResMut<RowRegistry>,
) {
    for event in added.read() {
        rows.backfill_field(&event.field);
        trace!("Back-filled field '{}' on {} row(s).", event.field, rows.len());
    }
    for event in removed.read() {
        rows.strip_field(&event.field);
        trace!("Stripped field '{}' from {} row(s).", event.field, rows.len());
    }
}
