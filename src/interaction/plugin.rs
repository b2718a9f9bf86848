// src/interaction/plugin.rs
use bevy::prelude::*;

use crate::grid::GridSystemSet;
use crate::interaction::events::*;
use crate::interaction::state::GridInteractionState;
use crate::interaction::systems;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GridInteractionState>();

        app.add_event::<CellClicked>()
            .add_event::<CellCommitKeyPressed>()
            .add_event::<CellEditStopped>()
            .add_event::<ColumnHeaderClicked>();

        app.add_systems(
            Update,
            (
                systems::handle_cell_clicked,
                systems::handle_cell_commit_key,
                systems::handle_cell_edit_stopped,
                systems::handle_column_header_clicked,
            )
                .in_set(GridSystemSet::UserInput),
        );
        app.add_systems(
            Update,
            systems::handle_structural_cleanup.in_set(GridSystemSet::Maintenance),
        );
    }
}
