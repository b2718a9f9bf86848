// src/grid/plugin.rs
use bevy::prelude::*;

use crate::grid::events::*;
use crate::grid::resources::{Instructions, RowRegistry, SchemaRegistry, SynthesisState};
use crate::grid::systems;
use crate::grid::systems::ai::SynthesisConfig;
use crate::grid::systems::logic::*;

// System sets for ordering
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GridSystemSet {
    UserInput,    // Systems reacting directly to interaction events
    ApplyChanges, // Systems mutating the schema and row registries
    Maintenance,  // Systems reconciling derived state after mutations
}

pub struct GridPlugin;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GridSystemSet::UserInput,
                GridSystemSet::ApplyChanges.after(GridSystemSet::UserInput),
                GridSystemSet::Maintenance.after(GridSystemSet::ApplyChanges),
            ),
        );

        // --- Resource Initialization ---
        app.init_resource::<SchemaRegistry>();
        app.init_resource::<crate::interaction::GridInteractionState>();
        app.init_resource::<RowRegistry>();
        app.init_resource::<Instructions>();
        app.init_resource::<SynthesisState>();
        if !app.world().contains_resource::<SynthesisConfig>() {
            app.insert_resource(SynthesisConfig::from_env());
        }

        // --- Event Registration ---
        app.add_event::<RequestInsertColumn>()
            .add_event::<RequestDeleteColumn>()
            .add_event::<RequestDeleteSelectedColumn>()
            .add_event::<RequestRetypeColumn>()
            .add_event::<RequestRenameColumn>()
            .add_event::<RequestResizeColumn>()
            .add_event::<RequestSetColumnOptions>()
            .add_event::<AddRowRequest>()
            .add_event::<RequestDeleteRows>()
            .add_event::<RequestClearRows>()
            .add_event::<UpdateCellEvent>()
            .add_event::<RowSnapshotEdited>()
            .add_event::<ColumnAddedEvent>()
            .add_event::<ColumnRemovedEvent>()
            .add_event::<RowsRemovedEvent>()
            .add_event::<OpenOptionsEditorEvent>()
            .add_event::<GridOperationFeedback>()
            .add_event::<RequestColumnSynthesis>()
            .add_event::<SynthesisTaskResult>()
            .add_event::<RequestLoadInstructionsFile>()
            .add_event::<RequestClearInstructions>();

        // --- Startup Systems ---
        app.add_systems(Startup, seed_initial_row);

        // --- Update Systems (Organized into Sets) ---
        app.add_systems(
            Update,
            (
                systems::io::handle_load_instructions_file,
                systems::io::handle_clear_instructions,
            )
                .in_set(GridSystemSet::UserInput),
        );
        app.add_systems(
            Update,
            (
                // Selection-based deletion forwards to the plain delete
                // handler, so the pair is chained for same-frame handling.
                (
                    handle_delete_selected_column_request,
                    handle_delete_column_request,
                )
                    .chain(),
                handle_insert_column_request,
                handle_retype_column_request,
                handle_rename_column_request,
                handle_resize_column_request,
                handle_set_options_request,
                handle_add_row_request,
                handle_delete_rows_request,
                handle_clear_rows_request,
                handle_update_cell_request,
                handle_row_snapshot_edited,
                systems::ai::handle_synthesis_request,
                systems::ai::handle_synthesis_results,
            )
                .in_set(GridSystemSet::ApplyChanges),
        );
        app.add_systems(
            Update,
            sync_rows_with_schema.in_set(GridSystemSet::Maintenance),
        );

        info!("GridPlugin initialized.");
    }
}
