// src/grid/systems/ai/results.rs
use bevy::prelude::*;

use crate::grid::definitions::{ColumnDefinition, MetricType, DEFAULT_COLUMN_WIDTH};
use crate::grid::events::{ColumnAddedEvent, GridOperationFeedback, SynthesisTaskResult};
use crate::grid::resources::{SchemaRegistry, SynthesisState};

/// Applies a finished synthesis batch to the schema. Results from a superseded
/// request (stale generation) are discarded without touching the schema.
pub fn handle_synthesis_results(
    mut events: EventReader<SynthesisTaskResult>,
    mut schema: ResMut<SchemaRegistry>,
    mut state: ResMut<SynthesisState>,
    mut column_added_writer: EventWriter<ColumnAddedEvent>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for event in events.read() {
        if event.generation != state.generation {
            trace!(
                "Discarding stale synthesis result (generation {} != {}).",
                event.generation,
                state.generation
            );
            continue;
        }
        state.in_flight = false;

        let proposals = match &event.result {
            Ok(proposals) => proposals,
            Err(message) => {
                error!("Column synthesis failed: {}", message);
                feedback_writer.write(GridOperationFeedback {
                    message: format!("Column synthesis failed: {}", message),
                    is_error: true,
                });
                continue;
            }
        };

        let mut added = 0usize;
        let mut skipped = 0usize;
        for proposal in proposals {
            let suggestion = &proposal.suggestion;
            if schema.has_field(&suggestion.field) {
                trace!("Skipping suggested column '{}': field exists.", suggestion.field);
                skipped += 1;
                continue;
            }
            let definition = ColumnDefinition {
                field: suggestion.field.clone(),
                header: suggestion.header_name.clone(),
                metric_type: suggestion.metric_type,
                options: if suggestion.metric_type == MetricType::Select {
                    proposal.options.clone()
                } else {
                    Vec::new()
                },
                width: DEFAULT_COLUMN_WIDTH,
            };
            if let Err(e) = schema.insert_column(definition) {
                warn!("Could not add suggested column '{}': {}", suggestion.field, e);
                skipped += 1;
                continue;
            }
            column_added_writer.write(ColumnAddedEvent {
                field: suggestion.field.clone(),
            });
            added += 1;
        }

        let message = if skipped == 0 {
            format!("Added {} suggested column(s).", added)
        } else {
            format!(
                "Added {} suggested column(s), skipped {} already present.",
                added, skipped
            )
        };
        info!("{}", message);
        feedback_writer.write(GridOperationFeedback {
            message,
            is_error: false,
        });
    }
}
