// src/grid/systems/ai/control_handler.rs
use bevy::prelude::*;
use bevy_tokio_tasks::TokioTasksRuntime;

use crate::grid::events::{GridOperationFeedback, RequestColumnSynthesis, SynthesisTaskResult};
use crate::grid::resources::{Instructions, SynthesisState};

use super::service;
use super::SynthesisConfig;

/// Starts one synthesis batch per request: validates the preconditions on the
/// main thread, then runs the service round-trips on the Tokio runtime and
/// delivers the outcome back as a [`SynthesisTaskResult`] event.
pub fn handle_synthesis_request(
    mut events: EventReader<RequestColumnSynthesis>,
    instructions: Res<Instructions>,
    config: Res<SynthesisConfig>,
    mut state: ResMut<SynthesisState>,
    runtime: Option<Res<TokioTasksRuntime>>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for _ in events.read() {
        if state.in_flight {
            feedback_writer.write(GridOperationFeedback {
                message: "Column synthesis is already running.".to_string(),
                is_error: true,
            });
            continue;
        }

        let text = instructions.text().trim().to_string();
        if text.is_empty() {
            feedback_writer.write(GridOperationFeedback {
                message: "No instructions loaded. Load an instructions file first.".to_string(),
                is_error: true,
            });
            continue;
        }

        let Some(api_key) = config.api_key.clone() else {
            feedback_writer.write(GridOperationFeedback {
                message: "Synthesis service API key is not configured.".to_string(),
                is_error: true,
            });
            continue;
        };

        let Some(runtime) = runtime.as_deref() else {
            warn!("Synthesis requested but no async runtime is available.");
            feedback_writer.write(GridOperationFeedback {
                message: "Column synthesis is unavailable in this session.".to_string(),
                is_error: true,
            });
            continue;
        };

        state.in_flight = true;
        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;
        let config = config.clone();

        info!("Starting column synthesis (generation {}).", generation);
        runtime.spawn_background_task(move |mut ctx| async move {
            let client = reqwest::Client::new();
            let result = service::resolve_batch(&client, &config, &api_key, &text)
                .await
                .map_err(|e| e.to_string());
            ctx.run_on_main_thread(move |world_ctx| {
                world_ctx
                    .world
                    .send_event(SynthesisTaskResult { generation, result });
            })
            .await;
        });
    }
}
