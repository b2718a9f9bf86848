// src/grid/systems/io/mod.rs
use std::fs;
use std::path::Path;

use bevy::prelude::*;

use crate::grid::error::InstructionsError;
use crate::grid::events::{
    GridOperationFeedback, RequestClearInstructions, RequestLoadInstructionsFile,
};
use crate::grid::resources::Instructions;

pub const MAX_INSTRUCTIONS_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Reads an instructions file, enforcing the `.txt` extension and the size
/// cap before touching the contents.
pub fn load_instructions_file(path: &Path) -> Result<String, InstructionsError> {
    let is_txt = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if !is_txt {
        return Err(InstructionsError::WrongExtension(path.to_path_buf()));
    }

    let size = fs::metadata(path)?.len();
    if size > MAX_INSTRUCTIONS_FILE_BYTES {
        return Err(InstructionsError::Oversize {
            size,
            limit: MAX_INSTRUCTIONS_FILE_BYTES,
        });
    }

    Ok(fs::read_to_string(path)?)
}

pub fn handle_load_instructions_file(
    mut events: EventReader<RequestLoadInstructionsFile>,
    mut instructions: ResMut<Instructions>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for event in events.read() {
        match load_instructions_file(&event.path) {
            Ok(text) => {
                info!(
                    "Loaded instructions file '{}' ({} bytes).",
                    event.path.display(),
                    text.len()
                );
                instructions.set(text);
                feedback_writer.write(GridOperationFeedback {
                    message: "Instructions loaded.".to_string(),
                    is_error: false,
                });
            }
            Err(e) => {
                warn!("Rejected instructions file '{}': {}", event.path.display(), e);
                feedback_writer.write(GridOperationFeedback {
                    message: e.to_string(),
                    is_error: true,
                });
            }
        }
    }
}

pub fn handle_clear_instructions(
    mut events: EventReader<RequestClearInstructions>,
    mut instructions: ResMut<Instructions>,
) {
    for _ in events.read() {
        instructions.clear();
        trace!("Instructions cleared.");
    }
}
