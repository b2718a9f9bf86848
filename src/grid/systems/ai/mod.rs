// src/grid/systems/ai/mod.rs
pub mod control_handler;
pub mod results;
pub mod service;

pub use control_handler::handle_synthesis_request;
pub use results::handle_synthesis_results;
pub use service::{ColumnSuggestion, ResolvedProposal, SynthesisError};

use bevy::prelude::*;

const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Connection settings for the column-suggestion service, read once from the
/// environment (a `.env` file is honored if present).
#[derive(Resource, Debug, Clone)]
pub struct SynthesisConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl SynthesisConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            endpoint: std::env::var("REPORTGRID_SYNTHESIS_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            model: std::env::var("REPORTGRID_SYNTHESIS_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_key: std::env::var("OPENAI_API_KEY").ok(),
        }
    }
}
