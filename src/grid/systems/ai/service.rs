// src/grid/systems/ai/service.rs
//! Client for the external column-suggestion service: an OpenAI-style
//! chat-completions endpoint that returns JSON payloads in the assistant
//! message content.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::definitions::MetricType;

use super::SynthesisConfig;

/// One column proposed by the suggestion service (wire format, camelCase).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSuggestion {
    pub field: String,
    pub header_name: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

/// A suggestion with its option list already fetched (empty for non-Select
/// columns and for failed option fetches), ready to apply to the schema.
#[derive(Debug, Clone)]
pub struct ResolvedProposal {
    pub suggestion: ColumnSuggestion,
    pub options: Vec<String>,
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("request to suggestion service failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("suggestion service returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("suggestion service response was malformed: {0}")]
    MalformedResponse(String),
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageBody,
}

#[derive(Deserialize)]
struct ChatMessageBody {
    content: String,
}

async fn chat(
    client: &reqwest::Client,
    config: &SynthesisConfig,
    api_key: &str,
    system_prompt: &str,
    user_prompt: String,
    max_tokens: u32,
) -> Result<String, SynthesisError> {
    let request = ChatRequest {
        model: &config.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system_prompt.to_string(),
            },
            ChatMessage {
                role: "user",
                content: user_prompt,
            },
        ],
        temperature: 0.7,
        max_tokens,
    };

    let url = format!(
        "{}/chat/completions",
        config.endpoint.trim_end_matches('/')
    );
    let response = client
        .post(url)
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SynthesisError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let body: ChatResponse = response.json().await?;
    body.choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| SynthesisError::MalformedResponse("response contained no choices".into()))
}

/// Strips an optional markdown code fence around the returned JSON.
fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// First call: instructions text in, ordered column proposals out.
pub async fn analyze_instructions(
    client: &reqwest::Client,
    config: &SynthesisConfig,
    api_key: &str,
    instructions: &str,
) -> Result<Vec<ColumnSuggestion>, SynthesisError> {
    let user_prompt = format!(
        "Analyze the following instructions for a student report and suggest appropriate \
         columns for a data table. The columns should help teachers track and evaluate \
         student progress.\n\nInstructions:\n{}\n\n\
         Respond with a JSON array of objects, each with:\n\
         - field: unique identifier for the column\n\
         - headerName: display name\n\
         - type: one of 'text', 'number', or 'select'\n\
         - description: brief explanation of what this column measures\n\
         - options: (optional) array of possible values for select type columns\n\n\
         Focus on practical, measurable aspects that teachers can easily track.",
        instructions
    );
    let content = chat(
        client,
        config,
        api_key,
        "You are a helpful assistant that analyzes educational requirements and suggests \
         appropriate data columns for tracking student progress.",
        user_prompt,
        1000,
    )
    .await?;

    serde_json::from_str(extract_json(&content))
        .map_err(|e| SynthesisError::MalformedResponse(format!("invalid suggestion list: {}", e)))
}

/// Second call: option list for one proposed Select column.
pub async fn generate_column_options(
    client: &reqwest::Client,
    config: &SynthesisConfig,
    api_key: &str,
    header_name: &str,
    description: &str,
) -> Result<Vec<String>, SynthesisError> {
    let user_prompt = format!(
        "Generate appropriate options for a select column in a student report.\n\
         Column: {}\nDescription: {}\n\n\
         Respond with a JSON array of 3-5 mutually exclusive option strings.",
        header_name, description
    );
    let content = chat(
        client,
        config,
        api_key,
        "You are a helpful assistant that generates appropriate options for educational \
         assessment columns.",
        user_prompt,
        500,
    )
    .await?;

    serde_json::from_str(extract_json(&content))
        .map_err(|e| SynthesisError::MalformedResponse(format!("invalid option list: {}", e)))
}

/// Runs one whole batch: the analysis call, then an option fetch per Select
/// proposal that arrived without options. A failed option fetch leaves that
/// column's list empty; a failed analysis call fails the batch.
pub async fn resolve_batch(
    client: &reqwest::Client,
    config: &SynthesisConfig,
    api_key: &str,
    instructions: &str,
) -> Result<Vec<ResolvedProposal>, SynthesisError> {
    let suggestions = analyze_instructions(client, config, api_key, instructions).await?;

    let mut resolved = Vec::with_capacity(suggestions.len());
    for suggestion in suggestions {
        let options = if suggestion.metric_type == MetricType::Select {
            match suggestion.options.clone().filter(|o| !o.is_empty()) {
                Some(inline) => inline,
                None => generate_column_options(
                    client,
                    config,
                    api_key,
                    &suggestion.header_name,
                    &suggestion.description,
                )
                .await
                .unwrap_or_else(|e| {
                    bevy::log::warn!(
                        "Option fetch failed for '{}': {}. Leaving options empty.",
                        suggestion.header_name,
                        e
                    );
                    Vec::new()
                }),
            }
        } else {
            Vec::new()
        };
        resolved.push(ResolvedProposal {
            suggestion,
            options,
        });
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response per accepted connection, in order.
    async fn serve_responses(listener: TcpListener, responses: Vec<(u16, String)>) {
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 64 * 1024];
            let mut read = 0;
            loop {
                let n = stream.read(&mut buf[read..]).await.unwrap();
                if n == 0 {
                    break;
                }
                read += n;
                let head = String::from_utf8_lossy(&buf[..read]).to_string();
                if let Some(header_end) = head.find("\r\n\r\n") {
                    let content_length = head
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if read >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            let reason = if status == 200 { "OK" } else { "Internal Server Error" };
            let response = format!(
                "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
        }
    }

    fn chat_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{ "message": { "content": content } }]
        })
        .to_string()
    }

    async fn local_config() -> (TcpListener, SynthesisConfig) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/v1", listener.local_addr().unwrap());
        let config = SynthesisConfig {
            endpoint,
            model: "gpt-4".to_string(),
            api_key: Some("test-key".to_string()),
        };
        (listener, config)
    }

    #[tokio::test]
    async fn option_fetch_failure_empties_only_that_column() {
        let (listener, config) = local_config().await;
        let analysis = r#"[
            {"field": "motivation", "headerName": "Motivation", "type": "select", "description": "d"},
            {"field": "attendance", "headerName": "Attendance", "type": "number", "description": "d"}
        ]"#;
        let server = tokio::spawn(serve_responses(
            listener,
            vec![
                (200, chat_body(analysis)),
                (500, r#"{"error": "overloaded"}"#.to_string()),
            ],
        ));

        let client = reqwest::Client::new();
        let resolved = resolve_batch(&client, &config, "test-key", "track motivation")
            .await
            .unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].suggestion.field, "motivation");
        assert!(resolved[0].options.is_empty());
        assert_eq!(resolved[1].suggestion.field, "attendance");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn failed_analysis_call_aborts_the_batch() {
        let (listener, config) = local_config().await;
        let server = tokio::spawn(serve_responses(
            listener,
            vec![(500, r#"{"error": "overloaded"}"#.to_string())],
        ));

        let client = reqwest::Client::new();
        let result = resolve_batch(&client, &config, "test-key", "anything").await;
        assert!(matches!(result, Err(SynthesisError::Api { status: 500, .. })));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn inline_options_skip_the_second_call() {
        let (listener, config) = local_config().await;
        let analysis = r#"[
            {"field": "grade", "headerName": "Grade", "type": "select",
             "description": "d", "options": ["A", "B", "C"]}
        ]"#;
        // One response only: fetching options anyway would fail and wrongly
        // empty the list.
        let server = tokio::spawn(serve_responses(listener, vec![(200, chat_body(analysis))]));

        let client = reqwest::Client::new();
        let resolved = resolve_batch(&client, &config, "test-key", "grades")
            .await
            .unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].options, vec!["A", "B", "C"]);
        server.await.unwrap();
    }

    #[test]
    fn suggestion_wire_format_is_camel_case() {
        let json = r#"{
            "field": "motivation",
            "headerName": "Motivation",
            "type": "select",
            "description": "How motivated the student is",
            "options": ["low", "medium", "high"]
        }"#;
        let suggestion: ColumnSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(suggestion.field, "motivation");
        assert_eq!(suggestion.header_name, "Motivation");
        assert_eq!(suggestion.metric_type, MetricType::Select);
        assert_eq!(suggestion.options.as_deref(), Some(&["low".to_string(), "medium".to_string(), "high".to_string()][..]));
    }

    #[test]
    fn suggestion_tolerates_missing_optional_fields() {
        let json = r#"{"field": "attendance", "headerName": "Attendance", "type": "number"}"#;
        let suggestion: ColumnSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(suggestion.metric_type, MetricType::Number);
        assert!(suggestion.description.is_empty());
        assert!(suggestion.options.is_none());
    }

    #[test]
    fn extract_json_unwraps_code_fences() {
        assert_eq!(extract_json("[1, 2]"), "[1, 2]");
        assert_eq!(extract_json("```json\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(extract_json("```\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn unknown_type_is_malformed_not_a_crash() {
        let json = r#"[{"field": "x", "headerName": "X", "type": "date"}]"#;
        let parsed: Result<Vec<ColumnSuggestion>, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }
}
