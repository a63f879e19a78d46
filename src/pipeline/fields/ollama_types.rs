//! Ollama wire types, error taxonomy, and endpoint validators for the
//! structured field extraction call.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Wire types
// ──────────────────────────────────────────────

/// Request body for Ollama `/api/generate` with a JSON-schema `format`.
#[derive(Debug, Serialize)]
pub struct StructuredGenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub system: &'a str,
    /// JSON schema the output must follow.
    pub format: &'a serde_json::Value,
    pub stream: bool,
    pub options: &'a GenerationOptions,
}

/// Response body from Ollama `/api/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
}

/// Response body from Ollama `/api/tags`.
#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
pub struct TagModel {
    pub name: String,
}

/// Generation parameters for Ollama `/api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Sampling temperature. Coordinates must be echoed verbatim, so 0.
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_ctx: Option<u32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            top_p: 0.9,
            top_k: 40,
            num_predict: None,
            num_ctx: None,
        }
    }
}

// ──────────────────────────────────────────────
// Error Taxonomy
// ──────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum OllamaError {
    #[error("Ollama is not running at {0}")]
    NotReachable(String),

    #[error("Ollama returned an error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid model name: '{0}'")]
    InvalidModelName(String),

    #[error("Only localhost connections are allowed")]
    NonLocalEndpoint,

    #[error("Invalid URL format")]
    InvalidUrl,

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<OllamaError> for super::FieldsError {
    fn from(err: OllamaError) -> Self {
        match err {
            OllamaError::NotReachable(url) => super::FieldsError::OllamaConnection(url),
            OllamaError::ApiError { status, message } => super::FieldsError::OllamaError {
                status,
                body: message,
            },
            OllamaError::Timeout(secs) => {
                super::FieldsError::HttpClient(format!("Request timed out after {secs}s"))
            }
            OllamaError::Network(msg) => super::FieldsError::HttpClient(msg),
            other => super::FieldsError::HttpClient(other.to_string()),
        }
    }
}

// ──────────────────────────────────────────────
// Validators
// ──────────────────────────────────────────────

static MODEL_NAME_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9][a-zA-Z0-9._-]*(/[a-zA-Z0-9][a-zA-Z0-9._-]*)?(:[a-zA-Z0-9._-]+)?$",
    )
    .expect("static regex")
});

/// Accept only loopback endpoints: record text never leaves the machine.
/// Accepts `localhost`, `127.0.0.1` and `[::1]`.
pub fn validate_base_url(url: &str) -> Result<(), OllamaError> {
    let after_scheme = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or(OllamaError::InvalidUrl)?;

    let host = if after_scheme.starts_with('[') {
        after_scheme
            .split(']')
            .next()
            .unwrap_or("")
            .trim_start_matches('[')
    } else {
        after_scheme
            .split(':')
            .next()
            .unwrap_or("")
            .split('/')
            .next()
            .unwrap_or("")
    };

    match host {
        "localhost" | "127.0.0.1" | "::1" => Ok(()),
        "" => Err(OllamaError::InvalidUrl),
        _ => Err(OllamaError::NonLocalEndpoint),
    }
}

/// Validate `[namespace/]model[:tag]` before it goes into a request body.
pub fn validate_model_name(name: &str) -> Result<(), OllamaError> {
    if MODEL_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(OllamaError::InvalidModelName(name.to_string()))
    }
}
