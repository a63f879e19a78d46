use std::sync::Mutex;

use super::ollama_types::{
    validate_base_url, validate_model_name, GenerateResponse, GenerationOptions, OllamaError,
    StructuredGenerateRequest, TagsResponse,
};
use super::types::StructuredLlmClient;
use super::FieldsError;

/// Ollama HTTP client for schema-constrained local inference.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
    options: GenerationOptions,
}

impl OllamaClient {
    /// Create a client for a local Ollama instance.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, OllamaError> {
        validate_base_url(base_url)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| OllamaError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
            options: GenerationOptions::default(),
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> OllamaError {
        if e.is_connect() {
            OllamaError::NotReachable(self.base_url.clone())
        } else if e.is_timeout() {
            OllamaError::Timeout(self.timeout_secs)
        } else {
            OllamaError::Network(e.to_string())
        }
    }

    /// Names of installed models (`/api/tags`).
    pub fn list_models(&self) -> Result<Vec<String>, OllamaError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(OllamaError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: TagsResponse = response
            .json()
            .map_err(|e| OllamaError::Network(e.to_string()))?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }

    pub fn is_model_available(&self, model: &str) -> Result<bool, OllamaError> {
        let models = self.list_models()?;
        Ok(models.iter().any(|m| model_matches(m, model)))
    }
}

/// Exact tag match; a bare name stands for its `:latest` tag.
fn model_matches(installed: &str, requested: &str) -> bool {
    if installed == requested {
        return true;
    }
    !requested.contains(':') && installed.strip_suffix(":latest") == Some(requested)
}

impl StructuredLlmClient for OllamaClient {
    fn generate_structured(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
        schema: &serde_json::Value,
    ) -> Result<String, FieldsError> {
        validate_model_name(model)?;

        let url = format!("{}/api/generate", self.base_url);
        let body = StructuredGenerateRequest {
            model,
            prompt,
            system,
            format: schema,
            stream: false,
            options: &self.options,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FieldsError::OllamaError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| FieldsError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }
}

/// Mock client for tests and offline replay — returns a configured response
/// and remembers the last prompt it was given.
pub struct MockLlmClient {
    response: Option<String>,
    last_prompt: Mutex<Option<String>>,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            last_prompt: Mutex::new(None),
        }
    }

    /// A client whose every call fails as if Ollama were down.
    pub fn unreachable() -> Self {
        Self {
            response: None,
            last_prompt: Mutex::new(None),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

impl StructuredLlmClient for MockLlmClient {
    fn generate_structured(
        &self,
        _model: &str,
        prompt: &str,
        _system: &str,
        _schema: &serde_json::Value,
    ) -> Result<String, FieldsError> {
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        self.response
            .clone()
            .ok_or_else(|| FieldsError::OllamaConnection("mock".into()))
    }
}
