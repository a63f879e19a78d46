use serde_json::Value;

use super::parser::parse_fields_response;
use super::prompt::{build_fields_prompt, FIELDS_SYSTEM_PROMPT};
use super::schema::fields_schema;
use super::types::{FieldsOutcome, NoFieldsReason, StructuredLlmClient};

/// Everything one extraction call saw and produced.
#[derive(Debug, Clone)]
pub struct ExtractionTrace {
    pub prompt: String,
    /// Raw model text. `None` when the call itself failed.
    pub raw_response: Option<String>,
    pub outcome: FieldsOutcome,
}

/// Best-effort structured field extraction from serialized OCR lines.
///
/// This is the trust boundary: the response either validates against
/// `fields_schema()` as a whole or is discarded. No retries.
pub struct FieldExtractionClient {
    llm: Box<dyn StructuredLlmClient + Send + Sync>,
    model_name: String,
    schema: Value,
}

impl FieldExtractionClient {
    pub fn new(llm: Box<dyn StructuredLlmClient + Send + Sync>, model_name: &str) -> Self {
        Self {
            llm,
            model_name: model_name.to_string(),
            schema: fields_schema(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn extract(&self, serialized_lines: &str) -> FieldsOutcome {
        self.extract_traced(serialized_lines).outcome
    }

    pub fn extract_traced(&self, serialized_lines: &str) -> ExtractionTrace {
        let _span = tracing::info_span!(
            "field_extraction",
            model = %self.model_name,
            input_len = serialized_lines.len(),
        )
        .entered();
        let start = std::time::Instant::now();

        let prompt = build_fields_prompt(serialized_lines);

        let raw = match self.llm.generate_structured(
            &self.model_name,
            &prompt,
            FIELDS_SYSTEM_PROMPT,
            &self.schema,
        ) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Field extraction call failed");
                return ExtractionTrace {
                    prompt,
                    raw_response: None,
                    outcome: FieldsOutcome::NoFields(NoFieldsReason::from(e)),
                };
            }
        };

        let outcome = match parse_fields_response(&raw) {
            Ok(fields) => {
                tracing::info!(
                    mentions = fields.total_mentions(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Field extraction complete"
                );
                FieldsOutcome::Found(fields)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    response_len = raw.len(),
                    "Field extraction response rejected"
                );
                FieldsOutcome::NoFields(NoFieldsReason::from(e))
            }
        };

        ExtractionTrace {
            prompt,
            raw_response: Some(raw),
            outcome,
        }
    }
}
