use serde::{Deserialize, Deserializer, Serialize};

use super::FieldsError;

/// The fixed set of semantic slots extracted from a record.
///
/// Declaration order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldCategory {
    Name,
    DateOfBirth,
    Address,
    CauseOfDeath,
}

impl FieldCategory {
    pub const ALL: [FieldCategory; 4] = [
        FieldCategory::Name,
        FieldCategory::DateOfBirth,
        FieldCategory::Address,
        FieldCategory::CauseOfDeath,
    ];

    /// Key used in the response schema and in highlight ids.
    pub fn key(self) -> &'static str {
        match self {
            FieldCategory::Name => "name",
            FieldCategory::DateOfBirth => "dateOfBirth",
            FieldCategory::Address => "address",
            FieldCategory::CauseOfDeath => "causeOfDeath",
        }
    }

    /// Human-readable prefix of a highlight label.
    pub fn label(self) -> &'static str {
        match self {
            FieldCategory::Name => "Name",
            FieldCategory::DateOfBirth => "Date of Birth",
            FieldCategory::Address => "Address",
            FieldCategory::CauseOfDeath => "Cause of Death",
        }
    }
}

/// One token the model attributes to a field.
///
/// `coordinate` is expected to echo the top-left corner of an OCR word
/// exactly; `group_id` ties tokens of the same value together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldMention {
    pub word: String,
    pub coordinate: [f64; 2],
    #[serde(rename = "groupId", deserialize_with = "integral_group_id")]
    pub group_id: i64,
}

/// Largest magnitude an `f64` holds without losing integer precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Accept any JSON number with an integral value (`1`, `1.0`, `-2e0`).
fn integral_group_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        Ok(value as i64)
    } else {
        Err(serde::de::Error::custom(format!(
            "groupId must be an integral number, got {value}"
        )))
    }
}

/// Schema-validated model output: every category present, possibly empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ExtractedFields {
    pub name: Vec<FieldMention>,
    pub date_of_birth: Vec<FieldMention>,
    pub address: Vec<FieldMention>,
    pub cause_of_death: Vec<FieldMention>,
}

impl ExtractedFields {
    pub fn mentions(&self, category: FieldCategory) -> &[FieldMention] {
        match category {
            FieldCategory::Name => &self.name,
            FieldCategory::DateOfBirth => &self.date_of_birth,
            FieldCategory::Address => &self.address,
            FieldCategory::CauseOfDeath => &self.cause_of_death,
        }
    }

    pub fn total_mentions(&self) -> usize {
        FieldCategory::ALL
            .iter()
            .map(|c| self.mentions(*c).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_mentions() == 0
    }
}

/// Why the extraction stage produced no fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum NoFieldsReason {
    /// The model could not be reached or answered with an HTTP error.
    Unavailable(String),
    /// The model answered with no text.
    EmptyResponse,
    /// The answer is not JSON.
    InvalidJson(String),
    /// The answer is JSON but not the field schema.
    SchemaMismatch(String),
}

impl From<FieldsError> for NoFieldsReason {
    fn from(err: FieldsError) -> Self {
        match err {
            FieldsError::EmptyResponse => NoFieldsReason::EmptyResponse,
            FieldsError::InvalidJson(msg) => NoFieldsReason::InvalidJson(msg),
            FieldsError::SchemaMismatch(msg) => NoFieldsReason::SchemaMismatch(msg),
            other => NoFieldsReason::Unavailable(other.to_string()),
        }
    }
}

/// Result of the extraction stage. Never partial.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldsOutcome {
    Found(ExtractedFields),
    NoFields(NoFieldsReason),
}

impl FieldsOutcome {
    pub fn fields(&self) -> Option<&ExtractedFields> {
        match self {
            FieldsOutcome::Found(fields) => Some(fields),
            FieldsOutcome::NoFields(_) => None,
        }
    }
}

/// Structured-output LLM client abstraction (allows mocking).
pub trait StructuredLlmClient {
    /// Generate a completion constrained to `schema`. Returns the raw text.
    fn generate_structured(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
        schema: &serde_json::Value,
    ) -> Result<String, FieldsError>;
}
