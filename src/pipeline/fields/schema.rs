use serde_json::{json, Value};

use super::types::FieldCategory;

/// Strict JSON schema for the extraction response: an object with exactly
/// one array per field category, each item `{word, coordinate, groupId}`.
pub fn fields_schema() -> Value {
    let mention = json!({
        "type": "object",
        "properties": {
            "word": { "type": "string" },
            "coordinate": {
                "type": "array",
                "items": { "type": "number" },
                "minItems": 2,
                "maxItems": 2
            },
            "groupId": { "type": "integer" }
        },
        "required": ["word", "coordinate", "groupId"],
        "additionalProperties": false
    });

    let properties: serde_json::Map<String, Value> = FieldCategory::ALL
        .iter()
        .map(|c| {
            (
                c.key().to_string(),
                json!({ "type": "array", "items": mention.clone() }),
            )
        })
        .collect();

    let required: Vec<&str> = FieldCategory::ALL.iter().map(|c| c.key()).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}
