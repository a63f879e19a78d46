use super::types::ExtractedFields;
use super::FieldsError;

/// Validate the model's raw text against the field schema.
///
/// All-or-nothing: a single malformed item rejects the whole response.
pub fn parse_fields_response(raw: &str) -> Result<ExtractedFields, FieldsError> {
    if raw.trim().is_empty() {
        return Err(FieldsError::EmptyResponse);
    }

    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| FieldsError::InvalidJson(e.to_string()))?;

    serde_json::from_value(value).map_err(|e| FieldsError::SchemaMismatch(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "name": [
            {"word": "JOHN", "coordinate": [10, 20], "groupId": 1},
            {"word": "DOE", "coordinate": [70, 20], "groupId": 1}
        ],
        "dateOfBirth": [],
        "address": [{"word": "ELM", "coordinate": [12.5, 80], "groupId": 3}],
        "causeOfDeath": []
    }"#;

    #[test]
    fn parses_valid_response() {
        let fields = parse_fields_response(VALID).unwrap();
        assert_eq!(fields.name.len(), 2);
        assert_eq!(fields.name[1].word, "DOE");
        assert_eq!(fields.name[1].coordinate, [70.0, 20.0]);
        assert_eq!(fields.address[0].coordinate, [12.5, 80.0]);
        assert_eq!(fields.address[0].group_id, 3);
    }

    #[test]
    fn empty_text_is_empty_response() {
        assert!(matches!(
            parse_fields_response("   \n"),
            Err(FieldsError::EmptyResponse)
        ));
    }

    #[test]
    fn invalid_json_rejected() {
        assert!(matches!(
            parse_fields_response("{\"name\": ["),
            Err(FieldsError::InvalidJson(_))
        ));
    }

    #[test]
    fn missing_category_rejected() {
        let raw = r#"{"name": [], "dateOfBirth": [], "address": []}"#;
        assert!(matches!(
            parse_fields_response(raw),
            Err(FieldsError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn null_category_rejected() {
        let raw = r#"{"name": null, "dateOfBirth": [], "address": [], "causeOfDeath": []}"#;
        assert!(matches!(
            parse_fields_response(raw),
            Err(FieldsError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn unknown_category_rejected() {
        let raw = r#"{"name": [], "dateOfBirth": [], "address": [], "causeOfDeath": [], "sex": []}"#;
        assert!(matches!(
            parse_fields_response(raw),
            Err(FieldsError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn wrong_coordinate_arity_rejected() {
        let raw = r#"{"name": [{"word": "A", "coordinate": [1, 2, 3], "groupId": 1}],
            "dateOfBirth": [], "address": [], "causeOfDeath": []}"#;
        assert!(matches!(
            parse_fields_response(raw),
            Err(FieldsError::SchemaMismatch(_))
        ));

        let raw = r#"{"name": [{"word": "A", "coordinate": [1], "groupId": 1}],
            "dateOfBirth": [], "address": [], "causeOfDeath": []}"#;
        assert!(matches!(
            parse_fields_response(raw),
            Err(FieldsError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn one_bad_item_rejects_everything() {
        let raw = r#"{
            "name": [
                {"word": "JOHN", "coordinate": [10, 20], "groupId": 1},
                {"word": 42, "coordinate": [70, 20], "groupId": 1}
            ],
            "dateOfBirth": [], "address": [], "causeOfDeath": []
        }"#;
        assert!(matches!(
            parse_fields_response(raw),
            Err(FieldsError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn string_group_id_rejected() {
        let raw = r#"{"name": [{"word": "A", "coordinate": [1, 2], "groupId": "1"}],
            "dateOfBirth": [], "address": [], "causeOfDeath": []}"#;
        assert!(matches!(
            parse_fields_response(raw),
            Err(FieldsError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn integral_float_group_id_accepted() {
        let raw = r#"{"name": [{"word": "DOE", "coordinate": [0, 20], "groupId": 1.0}],
            "dateOfBirth": [], "address": [], "causeOfDeath": []}"#;
        let fields = parse_fields_response(raw).unwrap();
        assert_eq!(fields.name[0].group_id, 1);
    }

    #[test]
    fn fractional_group_id_rejected() {
        let raw = r#"{"name": [{"word": "DOE", "coordinate": [0, 20], "groupId": 1.5}],
            "dateOfBirth": [], "address": [], "causeOfDeath": []}"#;
        assert!(matches!(
            parse_fields_response(raw),
            Err(FieldsError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn top_level_array_rejected() {
        assert!(matches!(
            parse_fields_response("[]"),
            Err(FieldsError::SchemaMismatch(_))
        ));
    }
}
