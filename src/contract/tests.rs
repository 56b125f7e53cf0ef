use super::*;
use serde_json::json;

fn clicked_field() -> LocalizedField {
    LocalizedField {
        name: "clicked".to_string(),
        label: "Clicked".to_string(),
        data_type: DataType::Number,
        semantics: Semantics {
            concept_type: ConceptType::Metric,
            semantic_type: Some(SemanticType::Number),
            semantic_group: Some(SemanticGroup::Numeric),
        },
    }
}

#[test]
fn test_localized_field_wire_shape() {
    let value = serde_json::to_value(clicked_field()).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "clicked",
            "label": "Clicked",
            "dataType": "NUMBER",
            "semantics": {
                "conceptType": "METRIC",
                "semanticType": "NUMBER",
                "semanticGroup": "NUMERIC"
            }
        })
    );
}

#[test]
fn test_optional_semantics_omitted() {
    let field = LocalizedField {
        name: "id_hash".to_string(),
        label: "Id".to_string(),
        data_type: DataType::String,
        semantics: Semantics {
            concept_type: ConceptType::Dimension,
            semantic_type: None,
            semantic_group: None,
        },
    };
    let value = serde_json::to_value(field).unwrap();
    assert_eq!(value["semantics"], json!({"conceptType": "DIMENSION"}));
}

#[test]
fn test_get_config_response_shape() {
    let response = GetConfigResponse {
        config_params: vec![ConfigParam {
            param_type: ConfigParamType::Textinput,
            name: "api_key".to_string(),
            display_name: "API Key".to_string(),
        }],
        date_range_required: true,
    };
    let value = serde_json::to_value(response).unwrap();
    assert_eq!(
        value,
        json!({
            "configParams": [
                {"type": "TEXTINPUT", "name": "api_key", "displayName": "API Key"}
            ],
            "dateRangeRequired": true
        })
    );
}

#[test]
fn test_get_config_request_language_optional() {
    let req: GetConfigRequest = serde_json::from_str(r#"{"languageCode": "pl"}"#).unwrap();
    assert_eq!(req.language_code.as_deref(), Some("pl"));

    let req: GetConfigRequest = serde_json::from_str("{}").unwrap();
    assert!(req.language_code.is_none());
}

#[test]
fn test_get_data_request_from_host_json() {
    let req: GetDataRequest = serde_json::from_value(json!({
        "dateRange": {"startDate": "2023-03-01", "endDate": "2023-03-31"},
        "configParams": {"api_key": "key", "api_secret": "secret"},
        "fields": [{"name": "topic"}, {"name": "clicked"}]
    }))
    .unwrap();

    assert_eq!(req.date_range.start_date, "2023-03-01");
    assert_eq!(req.date_range.end_date, "2023-03-31");
    assert_eq!(req.config_params.api_key, "key");
    assert_eq!(req.config_params.api_secret, "secret");
    assert_eq!(req.field_names(), vec!["topic", "clicked"]);
    assert!(req.language_code.is_none());
}

#[test]
fn test_get_data_response_keeps_null_schema_slots() {
    let response = GetDataResponse {
        schema: vec![Some(clicked_field()), None],
        rows: vec![Row {
            values: vec![json!(3), Value::Null],
        }],
    };
    let value = serde_json::to_value(response).unwrap();
    assert_eq!(value["schema"].as_array().unwrap().len(), 2);
    assert!(value["schema"][1].is_null());
    assert_eq!(value["rows"], json!([{"values": [3, null]}]));
}

#[test]
fn test_auth_type_none() {
    let value = serde_json::to_value(GetAuthTypeResponse {
        auth_type: AuthType::None,
    })
    .unwrap();
    assert_eq!(value, json!({"type": "NONE"}));
}
