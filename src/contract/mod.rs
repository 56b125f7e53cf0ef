//! Request and response shapes of the host's data-source plugin contract.
//!
//! The host calls four entry points with fixed JSON shapes:
//!
//! ```text
//! getConfig({languageCode})            -> {configParams, dateRangeRequired}
//! getSchema({})                        -> {schema}
//! getData({dateRange, configParams,
//!          fields})                    -> {schema, rows}
//! getAuthType()                        -> {type: "NONE"}
//! ```
//!
//! Field names on the wire are camelCase; enum values are SCREAMING_CASE.

use crate::credentials::ApiCredentials;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(test)]
mod tests;

// ---------------------------------------------------------------------------
// Schema fields
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    String,
    Number,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConceptType {
    Dimension,
    Metric,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticType {
    Text,
    Number,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticGroup {
    Datetime,
    Numeric,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semantics {
    pub concept_type: ConceptType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub semantic_type: Option<SemanticType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub semantic_group: Option<SemanticGroup>,
}

/// A schema field with its label resolved to a single language.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedField {
    pub name: String,
    pub label: String,
    pub data_type: DataType,
    pub semantics: Semantics,
}

/// One output row: values in requested-field order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<Value>,
}

// ---------------------------------------------------------------------------
// getConfig
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigRequest {
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigParamType {
    Textinput,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigParam {
    #[serde(rename = "type")]
    pub param_type: ConfigParamType,
    pub name: String,
    pub display_name: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigResponse {
    pub config_params: Vec<ConfigParam>,
    pub date_range_required: bool,
}

// ---------------------------------------------------------------------------
// getSchema
// ---------------------------------------------------------------------------

/// The host sends `{}`; `languageCode` stands in for the host user's locale.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSchemaRequest {
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GetSchemaResponse {
    pub schema: Vec<LocalizedField>,
}

// ---------------------------------------------------------------------------
// getData
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RequestedField {
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDataRequest {
    pub date_range: DateRange,
    pub config_params: ApiCredentials,
    pub fields: Vec<RequestedField>,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl GetDataRequest {
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }
}

/// `schema` keeps one slot per requested field; unknown names are `null`.
#[derive(Clone, Debug, Serialize)]
pub struct GetDataResponse {
    pub schema: Vec<Option<LocalizedField>>,
    pub rows: Vec<Row>,
}

// ---------------------------------------------------------------------------
// getAuthType
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
    None,
}

#[derive(Clone, Debug, Serialize)]
pub struct GetAuthTypeResponse {
    #[serde(rename = "type")]
    pub auth_type: AuthType,
}
