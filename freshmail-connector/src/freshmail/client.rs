use mailstats::ApiCredentials;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

use super::config::{
    campaign_report_path, campaigns_list_path, API_KEY_HEADER, API_SIGN_HEADER, BASE_URL,
};
use super::signer::sign;
use crate::error::ApiError;

/// One campaign as returned by the list endpoint: field name to raw value.
pub type CampaignSummary = Map<String, Value>;

/// Metric name to value for one campaign.
pub type ReportMetrics = Map<String, Value>;

/// Response envelope shared by every provider endpoint.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    errors: Vec<EnvelopeError>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeError {
    code: Value,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the provider REST API.
///
/// Every request is signed with the caller's credentials; the secret itself
/// never leaves the process.
#[derive(Clone)]
pub struct FreshMailClient {
    http_client: Client,
    base_url: String,
}

impl FreshMailClient {
    /// Create a client using the production API base URL.
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        Self::with_base_url(BASE_URL.to_string(), timeout)
    }

    /// Create a client with a custom base URL (mock servers, staging).
    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .user_agent("mailstats-connector/1.0")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issue one signed call and unwrap the `data` payload of an `OK` envelope.
    ///
    /// Exactly one network request per invocation; no retries.
    pub async fn call(
        &self,
        method: Method,
        credentials: &ApiCredentials,
        path: &str,
        data: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let body = match data {
            Some(payload) => serde_json::to_string(payload)
                .map_err(|e| ApiError::Protocol(format!("unserializable payload: {}", e)))?,
            None => String::new(),
        };
        let signature = sign(&credentials.api_key, path, &body, &credentials.api_secret);

        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http_client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &credentials.api_key)
            .header(API_SIGN_HEADER, signature);
        if data.is_some() {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        parse_envelope(&text).map_err(|err| match err {
            ApiError::Protocol(reason) if !status.is_success() => {
                ApiError::Protocol(format!("HTTP {} from {}: {}", status, path, reason))
            }
            other => other,
        })
    }

    /// Fetch one page of the campaign list. Pages start at 1.
    pub async fn fetch_campaigns_page(
        &self,
        credentials: &ApiCredentials,
        page: u32,
    ) -> Result<Vec<CampaignSummary>, ApiError> {
        let data = self
            .call(Method::GET, credentials, &campaigns_list_path(page), None)
            .await?;
        match data {
            // An empty page may come back as `null` or `false` rather than `[]`.
            Value::Null | Value::Bool(false) => Ok(Vec::new()),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(fields) => Ok(fields),
                    other => Err(ApiError::Protocol(format!(
                        "campaign list item is not an object: {}",
                        other
                    ))),
                })
                .collect(),
            other => Err(ApiError::Protocol(format!(
                "campaign list payload is not an array: {}",
                other
            ))),
        }
    }

    /// Fetch the report for one campaign.
    pub async fn fetch_campaign_report(
        &self,
        credentials: &ApiCredentials,
        campaign_id: &str,
    ) -> Result<ReportMetrics, ApiError> {
        let data = self
            .call(
                Method::GET,
                credentials,
                &campaign_report_path(campaign_id),
                None,
            )
            .await?;
        match data {
            Value::Object(metrics) => Ok(metrics),
            other => Err(ApiError::Protocol(format!(
                "campaign report payload is not an object: {}",
                other
            ))),
        }
    }
}

/// Classify a response body: `OK` → payload, `ERROR` → first error code.
fn parse_envelope(text: &str) -> Result<Value, ApiError> {
    let envelope: Envelope = serde_json::from_str(text)
        .map_err(|e| ApiError::Protocol(format!("malformed response body: {}", e)))?;

    match envelope.status.as_str() {
        "OK" => Ok(envelope.data),
        "ERROR" => {
            let first = envelope.errors.into_iter().next().ok_or_else(|| {
                ApiError::Protocol("ERROR status without error entries".to_string())
            })?;
            let code = match first.code {
                Value::String(s) => s,
                other => other.to_string(),
            };
            Err(ApiError::Upstream {
                code,
                message: first.message,
            })
        }
        other => Err(ApiError::Protocol(format!("unknown status {:?}", other))),
    }
}
