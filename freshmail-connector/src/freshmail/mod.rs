pub mod client;
pub mod config;
pub mod dates;
pub mod pipeline;
pub mod repository;
pub mod schema;
pub mod signer;

use mailstats::contract::{
    AuthType, ConfigParam, ConfigParamType, GetAuthTypeResponse, GetConfigRequest,
    GetConfigResponse, GetDataRequest, GetDataResponse, GetSchemaRequest, GetSchemaResponse,
};
use mailstats::{CacheStore, ConnectorConfig};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use self::client::FreshMailClient;
use self::repository::{CacheTtls, CampaignRepository};
use crate::error::{ApiError, Result};

/// The four host contract calls for FreshMail campaign statistics.
///
/// One instance serves every host request; the HTTP client and cache are
/// shared, credentials arrive with each data request.
pub struct FreshMailConnector {
    repository: CampaignRepository,
    default_language: String,
}

impl FreshMailConnector {
    pub fn new(
        config: &ConnectorConfig,
        cache: Arc<dyn CacheStore>,
    ) -> std::result::Result<Self, ApiError> {
        let client = FreshMailClient::with_base_url(
            config.upstream.base_url.clone(),
            config.upstream.request_timeout(),
        )?;
        let ttls = CacheTtls {
            list: config.cache.list_ttl(),
            report: config.cache.report_ttl(),
        };
        Ok(Self {
            repository: CampaignRepository::new(client, cache, ttls, config.upstream.max_pages),
            default_language: config.locale.default_language.clone(),
        })
    }

    fn language<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .filter(|code| !code.is_empty())
            .unwrap_or(self.default_language.as_str())
    }

    /// Credential inputs, labelled in the requested language.
    pub fn get_config(&self, request: &GetConfigRequest) -> GetConfigResponse {
        let (key_label, secret_label) = match request.language_code.as_deref() {
            Some("pl") => ("Klucz Api", "Api Sekret"),
            _ => ("API Key", "API Secret"),
        };

        GetConfigResponse {
            config_params: vec![
                ConfigParam {
                    param_type: ConfigParamType::Textinput,
                    name: "api_key".to_string(),
                    display_name: key_label.to_string(),
                },
                ConfigParam {
                    param_type: ConfigParamType::Textinput,
                    name: "api_secret".to_string(),
                    display_name: secret_label.to_string(),
                },
            ],
            date_range_required: true,
        }
    }

    pub fn get_schema(&self, request: &GetSchemaRequest) -> GetSchemaResponse {
        GetSchemaResponse {
            schema: schema::full_schema(self.language(request.language_code.as_deref())),
        }
    }

    pub async fn get_data(&self, request: &GetDataRequest) -> Result<GetDataResponse> {
        let request_id = Uuid::now_v7();
        let fields = request.field_names();
        let language = self.language(request.language_code.as_deref());

        let schema = schema::schema_for(language, &fields);
        for (name, slot) in fields.iter().zip(&schema) {
            if slot.is_none() {
                warn!(%request_id, field = %name, "Requested field is not in the catalog");
            }
        }

        let rows = pipeline::load(
            &self.repository,
            &request.date_range.start_date,
            &request.date_range.end_date,
            &request.config_params,
            &fields,
        )
        .await?;

        info!(
            %request_id,
            start = %request.date_range.start_date,
            end = %request.date_range.end_date,
            fields = fields.len(),
            rows = rows.len(),
            "Data request served"
        );
        Ok(GetDataResponse { schema, rows })
    }

    pub fn get_auth_type(&self) -> GetAuthTypeResponse {
        GetAuthTypeResponse {
            auth_type: AuthType::None,
        }
    }
}
