//! Cache-first access to the campaign list and per-campaign reports.
//!
//! Provider failures never escape this module: a failed list page ends
//! pagination, and a failed report is remembered as [`CampaignReport::Failed`]
//! for the report TTL so the same broken call is not repeated.

use mailstats::{ApiCredentials, CacheStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::client::{CampaignSummary, FreshMailClient, ReportMetrics};
use super::config::{list_cache_key, report_cache_key};
use crate::error::{ConnectorError, Result};

/// Outcome of a report fetch, as cached.
#[derive(Clone, Debug, PartialEq)]
pub enum CampaignReport {
    Metrics(ReportMetrics),
    /// The fetch failed; summary values stand in for every field.
    Failed,
}

impl CampaignReport {
    /// Cached form: the metrics object, or `false` for a failure.
    fn to_cache_value(&self) -> Value {
        match self {
            CampaignReport::Metrics(metrics) => Value::Object(metrics.clone()),
            CampaignReport::Failed => Value::Bool(false),
        }
    }

    fn from_cache_value(value: Value) -> Self {
        match value {
            Value::Object(metrics) => CampaignReport::Metrics(metrics),
            _ => CampaignReport::Failed,
        }
    }

    pub fn metrics(&self) -> Option<&ReportMetrics> {
        match self {
            CampaignReport::Metrics(metrics) => Some(metrics),
            CampaignReport::Failed => None,
        }
    }
}

/// Cache lifetimes for the two entry families.
#[derive(Clone, Copy, Debug)]
pub struct CacheTtls {
    pub list: Duration,
    pub report: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            list: Duration::from_secs(60),
            report: Duration::from_secs(3600),
        }
    }
}

pub struct CampaignRepository {
    client: FreshMailClient,
    cache: Arc<dyn CacheStore>,
    ttls: CacheTtls,
    max_pages: u32,
}

impl CampaignRepository {
    pub fn new(
        client: FreshMailClient,
        cache: Arc<dyn CacheStore>,
        ttls: CacheTtls,
        max_pages: u32,
    ) -> Self {
        Self {
            client,
            cache,
            ttls,
            max_pages,
        }
    }

    /// Every campaign of the account, from cache when fresh.
    ///
    /// Only fails when the provider keeps returning non-empty pages past
    /// `max_pages`.
    pub async fn list_campaigns(
        &self,
        credentials: &ApiCredentials,
    ) -> Result<Vec<CampaignSummary>> {
        let key = list_cache_key(credentials);
        if let Some(campaigns) = self.cached::<Vec<CampaignSummary>>(&key) {
            debug!(campaigns = campaigns.len(), "Campaign list served from cache");
            return Ok(campaigns);
        }

        let campaigns = self.fetch_all_campaigns(credentials).await?;
        self.store(&key, &campaigns, self.ttls.list);
        info!(campaigns = campaigns.len(), "Campaign list fetched");
        Ok(campaigns)
    }

    /// Walk list pages from 1 until a page fails or comes back empty.
    ///
    /// Page `max_pages + 1` is fetched only to confirm the list ended; items
    /// there mean the bound was exceeded.
    async fn fetch_all_campaigns(
        &self,
        credentials: &ApiCredentials,
    ) -> Result<Vec<CampaignSummary>> {
        let mut campaigns = Vec::new();

        for page in 1..=self.max_pages.saturating_add(1) {
            match self.client.fetch_campaigns_page(credentials, page).await {
                Ok(items) if items.is_empty() => return Ok(campaigns),
                Ok(_) if page > self.max_pages => break,
                Ok(items) => {
                    debug!(page, items = items.len(), "Fetched campaign list page");
                    campaigns.extend(items);
                }
                Err(e) => {
                    // Treated as the end of the list; earlier pages are kept.
                    warn!(page, error = %e, "Campaign list page failed, stopping pagination");
                    return Ok(campaigns);
                }
            }
        }

        Err(ConnectorError::PageLimitExceeded(self.max_pages))
    }

    /// Report for one campaign, from cache when fresh. Never fails.
    pub async fn get_report(
        &self,
        campaign_id: &str,
        credentials: &ApiCredentials,
    ) -> CampaignReport {
        let key = report_cache_key(campaign_id, credentials);
        if let Some(value) = self.cached::<Value>(&key) {
            return CampaignReport::from_cache_value(value);
        }

        let report = match self
            .client
            .fetch_campaign_report(credentials, campaign_id)
            .await
        {
            Ok(metrics) => CampaignReport::Metrics(metrics),
            Err(e) => {
                warn!(campaign_id, error = %e, "Campaign report failed, using list values");
                CampaignReport::Failed
            }
        };

        self.store(&key, &report.to_cache_value(), self.ttls.report);
        report
    }

    fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.cache.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cache entry");
                None
            }
        }
    }

    fn store<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: Duration) {
        match serde_json::to_string(value) {
            Ok(raw) => self.cache.put(key, raw, ttl),
            Err(e) => warn!(error = %e, "Failed to serialize cache entry"),
        }
    }
}
