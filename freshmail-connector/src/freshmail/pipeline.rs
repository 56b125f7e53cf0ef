//! Date filtering and row assembly.
//!
//! Rows are built by overlaying each campaign's report on its list entry:
//! report value first, list value second, `null` last.

use chrono::NaiveDateTime;
use mailstats::contract::Row;
use mailstats::ApiCredentials;
use serde_json::Value;
use tracing::{debug, warn};

use super::client::CampaignSummary;
use super::dates::{day_bounds, parse_date};
use super::repository::{CampaignReport, CampaignRepository};
use crate::error::Result;

/// `null`, absent and `""` are empty. `0` and `false` are values.
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Resolve one field: non-empty report value, else non-empty summary value, else `null`.
pub fn resolve_value(report: &CampaignReport, summary: &CampaignSummary, field: &str) -> Value {
    if let Some(metrics) = report.metrics() {
        let value = metrics.get(field);
        if !is_empty(value) {
            return value.cloned().unwrap_or(Value::Null);
        }
    }
    let value = summary.get(field);
    if !is_empty(value) {
        return value.cloned().unwrap_or(Value::Null);
    }
    Value::Null
}

pub fn build_row(report: &CampaignReport, summary: &CampaignSummary, fields: &[String]) -> Row {
    Row {
        values: fields
            .iter()
            .map(|field| resolve_value(report, summary, field))
            .collect(),
    }
}

/// Campaigns whose `sent` falls within `[from, until]`.
///
/// A campaign with a missing or unparseable `sent` is skipped.
pub fn filter_by_sent<'a>(
    campaigns: &'a [CampaignSummary],
    from: NaiveDateTime,
    until: NaiveDateTime,
) -> Vec<&'a CampaignSummary> {
    campaigns
        .iter()
        .filter(|campaign| {
            let sent = match campaign.get("sent").and_then(Value::as_str) {
                Some(sent) => sent,
                None => {
                    warn!(campaign_id = %campaign_id(campaign), "Campaign has no sent date, skipping");
                    return false;
                }
            };
            match parse_date(sent) {
                Ok(at) => at >= from && at <= until,
                Err(e) => {
                    warn!(campaign_id = %campaign_id(campaign), error = %e, "Skipping campaign");
                    false
                }
            }
        })
        .collect()
}

fn campaign_id(campaign: &CampaignSummary) -> String {
    match campaign.get("id_hash") {
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Rows for every campaign sent between `start` and the end of `end`.
///
/// Reports are fetched one campaign at a time, in list order.
pub async fn load(
    repository: &CampaignRepository,
    start: &str,
    end: &str,
    credentials: &ApiCredentials,
    fields: &[String],
) -> Result<Vec<Row>> {
    let (from, until) = day_bounds(start, end)?;
    let campaigns = repository.list_campaigns(credentials).await?;
    let selected = filter_by_sent(&campaigns, from, until);
    debug!(
        total = campaigns.len(),
        selected = selected.len(),
        "Filtered campaigns by sent date"
    );

    let mut rows = Vec::with_capacity(selected.len());
    for summary in selected {
        let id = campaign_id(summary);
        let report = if id.is_empty() {
            CampaignReport::Failed
        } else {
            repository.get_report(&id, credentials).await
        };
        rows.push(build_row(&report, summary, fields));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freshmail::client::FreshMailClient;
    use crate::freshmail::repository::CacheTtls;
    use chrono::NaiveDate;
    use mailstats::MemoryCache;
    use mockito::Server;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn summary(value: Value) -> CampaignSummary {
        match value {
            Value::Object(map) => map,
            _ => panic!("summary must be an object"),
        }
    }

    fn metrics(value: Value) -> CampaignReport {
        CampaignReport::Metrics(summary(value))
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn day(y: i32, m: u32, d: u32) -> (NaiveDateTime, NaiveDateTime) {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        (
            date.and_hms_opt(0, 0, 0).unwrap(),
            date.and_hms_opt(23, 59, 59).unwrap(),
        )
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty(None));
        assert!(is_empty(Some(&Value::Null)));
        assert!(is_empty(Some(&json!(""))));
        assert!(!is_empty(Some(&json!(0))));
        assert!(!is_empty(Some(&json!(false))));
        assert!(!is_empty(Some(&json!(" "))));
        assert!(!is_empty(Some(&json!([]))));
    }

    #[test]
    fn test_report_wins_summary_falls_back() {
        let report = metrics(json!({"delivered": 10}));
        let list = summary(json!({"clicked": 3, "delivered": 1}));
        let row = build_row(&report, &list, &fields(&["clicked", "delivered"]));
        assert_eq!(row.values, vec![json!(3), json!(10)]);
    }

    #[test]
    fn test_zero_is_preserved() {
        let report = metrics(json!({"clicked": 0}));
        let list = summary(json!({"clicked": 7}));
        assert_eq!(resolve_value(&report, &list, "clicked"), json!(0));
    }

    #[test]
    fn test_empty_string_and_null_fall_through() {
        let report = metrics(json!({"topic": "", "opened": null}));
        let list = summary(json!({"topic": "Spring sale", "opened": 4}));
        let row = build_row(&report, &list, &fields(&["topic", "opened", "resigned"]));
        assert_eq!(row.values, vec![json!("Spring sale"), json!(4), Value::Null]);
    }

    #[test]
    fn test_failed_report_uses_summary() {
        let list = summary(json!({"id_hash": "b", "delivered": 1}));
        let row = build_row(&CampaignReport::Failed, &list, &fields(&["id_hash", "delivered", "opened"]));
        assert_eq!(row.values, vec![json!("b"), json!(1), Value::Null]);
    }

    #[test]
    fn test_filter_includes_same_day() {
        let campaigns = vec![summary(json!({"id_hash": "a", "sent": "2023-03-15 10:00:00"}))];
        let (from, until) = day(2023, 3, 15);
        assert_eq!(filter_by_sent(&campaigns, from, until).len(), 1);
    }

    #[test]
    fn test_filter_excludes_next_day() {
        let campaigns = vec![summary(json!({"id_hash": "a", "sent": "2023-03-16 00:00:01"}))];
        let (from, until) = day(2023, 3, 15);
        assert!(filter_by_sent(&campaigns, from, until).is_empty());
    }

    #[test]
    fn test_filter_bounds_are_inclusive() {
        let campaigns = vec![
            summary(json!({"id_hash": "start", "sent": "2023-03-15 00:00:00"})),
            summary(json!({"id_hash": "end", "sent": "2023-03-15 23:59:59"})),
            summary(json!({"id_hash": "before", "sent": "2023-03-14 23:59:59"})),
            summary(json!({"id_hash": "date-only", "sent": "2023-03-15"})),
        ];
        let (from, until) = day(2023, 3, 15);
        let ids: Vec<String> = filter_by_sent(&campaigns, from, until)
            .into_iter()
            .map(campaign_id)
            .collect();
        assert_eq!(ids, vec!["start", "end", "date-only"]);
    }

    #[test]
    fn test_filter_skips_missing_or_malformed_sent() {
        let campaigns = vec![
            summary(json!({"id_hash": "a"})),
            summary(json!({"id_hash": "b", "sent": "15.03.2023"})),
            summary(json!({"id_hash": "c", "sent": 1678874400})),
            summary(json!({"id_hash": "d", "sent": "2023-03-15 12:00:00"})),
        ];
        let (from, until) = day(2023, 3, 15);
        let kept = filter_by_sent(&campaigns, from, until);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0]["id_hash"], "d");
    }

    #[tokio::test]
    async fn test_load_isolates_report_failures() {
        let mut server = Server::new_async().await;
        let _p1 = server
            .mock("GET", "/rest/reports/campaignsList/1")
            .with_status(200)
            .with_body(
                json!({"status": "OK", "data": [
                    {"id_hash": "A", "sent": "2023-03-10 09:00:00", "topic": "Alpha", "delivered": 1},
                    {"id_hash": "B", "sent": "2023-03-11 09:00:00", "topic": "Beta", "delivered": 2},
                    {"id_hash": "C", "sent": "2023-03-12 09:00:00", "topic": "Gamma", "delivered": 3},
                    {"id_hash": "D", "sent": "2023-04-01 09:00:00", "topic": "Out of range"}
                ]})
                .to_string(),
            )
            .create_async()
            .await;
        let _p2 = server
            .mock("GET", "/rest/reports/campaignsList/2")
            .with_status(200)
            .with_body(r#"{"status":"OK","data":[]}"#)
            .create_async()
            .await;
        let _a = server
            .mock("GET", "/rest/reports/campaign/A")
            .with_status(200)
            .with_body(r#"{"status":"OK","data":{"delivered":100}}"#)
            .create_async()
            .await;
        let _b = server
            .mock("GET", "/rest/reports/campaign/B")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;
        let _c = server
            .mock("GET", "/rest/reports/campaign/C")
            .with_status(200)
            .with_body(r#"{"status":"OK","data":{"delivered":300}}"#)
            .create_async()
            .await;
        let d = server
            .mock("GET", "/rest/reports/campaign/D")
            .expect(0)
            .create_async()
            .await;

        let client = FreshMailClient::with_base_url(server.url(), Duration::from_secs(5)).unwrap();
        let repo = CampaignRepository::new(
            client,
            Arc::new(MemoryCache::new()),
            CacheTtls::default(),
            1000,
        );
        let creds = ApiCredentials::new("key", "secret");

        let rows = load(
            &repo,
            "2023-03-01",
            "2023-03-31",
            &creds,
            &fields(&["id_hash", "topic", "delivered"]),
        )
        .await
        .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].values, vec![json!("A"), json!("Alpha"), json!(100)]);
        assert_eq!(rows[1].values, vec![json!("B"), json!("Beta"), json!(2)]);
        assert_eq!(rows[2].values, vec![json!("C"), json!("Gamma"), json!(300)]);
        d.assert_async().await;
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_range() {
        let server = Server::new_async().await;
        let client = FreshMailClient::with_base_url(server.url(), Duration::from_secs(5)).unwrap();
        let repo = CampaignRepository::new(
            client,
            Arc::new(MemoryCache::new()),
            CacheTtls::default(),
            1000,
        );

        let err = load(
            &repo,
            "03/01/2023",
            "2023-03-31",
            &ApiCredentials::new("key", "secret"),
            &fields(&["id_hash"]),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, crate::error::ConnectorError::InvalidDate(_)));
    }
}
