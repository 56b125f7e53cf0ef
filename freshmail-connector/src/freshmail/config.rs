use mailstats::ApiCredentials;

pub const BASE_URL: &str = "https://api.freshmail.com";
pub const API_KEY_HEADER: &str = "X-Rest-ApiKey";
pub const API_SIGN_HEADER: &str = "X-Rest-ApiSign";

pub const CAMPAIGNS_LIST_PATH: &str = "/rest/reports/campaignsList";
pub const CAMPAIGN_REPORT_PATH: &str = "/rest/reports/campaign";

pub const DEFAULT_LANGUAGE: &str = "en";

/// `/rest/reports/campaignsList/{page}`; pages start at 1.
pub fn campaigns_list_path(page: u32) -> String {
    format!("{}/{}", CAMPAIGNS_LIST_PATH, page)
}

/// `/rest/reports/campaign/{id_hash}`
pub fn campaign_report_path(id: &str) -> String {
    format!("{}/{}", CAMPAIGN_REPORT_PATH, id)
}

/// Cache key for the full campaign list of one account.
pub fn list_cache_key(credentials: &ApiCredentials) -> String {
    format!("result-{}", credentials.api_key)
}

/// Cache key for one campaign's report.
pub fn report_cache_key(id: &str, credentials: &ApiCredentials) -> String {
    format!("report-{}-{}", id, credentials.api_key)
}
