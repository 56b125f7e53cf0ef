//! Provider credentials supplied by the host on every data request.
//!
//! Credentials are never persisted. The secret only ever feeds the request
//! signature and must not reach logs, so `Debug` redacts it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// API key / secret pair collected by the host's configuration UI.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCredentials {
    /// Sent verbatim in the `X-Rest-ApiKey` header and used in cache keys
    pub api_key: String,

    /// Only used to compute the request signature
    pub api_secret: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
