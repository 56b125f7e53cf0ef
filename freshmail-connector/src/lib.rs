//! FreshMail campaign statistics connector.
//!
//! Serves a reporting host's data-source plugin contract (`getConfig`,
//! `getSchema`, `getData`, `getAuthType`) from the FreshMail REST API.
//!
//! # Architecture
//!
//! ```text
//!        Reporting host
//!              ↓  (JSON over HTTP)
//! ┌─────────────────────────────────────────┐
//! │       api (axum router)                  │
//! └─────────────────────────────────────────┘
//!              ↓
//! ┌─────────────────────────────────────────┐
//! │       FreshMailConnector                 │
//! │  - schema catalog + localization         │
//! │  - pipeline: date filter, field merge    │
//! └─────────────────────────────────────────┘
//!              ↓
//! ┌─────────────────────────────────────────┐
//! │       CampaignRepository                 │
//! │  - list (60s) / report (1h) cache        │
//! │  - pagination, failure absorption        │
//! └─────────────────────────────────────────┘
//!              ↓
//! ┌─────────────────────────────────────────┐
//! │       FreshMailClient                    │
//! │  - SHA-1 request signing                 │
//! │  - envelope classification               │
//! └─────────────────────────────────────────┘
//!              ↓
//!     api.freshmail.com
//! ```
//!
//! # Example
//!
//! ```no_run
//! use freshmail_connector::FreshMailConnector;
//! use mailstats::{ConnectorConfig, MemoryCache};
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ConnectorConfig::from_env()?;
//! let connector = FreshMailConnector::new(&config, Arc::new(MemoryCache::new()))?;
//! let router = freshmail_connector::api::create_router(Arc::new(connector));
//! # let _ = router;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod freshmail;

pub use error::{ApiError, ConnectorError};
pub use freshmail::FreshMailConnector;
