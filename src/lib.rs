// Response cache with per-key lifetimes
pub mod cache;

// TOML + env configuration
pub mod config;

// Host plugin contract shapes
pub mod contract;

// Provider API credentials
pub mod credentials;

pub use cache::{CacheStore, MemoryCache};
pub use config::ConnectorConfig;
pub use credentials::ApiCredentials;
