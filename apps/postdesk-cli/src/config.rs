//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::Context;
use uuid::Uuid;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Remote store connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub api_key: String,
    pub access_token: Option<String>,
    pub timeout: Duration,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` runs against the in-memory store.
    pub store: Option<StoreConfig>,
    /// Owner of the session; `None` means logged out.
    pub owner_id: Option<Uuid>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let store = var("POSTDESK_STORE_URL").map(|url| StoreConfig {
            url,
            api_key: var("POSTDESK_API_KEY").unwrap_or_default(),
            access_token: var("POSTDESK_ACCESS_TOKEN"),
            timeout: Duration::from_secs(
                var("POSTDESK_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        });

        let owner_id = var("POSTDESK_OWNER_ID")
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse::<Uuid>()
                    .with_context(|| format!("POSTDESK_OWNER_ID is not a UUID: {s:?}"))
            })
            .transpose()?;

        Ok(Self { store, owner_id })
    }
}
