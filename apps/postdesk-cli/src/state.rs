//! Application state - the wired-up post collection and its collaborators.

use std::sync::Arc;

use postdesk_core::PostCollection;
use postdesk_core::ports::{NotificationSink, PostStore};
use postdesk_infra::{InMemoryPostStore, StaticSession, TracingNotificationSink};

use crate::config::{AppConfig, StoreConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostCollection>,
    pub sink: Arc<dyn NotificationSink>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let store = match &config.store {
            Some(store_config) => remote_store(store_config)?,
            None => {
                tracing::warn!(
                    "POSTDESK_STORE_URL not set. Using in-memory post store; \
                     posts do not persist between commands."
                );
                Arc::new(InMemoryPostStore::new()) as Arc<dyn PostStore>
            }
        };

        if config.owner_id.is_none() {
            tracing::warn!("POSTDESK_OWNER_ID not set. Running without a session.");
        }

        let session = Arc::new(StaticSession::from(config.owner_id));
        let sink: Arc<dyn NotificationSink> = Arc::new(TracingNotificationSink);
        let posts = Arc::new(PostCollection::new(store, session, sink.clone()));

        tracing::debug!("Application state initialized");

        Ok(Self { posts, sink })
    }
}

#[cfg(feature = "rest")]
fn remote_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn PostStore>> {
    use postdesk_infra::{RestPostStore, RestStoreConfig};

    let store = RestPostStore::new(RestStoreConfig {
        base_url: config.url.clone(),
        api_key: config.api_key.clone(),
        access_token: config.access_token.clone(),
        timeout: config.timeout,
    })?;

    Ok(Arc::new(store))
}

#[cfg(not(feature = "rest"))]
fn remote_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn PostStore>> {
    tracing::warn!(
        url = %config.url,
        "Built without the rest feature. Using in-memory post store; \
         posts do not persist between commands."
    );
    Ok(Arc::new(InMemoryPostStore::new()))
}
