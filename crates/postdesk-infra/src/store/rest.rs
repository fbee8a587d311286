//! PostgREST-style remote post store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use uuid::Uuid;

use postdesk_core::StoreError;
use postdesk_core::domain::{NewPost, Post, PostPatch};
use postdesk_core::ports::PostStore;
use postdesk_shared::{PostRow, StoreErrorBody};

use super::convert::{post_from_row, row_from_new_post, row_from_patch};

/// Configuration for the remote post store.
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    pub api_key: String,
    /// User access token. Falls back to the API key when absent.
    pub access_token: Option<String>,
    pub timeout: Duration,
}

/// Post store backed by a `posts` table behind a PostgREST endpoint.
pub struct RestPostStore {
    client: Client,
    endpoint: String,
    config: RestStoreConfig,
}

impl RestPostStore {
    pub fn new(config: RestStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let endpoint = format!("{}/rest/v1/posts", config.base_url.trim_end_matches('/'));

        tracing::info!(endpoint = %endpoint, timeout = ?config.timeout, "Remote post store configured");

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    fn request(&self, method: Method) -> RequestBuilder {
        let token = self
            .config
            .access_token
            .as_deref()
            .unwrap_or(&self.config.api_key);

        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
    }

    fn list_request(&self, owner_id: Uuid) -> RequestBuilder {
        self.request(Method::GET).query(&[
            ("select", "*".to_string()),
            ("user_id", format!("eq.{owner_id}")),
            ("order", "created_at.desc".to_string()),
        ])
    }

    /// Request for a single row, echoing the affected rows back.
    fn row_request(&self, method: Method, id: Uuid) -> RequestBuilder {
        self.request(method)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<PostRow>, StoreError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();

        if status.is_success() {
            return response
                .json::<Vec<PostRow>>()
                .await
                .map_err(|e| StoreError::Rejected(format!("unreadable response: {e}")));
        }

        let body = response.json::<StoreErrorBody>().await.unwrap_or_default();
        Err(status_error(status, &body))
    }

    /// Exactly one affected row, or `NotFound`.
    fn single(rows: Vec<PostRow>) -> Result<Post, StoreError> {
        let row = rows.into_iter().next().ok_or(StoreError::NotFound)?;
        post_from_row(row)
    }
}

#[async_trait]
impl PostStore for RestPostStore {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Post>, StoreError> {
        tracing::debug!(owner_id = %owner_id, "Listing posts");
        let rows = self.send(self.list_request(owner_id)).await?;
        rows.into_iter().map(post_from_row).collect()
    }

    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        let request = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&row_from_new_post(post));

        let rows = self.send(request).await?;
        if rows.is_empty() {
            return Err(StoreError::Rejected("insert returned no row".to_string()));
        }
        Self::single(rows)
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, StoreError> {
        let request = self
            .row_request(Method::PATCH, id)
            .json(&row_from_patch(patch));

        Self::single(self.send(request).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let rows = self.send(self.row_request(Method::DELETE, id)).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        tracing::warn!("Post store request timed out");
    }
    StoreError::Unavailable(err.to_string())
}

fn status_error(status: StatusCode, body: &StoreErrorBody) -> StoreError {
    let detail = if body.message.is_empty() {
        status.to_string()
    } else {
        body.summary()
    };

    match status {
        StatusCode::NOT_FOUND => StoreError::NotFound,
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
            StoreError::Unavailable(detail)
        }
        s if s.is_server_error() => StoreError::Unavailable(detail),
        _ => StoreError::Rejected(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RestPostStore {
        RestPostStore::new(RestStoreConfig {
            base_url: "https://project.example.co/".to_string(),
            api_key: "anon-key".to_string(),
            access_token: Some("user-token".to_string()),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_list_request_is_owner_scoped_and_ordered() {
        let owner = Uuid::new_v4();
        let request = store().list_request(owner).build().unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().path(), "/rest/v1/posts");
        let query = request.url().query().unwrap();
        assert!(query.contains(&format!("user_id=eq.{owner}")));
        assert!(query.contains("order=created_at.desc"));
        assert_eq!(
            request.headers()["authorization"].to_str().unwrap(),
            "Bearer user-token"
        );
        assert_eq!(request.headers()["apikey"].to_str().unwrap(), "anon-key");
    }

    #[test]
    fn test_row_request_asks_for_representation() {
        let id = Uuid::new_v4();
        let request = store().row_request(Method::PATCH, id).build().unwrap();

        assert_eq!(request.url().query(), Some(format!("id=eq.{id}").as_str()));
        assert_eq!(
            request.headers()["prefer"].to_str().unwrap(),
            "return=representation"
        );
    }

    #[test]
    fn test_status_mapping() {
        let body = StoreErrorBody {
            message: "new row violates row-level security policy".to_string(),
            code: Some("42501".to_string()),
            ..Default::default()
        };

        assert_eq!(
            status_error(StatusCode::NOT_FOUND, &body),
            StoreError::NotFound
        );
        assert!(matches!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, &body),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, &body),
            StoreError::Unavailable(_)
        ));
        assert_eq!(
            status_error(StatusCode::FORBIDDEN, &body),
            StoreError::Rejected("new row violates row-level security policy (42501)".to_string())
        );
    }

    #[test]
    fn test_empty_error_body_uses_status() {
        let err = status_error(StatusCode::BAD_REQUEST, &StoreErrorBody::default());
        assert_eq!(err, StoreError::Rejected("400 Bad Request".to_string()));
    }

    #[test]
    fn test_single_row() {
        assert_eq!(RestPostStore::single(Vec::new()), Err(StoreError::NotFound));
    }
}
