//! `reqwest`-backed implementation of [`UserApi`].
//!
//! Maps the five operations onto `/api/users[/:id[/block]]`. Every request
//! carries a fresh `X-Request-Id` which is logged with the outcome so a
//! failure can be matched against server logs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ApiError, ListParams, UserApi};
use crate::config::ApiConfig;
use crate::constants::{APP_NAME, BLOCK_SUBRESOURCE, REQUEST_ID_HEADER, USERS_PATH, VERSION};
use crate::models::user::{BlockRequest, UpdatedUser, UserEnvelope, UserListEnvelope};
use crate::models::{UserPatch, UserRecord};

/// HTTP client for the remote user service.
#[derive(Clone)]
pub struct HttpUserApi {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl std::fmt::Debug for HttpUserApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpUserApi")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl HttpUserApi {
    /// Build a client from connection settings.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| ApiError::Transport(format!("invalid base URL {:?}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Transport(format!(
                "base URL {:?} cannot carry a path",
                config.base_url
            )));
        }

        let mut builder = reqwest::Client::builder().user_agent(format!("{APP_NAME}/{VERSION}"));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// Resolve `/api/users` plus extra path segments against the base URL.
    ///
    /// Segments are percent-encoded, so an id containing `/` or `?` stays a
    /// single segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(USERS_PATH.split('/').filter(|s| !s.is_empty()));
            path.extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request_id = uuid::Uuid::new_v4().to_string();
        let builder = self
            .client
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and turn non-2xx responses into [`ApiError`]s.
    ///
    /// `id` names the user the request targets; a 404 on such a request is
    /// reported as [`ApiError::NotFound`].
    async fn execute(&self, builder: RequestBuilder, id: Option<&str>) -> Result<Response, ApiError> {
        let request = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        debug!(%method, %path, %request_id, "sending request");
        let response = self.client.execute(request).await.map_err(|e| {
            warn!(%method, %path, %request_id, error = %e, "request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(%method, %path, %request_id, status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%method, %path, %request_id, status = status.as_u16(), "server rejected request");
        Err(error_from_status(status, &body, id))
    }
}

/// Map a non-success status and its body onto the error taxonomy.
fn error_from_status(status: StatusCode, body: &str, id: Option<&str>) -> ApiError {
    let message = server_message(body);
    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => ApiError::NotFound {
            id: id.to_string(),
            message,
        },
        (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => {
            ApiError::Validation(message.unwrap_or_default())
        }
        _ => ApiError::Http {
            status: status.as_u16(),
            message,
        },
    }
}

/// Extract `message` (or `error`) from a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list_users(&self, params: &ListParams) -> Result<Vec<UserRecord>, ApiError> {
        let mut url = self.endpoint(&[]);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        let response = self.execute(self.request(Method::GET, url), None).await?;
        let envelope: UserListEnvelope = decode(response).await?;
        Ok(envelope.users)
    }

    async fn get_user(&self, id: &str) -> Result<UserRecord, ApiError> {
        let url = self.endpoint(&[id]);
        let response = self.execute(self.request(Method::GET, url), Some(id)).await?;
        let envelope: UserEnvelope = decode(response).await?;
        Ok(envelope.user)
    }

    async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<UserRecord, ApiError> {
        let url = self.endpoint(&[id]);
        let builder = self.request(Method::PATCH, url).json(patch);
        let response = self.execute(builder, Some(id)).await?;
        let updated: UpdatedUser = decode(response).await?;
        Ok(updated.into_record())
    }

    async fn set_blocked(&self, id: &str, blocked: bool) -> Result<(), ApiError> {
        let url = self.endpoint(&[id, BLOCK_SUBRESOURCE]);
        let builder = self
            .request(Method::PATCH, url)
            .json(&BlockRequest { is_blocked: blocked });
        self.execute(builder, Some(id)).await?;
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&[id]);
        self.execute(self.request(Method::DELETE, url), Some(id)).await?;
        Ok(())
    }
}
