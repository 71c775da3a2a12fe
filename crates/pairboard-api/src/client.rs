//! Room REST client: request building, auth headers, and response parsing.

use pairboard_common::{RoomCode, RoomInfo};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::types::{
    CloseRoomResponse, CreateRoomResponse, HealthResponse, JoinRoomResponse, MonitoringReport,
};

/// Configuration for the room REST client.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL of the room backend, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Optional JWT from the identity provider. Required for create/join/
    /// close/monitoring; room-info and health reads work without it.
    pub access_token: Option<String>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            access_token: None,
        }
    }
}

/// Typed client for the room backend.
pub struct RoomApiClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl RoomApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Create a new interview room. Interviewer role, authenticated.
    pub async fn create_room(&self) -> Result<CreateRoomResponse, ApiError> {
        debug!("creating room");
        let request = self
            .authorize(self.http.post(self.url("/api/create-room")))
            .json(&serde_json::json!({}));
        Self::execute(request).await
    }

    /// Join an existing room as the candidate. Authenticated.
    pub async fn join_room(&self, code: &RoomCode) -> Result<JoinRoomResponse, ApiError> {
        debug!(room = %code, "joining room");
        let request = self
            .authorize(self.http.post(self.url("/api/join-room")))
            .json(&serde_json::json!({ "room_code": code }));
        Self::execute(request).await
    }

    /// Fetch the authoritative room snapshot. Unauthenticated read.
    pub async fn room_info(&self, code: &RoomCode) -> Result<RoomInfo, ApiError> {
        debug!(room = %code, "fetching room info");
        let request = self.http.get(self.url(&format!("/api/room/{code}")));
        Self::execute(request).await
    }

    /// Close a room. Interviewer role, authenticated. The backend notifies
    /// all connected participants with a `room_closed` message.
    pub async fn close_room(&self, code: &RoomCode) -> Result<CloseRoomResponse, ApiError> {
        debug!(room = %code, "closing room");
        let request = self.authorize(self.http.delete(self.url(&format!("/api/room/{code}"))));
        Self::execute(request).await
    }

    /// Fetch the server-side monitoring log. Interviewer role, authenticated.
    pub async fn monitoring(&self, code: &RoomCode) -> Result<MonitoringReport, ApiError> {
        debug!(room = %code, "fetching monitoring report");
        let request =
            self.authorize(self.http.get(self.url(&format!("/api/room/{code}/monitoring"))));
        Self::execute(request).await
    }

    /// Backend health probe.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let request = self.http.get(self.url("/api/health"));
        Self::execute(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.access_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                detail: error_detail(status.as_u16(), &body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Extract the server's `detail` field from an error body, falling back to a
/// bare status line when the body is not the expected JSON shape.
fn error_detail(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_prefers_server_message() {
        let detail = error_detail(404, r#"{"detail": "Room not found"}"#);
        assert_eq!(detail, "Room not found");
    }

    #[test]
    fn error_detail_falls_back_on_garbage() {
        assert_eq!(error_detail(500, "<html>oops</html>"), "HTTP 500");
        assert_eq!(error_detail(502, ""), "HTTP 502");
        assert_eq!(error_detail(403, r#"{"error": "nope"}"#), "HTTP 403");
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = RoomApiClient::new(ApiConfig {
            base_url: "http://localhost:8000/".into(),
            access_token: None,
        });
        assert_eq!(client.url("/api/health"), "http://localhost:8000/api/health");
    }

    #[test]
    fn config_debug_redacts_token() {
        let config = ApiConfig {
            base_url: "http://localhost:8000".into(),
            access_token: Some("secret-jwt".into()),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-jwt"));
        assert!(debug.contains("REDACTED"));
    }
}
