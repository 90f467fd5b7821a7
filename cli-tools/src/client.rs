//! Native HTTP client implementation using reqwest

use reqwest::Client;
use shared::api::{
    ApiClientConfig, ApiError, CreateSessionRequest, CreateSessionResponse, DirectDnsApi,
};

/// Native API client using reqwest
pub struct NativeApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl NativeApiClient {
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        match self.config.timeout {
            Some(timeout) if e.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(e.to_string()),
        }
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(|e| self.map_send_error(e))?;
        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl DirectDnsApi for NativeApiClient {
    async fn create_session(
        &self,
        req: CreateSessionRequest,
    ) -> Result<CreateSessionResponse, ApiError> {
        let url = self.config.create_url();
        tracing::debug!(%url, hostname = %req.hostname, "creating session");

        let mut request = self.client.post(&url).json(&req);
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: &str) -> NativeApiClient {
        NativeApiClient::new(ApiClientConfig::default().with_api_base_url(base_url)).unwrap()
    }

    #[tokio::test]
    async fn test_create_session_posts_json_body() {
        let seen: Arc<Mutex<Vec<Value>>> = Arc::default();
        let router = {
            let seen = seen.clone();
            Router::new().route(
                "/api/create",
                post(move |Json(body): Json<Value>| {
                    let seen = seen.clone();
                    async move {
                        seen.lock().unwrap().push(body);
                        Json(json!({
                            "token": "xyz",
                            "full_url": "xyz.directdns.net",
                            "domain": "directdns.net"
                        }))
                    }
                }),
            )
        };
        let base = spawn_mock(router).await;

        let client = client_for(&base);
        let resp = client
            .create_session(CreateSessionRequest::from_form("example.com", ""))
            .await
            .unwrap();

        assert_eq!(resp.token, "xyz");
        assert_eq!(client.config().proxy_url(&resp.token), "https://xyz.directdns.net/");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0],
            json!({ "hostname": "example.com", "ip_address": null })
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_creation_error() {
        let router = Router::new().route(
            "/api/create",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal DB Error") }),
        );
        let base = spawn_mock(router).await;

        let err = client_for(&base)
            .create_session(CreateSessionRequest::from_form("example.com", "10.0.0.1"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                body: "Internal DB Error".to_string()
            }
        );
        assert_eq!(err.to_string(), "Failed to create session");
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let router = Router::new().route("/api/create", post(|| async { "not json" }));
        let base = spawn_mock(router).await;

        let err = client_for(&base)
            .create_session(CreateSessionRequest::from_form("example.com", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let router = Router::new().route(
            "/api/create",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "token": "late" }))
            }),
        );
        let base = spawn_mock(router).await;

        let config = ApiClientConfig::default()
            .with_api_base_url(&base)
            .with_timeout(Some(Duration::from_millis(100)));
        let err = NativeApiClient::new(config)
            .unwrap()
            .create_session(CreateSessionRequest::from_form("example.com", ""))
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Timeout(Duration::from_millis(100)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{}", addr))
            .create_session(CreateSessionRequest::from_form("example.com", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
    }
}
