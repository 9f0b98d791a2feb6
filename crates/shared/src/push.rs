//! Push gateway client for device notifications.
//!
//! Uses `reqwest` to POST FCM legacy-style payloads authenticated with a
//! server key.

use reqwest::{Client, header};
use serde::Serialize;
use thiserror::Error;

use crate::config::PushConfig;

/// Push gateway errors.
#[derive(Debug, Error)]
pub enum PushError {
    /// No server key is configured, so nothing can be sent.
    #[error("push gateway server key is not configured")]
    NotConfigured,
    /// The HTTP client could not be built.
    #[error("failed to build push client: {0}")]
    Client(String),
    /// The payload could not be serialized.
    #[error("failed to serialize push payload: {0}")]
    Serialize(String),
    /// The request did not reach the gateway or the gateway did not answer.
    #[error("push gateway request failed: {0}")]
    Transport(String),
    /// The gateway answered with a non-success status.
    #[error("push gateway rejected the notification with status {status}: {body}")]
    Rejected {
        /// HTTP status returned by the gateway.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
}

/// The visible part of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushNotification {
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
}

/// Payload accepted by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushPayload {
    /// Target device token.
    pub to: String,
    /// Delivery priority.
    pub priority: &'static str,
    /// Notification content.
    pub notification: PushNotification,
}

impl PushPayload {
    /// Creates a high-priority payload for a device token.
    #[must_use]
    pub fn high_priority(to: impl Into<String>, notification: PushNotification) -> Self {
        Self {
            to: to.into(),
            priority: "high",
            notification,
        }
    }
}

/// HTTP client for the push gateway.
#[derive(Clone)]
pub struct PushClient {
    http: Client,
    endpoint: String,
    server_key: Option<String>,
}

impl std::fmt::Debug for PushClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushClient")
            .field("endpoint", &self.endpoint)
            .field("server_key", &self.server_key.as_ref().map(|_| "[hidden]"))
            .finish_non_exhaustive()
    }
}

impl PushClient {
    /// Creates a push client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `PushError::Client` if the TLS backend cannot be initialized.
    pub fn new(config: &PushConfig) -> Result<Self, PushError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PushError::Client(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            server_key: config.server_key.clone().filter(|key| !key.is_empty()),
        })
    }

    /// Returns true if a server key is available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.server_key.is_some()
    }

    /// Sends one payload and returns the gateway's HTTP status.
    ///
    /// # Errors
    ///
    /// Returns an error if the client is unconfigured, the request fails, or
    /// the gateway answers with a non-success status.
    pub async fn send(&self, payload: &PushPayload) -> Result<u16, PushError> {
        let Some(server_key) = &self.server_key else {
            return Err(PushError::NotConfigured);
        };

        let body = serde_json::to_vec(payload).map_err(|e| PushError::Serialize(e.to_string()))?;

        let response = self
            .http
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, format!("key={server_key}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PushError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(status = status.as_u16(), "push gateway accepted notification");
        Ok(status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    type Captured = Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>;

    async fn spawn_gateway(status: StatusCode) -> (String, Captured) {
        let captured: Captured = Arc::default();
        let sink = captured.clone();
        let app = Router::new().route(
            "/fcm/send",
            post(move |headers: HeaderMap, Json(body): Json<serde_json::Value>| {
                let sink = sink.clone();
                async move {
                    let auth = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    sink.lock().unwrap().push((auth, body));
                    status
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/fcm/send"), captured)
    }

    fn config(endpoint: String, server_key: Option<&str>) -> PushConfig {
        PushConfig {
            endpoint,
            server_key: server_key.map(String::from),
            timeout_secs: 5,
        }
    }

    fn payload() -> PushPayload {
        PushPayload::high_priority(
            "device-token",
            PushNotification {
                title: "Alice sent $5.00".to_string(),
                body: "pizza".to_string(),
            },
        )
    }

    #[test]
    fn test_payload_wire_format() {
        let json = serde_json::to_value(payload()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "to": "device-token",
                "priority": "high",
                "notification": { "title": "Alice sent $5.00", "body": "pizza" }
            })
        );
    }

    #[tokio::test]
    async fn test_send_posts_payload_with_server_key() {
        let (endpoint, captured) = spawn_gateway(StatusCode::OK).await;
        let client = PushClient::new(&config(endpoint, Some("secret-key"))).unwrap();

        let status = client.send(&payload()).await.unwrap();

        assert_eq!(status, 200);
        let requests = captured.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0.as_deref(), Some("key=secret-key"));
        assert_eq!(requests[0].1["to"], "device-token");
        assert_eq!(requests[0].1["notification"]["body"], "pizza");
    }

    #[tokio::test]
    async fn test_send_reports_rejection() {
        let (endpoint, _) = spawn_gateway(StatusCode::UNAUTHORIZED).await;
        let client = PushClient::new(&config(endpoint, Some("bad-key"))).unwrap();

        let result = client.send(&payload()).await;

        assert!(matches!(result, Err(PushError::Rejected { status: 401, .. })));
    }

    #[tokio::test]
    async fn test_send_without_key_is_not_configured() {
        let client = PushClient::new(&config("http://127.0.0.1:9/".to_string(), None)).unwrap();

        assert!(!client.is_configured());
        assert!(matches!(
            client.send(&payload()).await,
            Err(PushError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_empty_key_counts_as_unconfigured() {
        let client =
            PushClient::new(&config("http://127.0.0.1:9/".to_string(), Some(""))).unwrap();
        assert!(!client.is_configured());
    }

    #[test]
    fn test_debug_hides_server_key() {
        let client = PushClient::new(&config("http://gw".to_string(), Some("secret"))).unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret"));
    }
}
