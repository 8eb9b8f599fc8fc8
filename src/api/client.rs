use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::types::{
    Envelope, ProgressUpdate, QuizSubmission, SessionStart, SessionStartRequest,
    SubmissionReceipt, WelcomeReceipt,
};
use super::{ApiError, QuizBackend};
use crate::intake::Identity;
use crate::quiz::{Language, ResponseSet};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8005/api";

/// HTTP client for the remote persistence service
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("archetype-quiz/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and check both the HTTP status and the envelope's
    /// `success` flag. Returns the whole JSON body.
    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            return Err(ApiError::Rejected(message));
        }

        let value: Value =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

        if value.get("success").and_then(Value::as_bool) == Some(false) {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Request was not successful")
                .to_string();
            return Err(ApiError::Rejected(message));
        }

        Ok(value)
    }

    /// Send and decode the envelope's `data` payload
    async fn send_data<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let value = self.send(request).await?;
        let envelope: Envelope<T> =
            serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
        envelope
            .data
            .ok_or_else(|| ApiError::Decode("response has no data".to_string()))
    }

    pub async fn health(&self) -> Result<Value, ApiError> {
        self.send(self.client.get(self.url("health"))).await
    }

    /// Every identity registered through `/welcome`
    pub async fn welcome_submissions(&self) -> Result<Value, ApiError> {
        self.send(self.client.get(self.url("welcome"))).await
    }

    pub async fn welcome_submission(&self, id: &str) -> Result<Value, ApiError> {
        self.send(self.client.get(self.url(&format!("welcome/{}", id))))
            .await
    }

    pub async fn get_submission(&self, submission_id: &str) -> Result<Value, ApiError> {
        self.send(self.client.get(self.url(&format!("quiz/{}", submission_id))))
            .await
    }

    pub async fn user_submissions(&self, user_id: &str) -> Result<Value, ApiError> {
        self.send(self.client.get(self.url(&format!("quiz/user/{}", user_id))))
            .await
    }

    pub async fn analytics_summary(&self) -> Result<Value, ApiError> {
        self.send(self.client.get(self.url("quiz/analytics/summary")))
            .await
    }
}

#[async_trait]
impl QuizBackend for ApiClient {
    async fn submit_identity(&self, identity: &Identity) -> Result<String, ApiError> {
        let receipt: WelcomeReceipt = self
            .send_data(self.client.post(self.url("welcome")).json(identity))
            .await?;
        Ok(receipt.id)
    }

    async fn start_session(
        &self,
        identity: &Identity,
        language: Language,
    ) -> Result<SessionStart, ApiError> {
        let body = SessionStartRequest {
            first_name: &identity.first_name,
            last_name: &identity.last_name,
            mobile_number: &identity.mobile_number,
            language,
        };
        self.send_data(self.client.post(self.url("quiz-session/start")).json(&body))
            .await
    }

    async fn save_progress(
        &self,
        session_id: &str,
        current_question: usize,
        responses: &ResponseSet,
    ) -> Result<(), ApiError> {
        let body = ProgressUpdate {
            current_question,
            responses,
        };
        let url = self.url(&format!("quiz-session/{}/progress", session_id));
        self.send(self.client.put(url).json(&body)).await?;
        Ok(())
    }

    async fn complete_session(&self, session_id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("quiz-session/{}/complete", session_id));
        self.send(self.client.put(url)).await?;
        Ok(())
    }

    async fn abandon_session(&self, session_id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("quiz-session/{}/abandon", session_id));
        self.send(self.client.put(url)).await?;
        Ok(())
    }

    async fn submit_results(
        &self,
        submission: &QuizSubmission,
    ) -> Result<SubmissionReceipt, ApiError> {
        self.send_data(self.client.post(self.url("quiz")).json(submission))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer a single request with `body` and report its request line
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/api", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            request.lines().next().unwrap_or_default().to_string()
        });
        (base_url, handle)
    }

    fn client(base_url: &str) -> ApiClient {
        let _ = rustls::crypto::ring::default_provider().install_default();
        ApiClient::new(base_url, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = client("http://localhost:8005/api/");
        assert_eq!(client.base_url(), "http://localhost:8005/api");
        assert_eq!(client.url("health"), "http://localhost:8005/api/health");
        assert_eq!(
            client.url("/quiz-session/abc/progress"),
            "http://localhost:8005/api/quiz-session/abc/progress"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 1 is reserved and nothing listens there
        let client = client("http://127.0.0.1:1/api");
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "got {:?}", err);
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_welcome_submissions_lists_registry() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"success":true,"data":[{"_id":"a1","firstName":"Sara"}]}"#).await;
        let body = client(&base_url).welcome_submissions().await.unwrap();
        assert_eq!(body["data"][0]["_id"], "a1");
        assert_eq!(server.await.unwrap(), "GET /api/welcome HTTP/1.1");
    }

    #[tokio::test]
    async fn test_welcome_submission_by_id() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"success":true,"data":{"_id":"a1","city":"Tehran"}}"#).await;
        let body = client(&base_url).welcome_submission("a1").await.unwrap();
        assert_eq!(body["data"]["city"], "Tehran");
        assert_eq!(server.await.unwrap(), "GET /api/welcome/a1 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_error_status_uses_server_message() {
        let (base_url, server) =
            serve_once("404 Not Found", r#"{"success":false,"message":"Submission not found"}"#)
                .await;
        let err = client(&base_url).welcome_submission("missing").await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Submission not found"));
        server.await.unwrap();
    }
}
