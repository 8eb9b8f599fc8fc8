pub mod client;
pub mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use types::{QuizSubmission, SessionStart, SubmissionReceipt};

use async_trait::async_trait;
use thiserror::Error;

use crate::intake::Identity;
use crate::quiz::{Language, ResponseSet};

/// Failure talking to the remote persistence service
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The service answered with a non-2xx status or `success: false`
    #[error("{0}")]
    Rejected(String),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// The quiz-flow operations of the remote service
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Register the identity form. Returns the id the service assigned.
    async fn submit_identity(&self, identity: &Identity) -> Result<String, ApiError>;

    async fn start_session(
        &self,
        identity: &Identity,
        language: Language,
    ) -> Result<SessionStart, ApiError>;

    async fn save_progress(
        &self,
        session_id: &str,
        current_question: usize,
        responses: &ResponseSet,
    ) -> Result<(), ApiError>;

    async fn complete_session(&self, session_id: &str) -> Result<(), ApiError>;

    async fn abandon_session(&self, session_id: &str) -> Result<(), ApiError>;

    async fn submit_results(
        &self,
        submission: &QuizSubmission,
    ) -> Result<SubmissionReceipt, ApiError>;
}
