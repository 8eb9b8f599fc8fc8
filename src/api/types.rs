use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::intake::Identity;
use crate::quiz::{ArchetypeId, Language, ResponseSet};
use crate::scoring::QuizResults;

/// Every service response is wrapped in this envelope
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Returned by `POST /welcome`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WelcomeReceipt {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartRequest<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub mobile_number: &'a str,
    pub language: Language,
}

/// Server-side session, possibly resumed from an earlier visit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStart {
    pub session_id: String,
    #[serde(default)]
    pub current_question: usize,
    #[serde(default, deserialize_with = "lenient_responses")]
    pub responses: ResponseSet,
    #[serde(default)]
    pub total_questions_answered: usize,
    #[serde(default)]
    pub is_resuming: bool,
}

/// Saved answers the server sends back are only a resume hint. If they do not
/// decode, resume from scratch but keep the session.
fn lenient_responses<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ResponseSet, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match serde_json::from_value(value) {
        Ok(responses) => Ok(responses),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unreadable server progress");
            Ok(ResponseSet::new())
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate<'a> {
    pub current_question: usize,
    pub responses: &'a ResponseSet,
}

/// Final scored result sent to `POST /quiz`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub responses: ResponseSet,
    pub scores: BTreeMap<ArchetypeId, u32>,
    pub percentages: BTreeMap<ArchetypeId, u32>,
    pub primary_archetype: ArchetypeId,
    pub secondary_archetype: Option<ArchetypeId>,
    pub weakest_archetype: Option<ArchetypeId>,
    pub primary_archetype_percentage: u32,
    pub language: Language,
}

impl QuizSubmission {
    /// Returns None when `results` has no ranking to report
    pub fn new(
        user_id: impl Into<String>,
        identity: &Identity,
        responses: &ResponseSet,
        results: &QuizResults,
        language: Language,
    ) -> Option<Self> {
        let primary = results.primary()?;
        Some(Self {
            user_id: user_id.into(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            mobile_number: identity.mobile_number.clone(),
            responses: responses.clone(),
            scores: results.scores.clone(),
            percentages: results.percentages.clone(),
            primary_archetype: primary,
            secondary_archetype: results.secondary(),
            weakest_archetype: results.weakest(),
            primary_archetype_percentage: results.percentage(primary),
            language,
        })
    }
}

/// Returned by `POST /quiz`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub submission_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Likert;
    use crate::scoring::score_responses;

    fn identity() -> Identity {
        Identity {
            first_name: "Sara".into(),
            last_name: "Ahmadi".into(),
            mobile_number: "09121234567".into(),
            country: "Iran".into(),
            city: "Tehran".into(),
        }
    }

    #[test]
    fn test_submission_payload_shape() {
        let responses: ResponseSet = [(1, Likert::new(5).unwrap())].into_iter().collect();
        let results = score_responses(&responses);
        let submission =
            QuizSubmission::new("u-1", &identity(), &responses, &results, Language::Fa).unwrap();

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["userId"], "u-1");
        assert_eq!(json["firstName"], "Sara");
        assert_eq!(json["mobileNumber"], "09121234567");
        assert_eq!(json["responses"]["1"], 5);
        assert_eq!(json["scores"]["rostam"], 5);
        assert_eq!(json["percentages"]["rostam"], 17);
        assert_eq!(json["primaryArchetype"], "rostam");
        assert_eq!(json["secondaryArchetype"], "simorgh");
        assert_eq!(json["weakestArchetype"], "manizheh");
        assert_eq!(json["primaryArchetypePercentage"], 17);
        assert_eq!(json["language"], "fa");
        assert_eq!(json["scores"].as_object().unwrap().len(), 10);
    }

    #[test]
    fn test_session_start_defaults() {
        let session: SessionStart = serde_json::from_str(r#"{"sessionId":"s1"}"#).unwrap();
        assert_eq!(session.session_id, "s1");
        assert_eq!(session.current_question, 0);
        assert!(session.responses.is_empty());
        assert!(!session.is_resuming);
    }

    #[test]
    fn test_session_start_resuming() {
        let body = r#"{
            "sessionId": "s2",
            "currentQuestion": 3,
            "responses": {"1": 4, "11": 2},
            "totalQuestionsAnswered": 2,
            "isResuming": true
        }"#;
        let session: SessionStart = serde_json::from_str(body).unwrap();
        assert!(session.is_resuming);
        assert_eq!(session.current_question, 3);
        assert_eq!(session.responses.get(11), Likert::new(2));
    }

    #[test]
    fn test_session_start_keeps_id_when_progress_is_bad() {
        let body = r#"{"sessionId":"s3","currentQuestion":2,"responses":{"1":4,"2":0},"isResuming":true}"#;
        let session: SessionStart = serde_json::from_str(body).unwrap();
        assert_eq!(session.session_id, "s3");
        assert!(session.is_resuming);
        assert!(session.responses.is_empty());

        let session: SessionStart =
            serde_json::from_str(r#"{"sessionId":"s4","responses":null}"#).unwrap();
        assert_eq!(session.session_id, "s4");
        assert!(session.responses.is_empty());
    }

    #[test]
    fn test_envelope_and_receipts() {
        let welcome: Envelope<WelcomeReceipt> =
            serde_json::from_str(r#"{"success":true,"data":{"_id":"abc"}}"#).unwrap();
        assert_eq!(welcome.data.unwrap().id, "abc");

        let failed: Envelope<SubmissionReceipt> =
            serde_json::from_str(r#"{"success":false,"message":"nope"}"#).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.message.as_deref(), Some("nope"));
        assert!(failed.data.is_none());

        let empty: Envelope<Value> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(empty.data.is_none());
    }

    #[test]
    fn test_progress_update_shape() {
        let responses: ResponseSet = [(2, Likert::new(3).unwrap())].into_iter().collect();
        let json = serde_json::to_value(ProgressUpdate {
            current_question: 1,
            responses: &responses,
        })
        .unwrap();
        assert_eq!(json["currentQuestion"], 1);
        assert_eq!(json["responses"]["2"], 3);
    }
}
