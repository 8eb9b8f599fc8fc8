use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::api::{ApiError, QuizBackend, QuizSubmission, SessionStart};
use crate::intake::Identity;
use crate::quiz::{Language, ResponseSet};

/// Which remote operation an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOp {
    RegisterIdentity,
    StartSession,
    SaveProgress,
    CompleteSession,
    AbandonSession,
    SubmitResults,
}

impl fmt::Display for SyncOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncOp::RegisterIdentity => "register identity",
            SyncOp::StartSession => "start session",
            SyncOp::SaveProgress => "save progress",
            SyncOp::CompleteSession => "complete session",
            SyncOp::AbandonSession => "abandon session",
            SyncOp::SubmitResults => "submit results",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of a remote operation, reported on the agent's channel
#[derive(Debug, Clone)]
pub enum SyncEvent {
    IdentityRegistered { id: String },
    SessionStarted { session_id: String, resuming: bool },
    ProgressSaved { current_question: usize },
    SessionCompleted,
    SessionAbandoned,
    Submitted { submission_id: String },
    Failed { op: SyncOp, error: ApiError },
}

/// Best-effort mirror of the local quiz state on the remote service.
///
/// Nothing here ever returns an error to the caller. Failures are logged and
/// reported as `SyncEvent::Failed`. Without a backend every call is a no-op.
pub struct SyncAgent {
    backend: Option<Arc<dyn QuizBackend>>,
    session_id: Option<String>,
    submitting: Arc<AtomicBool>,
    tasks: JoinSet<()>,
    tx: mpsc::UnboundedSender<SyncEvent>,
    rx: mpsc::UnboundedReceiver<SyncEvent>,
}

impl SyncAgent {
    pub fn new(backend: Option<Arc<dyn QuizBackend>>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            backend,
            session_id: None,
            submitting: Arc::new(AtomicBool::new(false)),
            tasks: JoinSet::new(),
            tx,
            rx,
        }
    }

    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn is_online(&self) -> bool {
        self.backend.is_some()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// True while a final submission task is running
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    fn emit(tx: &mpsc::UnboundedSender<SyncEvent>, event: SyncEvent) {
        // Receiver lives as long as the agent; a send error only happens during teardown
        let _ = tx.send(event);
    }

    fn fail(tx: &mpsc::UnboundedSender<SyncEvent>, op: SyncOp, error: ApiError) {
        tracing::warn!(%op, %error, "remote sync failed");
        Self::emit(tx, SyncEvent::Failed { op, error });
    }

    /// Send the identity form. Returns the id the service assigned.
    pub async fn register_identity(&self, identity: &Identity) -> Option<String> {
        let backend = self.backend.as_ref()?;
        match backend.submit_identity(identity).await {
            Ok(id) => {
                tracing::debug!(%id, "identity registered");
                Self::emit(&self.tx, SyncEvent::IdentityRegistered { id: id.clone() });
                Some(id)
            }
            Err(e) => {
                Self::fail(&self.tx, SyncOp::RegisterIdentity, e);
                None
            }
        }
    }

    /// Start (or resume) the server-side session and remember its id
    pub async fn start_session(
        &mut self,
        identity: &Identity,
        language: Language,
    ) -> Option<SessionStart> {
        let backend = self.backend.as_ref()?;
        match backend.start_session(identity, language).await {
            Ok(session) => {
                tracing::debug!(
                    session_id = %session.session_id,
                    resuming = session.is_resuming,
                    answered = session.total_questions_answered,
                    "session started"
                );
                Self::emit(
                    &self.tx,
                    SyncEvent::SessionStarted {
                        session_id: session.session_id.clone(),
                        resuming: session.is_resuming,
                    },
                );
                self.session_id = Some(session.session_id.clone());
                Some(session)
            }
            Err(e) => {
                Self::fail(&self.tx, SyncOp::StartSession, e);
                None
            }
        }
    }

    /// Reuse a session id kept from an earlier run
    pub fn adopt_session(&mut self, session_id: impl Into<String>) {
        self.session_id = Some(session_id.into());
    }

    pub fn save_progress(&mut self, current_question: usize, responses: &ResponseSet) {
        let Some(backend) = self.backend.clone() else {
            return;
        };
        let Some(session_id) = self.session_id.clone() else {
            tracing::debug!("no active session, progress not sent");
            return;
        };

        let responses = responses.clone();
        let tx = self.tx.clone();
        self.tasks.spawn(async move {
            match backend
                .save_progress(&session_id, current_question, &responses)
                .await
            {
                Ok(()) => Self::emit(&tx, SyncEvent::ProgressSaved { current_question }),
                Err(e) => Self::fail(&tx, SyncOp::SaveProgress, e),
            }
        });
    }

    pub fn complete_session(&mut self) {
        self.close_session(SyncOp::CompleteSession);
    }

    pub fn abandon_session(&mut self) {
        self.close_session(SyncOp::AbandonSession);
    }

    fn close_session(&mut self, op: SyncOp) {
        let Some(backend) = self.backend.clone() else {
            return;
        };
        let Some(session_id) = self.session_id.take() else {
            tracing::debug!(%op, "no active session");
            return;
        };

        let tx = self.tx.clone();
        self.tasks.spawn(async move {
            let (result, done) = if op == SyncOp::AbandonSession {
                (
                    backend.abandon_session(&session_id).await,
                    SyncEvent::SessionAbandoned,
                )
            } else {
                (
                    backend.complete_session(&session_id).await,
                    SyncEvent::SessionCompleted,
                )
            };
            match result {
                Ok(()) => Self::emit(&tx, done),
                Err(e) => Self::fail(&tx, op, e),
            }
        });
    }

    /// Send the final result in the background.
    ///
    /// Returns false without sending anything when a submission is already in flight.
    pub fn submit_results(&mut self, submission: QuizSubmission) -> bool {
        let Some(backend) = self.backend.clone() else {
            return false;
        };
        if self.submitting.swap(true, Ordering::SeqCst) {
            tracing::debug!("submission already in flight");
            return false;
        }

        let submitting = Arc::clone(&self.submitting);
        let tx = self.tx.clone();
        self.tasks.spawn(async move {
            match backend.submit_results(&submission).await {
                Ok(receipt) => {
                    tracing::debug!(submission_id = %receipt.submission_id, "results submitted");
                    Self::emit(
                        &tx,
                        SyncEvent::Submitted {
                            submission_id: receipt.submission_id,
                        },
                    );
                }
                Err(e) => Self::fail(&tx, SyncOp::SubmitResults, e),
            }
            submitting.store(false, Ordering::SeqCst);
        });
        true
    }

    /// Wait for outstanding tasks. Returns false if the timeout hit first;
    /// unfinished tasks are then aborted.
    pub async fn finish(&mut self, timeout: Duration) -> bool {
        let tasks = &mut self.tasks;
        let drained = tokio::time::timeout(timeout, async {
            while let Some(joined) = tasks.join_next().await {
                if let Err(e) = joined {
                    tracing::warn!(error = %e, "sync task did not complete");
                }
            }
        })
        .await;

        if drained.is_err() {
            tracing::warn!(pending = self.tasks.len(), "gave up waiting for remote sync");
            self.tasks.abort_all();
            self.submitting.store(false, Ordering::SeqCst);
            return false;
        }
        true
    }

    /// All events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::SubmissionReceipt;
    use crate::quiz::Likert;
    use crate::scoring::score_responses;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every call; fails all calls when `fail` is set
    #[derive(Default)]
    pub(crate) struct FakeBackend {
        pub calls: Mutex<Vec<String>>,
        pub fail: bool,
        pub resume: Option<SessionStart>,
    }

    impl FakeBackend {
        fn record(&self, call: String) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                Err(ApiError::Transport("connection refused".into()))
            } else {
                Ok(())
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QuizBackend for FakeBackend {
        async fn submit_identity(&self, identity: &Identity) -> Result<String, ApiError> {
            self.record(format!("welcome {}", identity.first_name))?;
            Ok("user-1".into())
        }

        async fn start_session(
            &self,
            _identity: &Identity,
            language: Language,
        ) -> Result<SessionStart, ApiError> {
            self.record(format!("start {}", language))?;
            Ok(self.resume.clone().unwrap_or(SessionStart {
                session_id: "sess-1".into(),
                current_question: 0,
                responses: ResponseSet::new(),
                total_questions_answered: 0,
                is_resuming: false,
            }))
        }

        async fn save_progress(
            &self,
            session_id: &str,
            current_question: usize,
            responses: &ResponseSet,
        ) -> Result<(), ApiError> {
            self.record(format!(
                "progress {} {} {}",
                session_id,
                current_question,
                responses.len()
            ))
        }

        async fn complete_session(&self, session_id: &str) -> Result<(), ApiError> {
            self.record(format!("complete {}", session_id))
        }

        async fn abandon_session(&self, session_id: &str) -> Result<(), ApiError> {
            self.record(format!("abandon {}", session_id))
        }

        async fn submit_results(
            &self,
            submission: &QuizSubmission,
        ) -> Result<SubmissionReceipt, ApiError> {
            self.record(format!("submit {}", submission.primary_archetype))?;
            Ok(SubmissionReceipt {
                submission_id: "sub-1".into(),
                user_id: Some(submission.user_id.clone()),
                created_at: None,
            })
        }
    }

    pub(crate) fn identity() -> Identity {
        Identity {
            first_name: "Sara".into(),
            last_name: "Ahmadi".into(),
            mobile_number: "09121234567".into(),
            country: "Iran".into(),
            city: "Tehran".into(),
        }
    }

    fn submission() -> QuizSubmission {
        let responses: ResponseSet = [(1, Likert::new(5).unwrap())].into_iter().collect();
        let results = score_responses(&responses);
        QuizSubmission::new("user-1", &identity(), &responses, &results, Language::En).unwrap()
    }

    fn online(fake: FakeBackend) -> (SyncAgent, Arc<FakeBackend>) {
        let fake = Arc::new(fake);
        let backend: Arc<dyn QuizBackend> = fake.clone();
        (SyncAgent::new(Some(backend)), fake)
    }

    #[tokio::test]
    async fn test_offline_agent_is_noop() {
        let mut agent = SyncAgent::offline();
        assert!(agent.register_identity(&identity()).await.is_none());
        assert!(agent.start_session(&identity(), Language::Fa).await.is_none());
        agent.save_progress(1, &ResponseSet::new());
        agent.complete_session();
        assert!(!agent.submit_results(submission()));
        assert!(agent.finish(Duration::from_secs(1)).await);
        assert!(agent.drain_events().is_empty());
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let (mut agent, fake) = online(FakeBackend::default());

        assert_eq!(agent.register_identity(&identity()).await.as_deref(), Some("user-1"));
        let session = agent.start_session(&identity(), Language::Fa).await.unwrap();
        assert_eq!(session.session_id, "sess-1");
        assert_eq!(agent.session_id(), Some("sess-1"));

        let responses: ResponseSet = [(1, Likert::new(3).unwrap())].into_iter().collect();
        agent.save_progress(1, &responses);
        assert!(agent.finish(Duration::from_secs(1)).await);

        agent.complete_session();
        assert_eq!(agent.session_id(), None);
        assert!(agent.finish(Duration::from_secs(1)).await);

        assert_eq!(
            fake.calls(),
            vec![
                "welcome Sara",
                "start fa",
                "progress sess-1 1 1",
                "complete sess-1",
            ]
        );

        let events = agent.drain_events();
        assert!(matches!(events.last(), Some(SyncEvent::SessionCompleted)));
    }

    #[tokio::test]
    async fn test_progress_without_session_is_skipped() {
        let (mut agent, fake) = online(FakeBackend::default());
        agent.save_progress(3, &ResponseSet::new());
        agent.abandon_session();
        assert!(agent.finish(Duration::from_secs(1)).await);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_adopted_session_is_used() {
        let (mut agent, fake) = online(FakeBackend::default());
        agent.adopt_session("kept-7");
        agent.abandon_session();
        assert!(agent.finish(Duration::from_secs(1)).await);
        assert_eq!(fake.calls(), vec!["abandon kept-7"]);
        assert!(matches!(
            agent.drain_events().as_slice(),
            [SyncEvent::SessionAbandoned]
        ));
    }

    #[tokio::test]
    async fn test_failures_become_events() {
        let (mut agent, _fake) = online(FakeBackend {
            fail: true,
            ..Default::default()
        });

        assert!(agent.register_identity(&identity()).await.is_none());
        assert!(agent.start_session(&identity(), Language::En).await.is_none());
        assert!(agent.submit_results(submission()));
        assert!(agent.finish(Duration::from_secs(1)).await);

        let failed: Vec<SyncOp> = agent
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                SyncEvent::Failed { op, .. } => Some(op),
                _ => None,
            })
            .collect();
        assert_eq!(
            failed,
            vec![SyncOp::RegisterIdentity, SyncOp::StartSession, SyncOp::SubmitResults]
        );
    }

    #[tokio::test]
    async fn test_second_submission_blocked_while_in_flight() {
        let (mut agent, fake) = online(FakeBackend::default());

        // Current-thread runtime: the first task cannot run before we yield
        assert!(agent.submit_results(submission()));
        assert!(agent.is_submitting());
        assert!(!agent.submit_results(submission()));

        assert!(agent.finish(Duration::from_secs(1)).await);
        assert!(!agent.is_submitting());
        assert_eq!(fake.calls(), vec!["submit rostam"]);

        // Guard is released once the task ends
        assert!(agent.submit_results(submission()));
        assert!(agent.finish(Duration::from_secs(1)).await);
        assert_eq!(fake.calls().len(), 2);

        let submitted = agent
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, SyncEvent::Submitted { submission_id } if submission_id == "sub-1"))
            .count();
        assert_eq!(submitted, 2);
    }
}
