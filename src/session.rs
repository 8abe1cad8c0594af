use log::{debug, info, warn};

use crate::api::{BackendClient, HealthStatus, Report, SavedAnalysis};
use crate::chat::ChatMessage;
use crate::config::ApiConfig;
use crate::error::{Result, StatementInsightError};
use crate::upload::UploadRequest;

/// One analysis conversation: submit a pair of statements, keep the returned
/// result id, and talk to the service about the generated report.
///
/// A single busy flag serializes user-triggered operations. While a
/// submission or question is in flight, further calls to either are silently
/// ignored and report `Ok(None)`, matching a disabled submit button rather
/// than an error. The flag has no timeout: a hung request keeps the session
/// busy until the network call itself resolves.
pub struct Session {
    client: BackendClient,
    result_id: Option<String>,
    busy: bool,
    report: Option<Report>,
    transcript: Vec<ChatMessage>,
}

impl Session {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: BackendClient::new(config),
            result_id: None,
            busy: false,
            report: None,
            transcript: Vec::new(),
        }
    }

    /// Validates and submits both statements, then fetches the report for the
    /// new result.
    ///
    /// Validation runs before the busy flag is taken and before any network
    /// traffic. The result id is stored as soon as processing succeeds, so a
    /// failed report fetch leaves a session that can still chat and download;
    /// call [`Session::fetch_report`] to retry the report itself.
    pub async fn submit_statements(&mut self, upload: &UploadRequest) -> Result<Option<Report>> {
        if self.busy {
            debug!("submission ignored, another operation is in flight");
            return Ok(None);
        }
        upload.validate()?;

        self.busy = true;
        let outcome = self.submit_inner(upload).await;
        self.busy = false;
        outcome.map(Some)
    }

    async fn submit_inner(&mut self, upload: &UploadRequest) -> Result<Report> {
        let result_id = self.client.process(upload).await?;
        info!("statements processed, result id {}", result_id);
        self.result_id = Some(result_id.clone());

        let report = self.client.report(&result_id).await?;
        self.report = Some(report.clone());
        Ok(report)
    }

    /// Fetches the report for the current result, e.g. after resuming a saved
    /// analysis or after a submission whose report retrieval failed.
    pub async fn fetch_report(&mut self) -> Result<Report> {
        let result_id = self
            .result_id
            .clone()
            .ok_or(StatementInsightError::MissingResult)?;
        let report = self.client.report(&result_id).await?;
        self.report = Some(report.clone());
        Ok(report)
    }

    /// Sends one question about the current result and returns the transcript
    /// entry recorded for the reply.
    ///
    /// The user's question is appended to the transcript before the request
    /// goes out and is never rolled back. A failed exchange is recorded as an
    /// [`crate::chat::Role::Error`] entry instead of surfacing the error, so
    /// the conversation stays usable. Blank questions and questions asked
    /// while busy are ignored and report `Ok(None)`.
    pub async fn ask_question(&mut self, question: &str) -> Result<Option<ChatMessage>> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }
        if self.busy {
            debug!("question ignored, another operation is in flight");
            return Ok(None);
        }
        let result_id = self
            .result_id
            .clone()
            .ok_or(StatementInsightError::MissingResult)?;

        self.transcript.push(ChatMessage::user(question));

        self.busy = true;
        let outcome = self.client.chat(&result_id, question).await;
        self.busy = false;

        let entry = match outcome {
            Ok(answer) => ChatMessage::assistant(answer),
            Err(err) => {
                warn!("chat request failed: {}", err);
                ChatMessage::error(err.to_string())
            }
        };
        self.transcript.push(entry.clone());
        Ok(Some(entry))
    }

    /// Address of the downloadable spreadsheet for the current result. The
    /// caller opens it; nothing is fetched here.
    pub fn artifact_url(&self) -> Result<String> {
        let result_id = self
            .result_id
            .as_deref()
            .ok_or(StatementInsightError::MissingResult)?;
        Ok(self.client.download_url(result_id))
    }

    /// Best-effort liveness probe, intended for startup. A failure is worth a
    /// warning banner but never blocks later operations.
    pub async fn probe_connectivity(&self) -> Result<HealthStatus> {
        match self.client.health().await {
            Ok(status) => Ok(status),
            Err(err) => {
                warn!("connectivity probe failed: {}", err);
                Err(err)
            }
        }
    }

    /// Asks the service for analysis state saved from an earlier session and
    /// adopts its result id when one exists. Returns `None` when there is
    /// nothing to resume.
    pub async fn restore_saved(&mut self) -> Result<Option<SavedAnalysis>> {
        let saved = self.client.saved_state().await?;
        if saved.has_result() {
            info!(
                "resuming saved analysis {} ({} / {})",
                saved.result_id.as_deref().unwrap_or_default(),
                saved.label_a.as_deref().unwrap_or("?"),
                saved.label_b.as_deref().unwrap_or("?"),
            );
            self.result_id = saved.result_id.clone();
            Ok(Some(saved))
        } else {
            Ok(None)
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn result_id(&self) -> Option<&str> {
        self.result_id.as_deref()
    }

    /// The most recently fetched report, if any.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// The conversation so far, oldest first.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;
    use crate::upload::StatementFile;

    // Nothing in these tests may touch the network; the port is closed.
    fn offline_session() -> Session {
        Session::new(ApiConfig::new("http://127.0.0.1:9"))
    }

    fn valid_upload() -> UploadRequest {
        UploadRequest {
            statement_a: Some(StatementFile::from_bytes("a.xlsx", vec![1])),
            statement_b: Some(StatementFile::from_bytes("b.xlsx", vec![2])),
            label_a: "202501".to_string(),
            label_b: "202512".to_string(),
            hypotheses: None,
        }
    }

    #[tokio::test]
    async fn busy_submission_is_silently_ignored() {
        let mut session = offline_session();
        session.busy = true;

        let outcome = session.submit_statements(&valid_upload()).await.unwrap();
        assert!(outcome.is_none());
        assert!(session.result_id().is_none());
    }

    #[tokio::test]
    async fn busy_question_leaves_the_transcript_unchanged() {
        let mut session = offline_session();
        session.result_id = Some("abc".to_string());
        session.busy = true;

        let outcome = session.ask_question("Qual o saldo final?").await.unwrap();
        assert!(outcome.is_none());
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn blank_questions_are_ignored() {
        let mut session = offline_session();
        let outcome = session.ask_question("   ").await.unwrap();
        assert!(outcome.is_none());
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn questions_require_a_result() {
        let mut session = offline_session();
        let err = session.ask_question("Qual o saldo?").await.unwrap_err();
        assert!(matches!(err, StatementInsightError::MissingResult));
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn report_fetch_requires_a_result() {
        let mut session = offline_session();
        let err = session.fetch_report().await.unwrap_err();
        assert!(matches!(err, StatementInsightError::MissingResult));
    }

    #[tokio::test]
    async fn invalid_uploads_fail_before_any_request() {
        let mut session = offline_session();
        let mut upload = valid_upload();
        upload.label_a = "jan/25".to_string();

        // An unreachable backend makes a network attempt fail differently,
        // so a validation error here proves nothing was sent.
        let err = session.submit_statements(&upload).await.unwrap_err();
        assert!(matches!(err, StatementInsightError::InvalidLabel(_)));
        assert!(!session.is_busy());
    }

    #[test]
    fn artifact_url_requires_a_result() {
        let session = offline_session();
        assert!(matches!(
            session.artifact_url(),
            Err(StatementInsightError::MissingResult)
        ));
    }

    #[test]
    fn artifact_url_points_at_the_download_endpoint() {
        let mut session = offline_session();
        session.result_id = Some("abc".to_string());
        assert_eq!(
            session.artifact_url().unwrap(),
            "http://127.0.0.1:9/v1/download/abc"
        );
    }

    #[test]
    fn error_entries_keep_the_error_role() {
        // Transcript semantics only; the networked paths live in the
        // integration tests.
        let entry = ChatMessage::error("Analysis service error (status 500): boom");
        assert_eq!(entry.role, Role::Error);
    }
}
