use serde::{Deserialize, Serialize};

use crate::markdown;

/// Body of a successful processing call. The id keys every later report,
/// chat, and download request.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessResponse {
    pub result_id: String,
}

/// A generated analysis report. Field names on the wire are the service's
/// Portuguese originals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "relatorio")]
    pub markdown: String,
    #[serde(rename = "perguntas_sugeridas", default)]
    pub suggested_questions: Vec<String>,
}

impl Report {
    /// The report body rendered as an HTML fragment.
    #[must_use]
    pub fn to_html(&self) -> String {
        markdown::render(&self.markdown)
    }
}

/// Body of a chat turn answer.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatAnswer {
    #[serde(rename = "resposta")]
    pub answer: String,
}

/// Error payload the service attaches to non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}

/// Response of the service liveness probe.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

/// Analysis state the service persisted from an earlier session. Every field
/// is optional; an empty object means there is nothing to resume.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedAnalysis {
    pub result_id: Option<String>,
    pub label_a: Option<String>,
    pub label_b: Option<String>,
}

impl SavedAnalysis {
    /// True when the saved state carries a result that can be reopened.
    #[must_use]
    pub fn has_result(&self) -> bool {
        self.result_id.is_some()
    }
}
