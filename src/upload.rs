use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, StatementInsightError};

static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6}$").unwrap());

/// One spreadsheet picked for analysis, held in memory until submission.
#[derive(Debug, Clone)]
pub struct StatementFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl StatementFile {
    /// Loads a statement from disk, keeping the original file name for the
    /// multipart upload.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                StatementInsightError::InvalidStatementPath(path.display().to_string())
            })?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self { file_name, bytes })
    }

    /// Wraps bytes already in memory, e.g. content received from another
    /// source than the local filesystem.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Content type inferred from the file name extension, falling back to
    /// `application/octet-stream`.
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.file_name)
            .first_or_octet_stream()
            .to_string()
    }
}

/// Everything the user supplies before asking for an analysis: two statement
/// files, their period labels, and optional free-text hypotheses to steer the
/// report.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub statement_a: Option<StatementFile>,
    pub statement_b: Option<StatementFile>,
    pub label_a: String,
    pub label_b: String,
    pub hypotheses: Option<String>,
}

impl UploadRequest {
    /// Checks the request before any network traffic. Both statements must be
    /// present and both labels must be six-digit YYYYMM strings.
    pub fn validate(&self) -> Result<()> {
        if self.statement_a.is_none() {
            return Err(StatementInsightError::MissingStatement("A"));
        }
        if self.statement_b.is_none() {
            return Err(StatementInsightError::MissingStatement("B"));
        }
        validate_period_label(&self.label_a)?;
        validate_period_label(&self.label_b)?;
        Ok(())
    }
}

/// Accepts exactly six ASCII digits, e.g. `202601` for January 2026. The
/// service orders the two statements by these labels, so anything looser,
/// other Unicode numerals included, is rejected up front.
pub fn validate_period_label(label: &str) -> Result<()> {
    if LABEL_RE.is_match(label) {
        Ok(())
    } else {
        Err(StatementInsightError::InvalidLabel(label.to_string()))
    }
}
