use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatementInsightError {
    #[error("Statement {0} is missing: select both spreadsheet files")]
    MissingStatement(&'static str),

    #[error("Period label '{0}' is invalid: labels must be YYYYMM (e.g. 202601)")]
    InvalidLabel(String),

    #[error("Statement path has no usable file name: {0}")]
    InvalidStatementPath(String),

    #[error("No analysis result is available yet: process two statements first")]
    MissingResult,

    #[error("Could not reach the analysis service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Analysis service error (status {status}): {detail}")]
    Backend { status: u16, detail: String },

    #[error("Unexpected response from the analysis service: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StatementInsightError {
    /// True for errors caught before any network call; front-ends present
    /// these as blocking input errors rather than request failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StatementInsightError::MissingStatement(_)
                | StatementInsightError::InvalidLabel(_)
                | StatementInsightError::InvalidStatementPath(_)
        )
    }

    /// Remediation hint shown next to transport-level failures.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            StatementInsightError::Transport(_) => Some(
                "check your connection and that ANALYSIS_API_URL points at a running analysis service",
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StatementInsightError>;
