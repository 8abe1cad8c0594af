//! # Statement Insight
//!
//! Client library for a bank statement analysis service: upload two monthly
//! statement spreadsheets, read the generated comparison report, and chat
//! about the findings.
//!
//! ## Core Concepts
//!
//! - **Session**: one analysis conversation, holding the current result id, the
//!   fetched report, and the chat transcript. A single busy flag keeps user
//!   operations serialized.
//! - **Result token**: opaque id the service issues for a processed pair of
//!   statements; it keys every report, chat, and download call.
//! - **Report**: markdown text plus suggested follow-up questions, renderable
//!   to an HTML fragment with [`markdown::render`].
//! - **Transcript**: append-only record of the conversation, including failed
//!   exchanges as error entries.
//!
//! ## Example
//!
//! ```rust,ignore
//! use statement_insight::*;
//!
//! let mut session = Session::new(ApiConfig::from_env());
//!
//! let upload = UploadRequest {
//!     statement_a: Some(StatementFile::from_path("extrato_jan.xlsx").await?),
//!     statement_b: Some(StatementFile::from_path("extrato_fev.xlsx").await?),
//!     label_a: "202601".to_string(),
//!     label_b: "202602".to_string(),
//!     hypotheses: None,
//! };
//!
//! if let Some(report) = session.submit_statements(&upload).await? {
//!     println!("{}", report.to_html());
//! }
//!
//! if let Some(reply) = session.ask_question("Qual foi a maior despesa?").await? {
//!     println!("{}", reply.text);
//! }
//! ```

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod markdown;
pub mod session;
pub mod upload;

pub use api::*;
pub use chat::{ChatMessage, Role};
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{Result, StatementInsightError};
pub use markdown::{render, render_opt};
pub use session::Session;
pub use upload::*;

/// Submits a pair of statements in one call and returns a session already
/// holding the result id and its report.
pub async fn analyze(config: ApiConfig, upload: &UploadRequest) -> Result<Session> {
    let mut session = Session::new(config);
    session.submit_statements(upload).await?;
    Ok(session)
}
