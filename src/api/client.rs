use crate::api::types::*;
use crate::config::ApiConfig;
use crate::error::{Result, StatementInsightError};
use crate::upload::UploadRequest;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// HTTP client for the statement analysis service.
///
/// Processing can take as long as the service needs, so no request timeout is
/// configured and no call is ever retried. Callers decide how to present slow
/// or failed requests.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url,
        }
    }

    /// Submits both statements for analysis and returns the result id.
    pub async fn process(&self, upload: &UploadRequest) -> Result<String> {
        let statement_a = upload
            .statement_a
            .as_ref()
            .ok_or(StatementInsightError::MissingStatement("A"))?;
        let statement_b = upload
            .statement_b
            .as_ref()
            .ok_or(StatementInsightError::MissingStatement("B"))?;

        let url = format!("{}/v1/process", self.base_url);
        debug!(
            "POST {} ({} / {})",
            url, statement_a.file_name, statement_b.file_name
        );

        let form = Form::new()
            .part(
                "arquivo_a",
                Part::bytes(statement_a.bytes.clone())
                    .file_name(statement_a.file_name.clone())
                    .mime_str(&statement_a.mime_type())?,
            )
            .part(
                "arquivo_b",
                Part::bytes(statement_b.bytes.clone())
                    .file_name(statement_b.file_name.clone())
                    .mime_str(&statement_b.mime_type())?,
            )
            .text("label_a", upload.label_a.clone())
            .text("label_b", upload.label_b.clone());
        let form = match &upload.hypotheses {
            Some(hypotheses) if !hypotheses.trim().is_empty() => {
                form.text("hipoteses", hypotheses.trim().to_string())
            }
            _ => form,
        };

        let response = self.client.post(&url).multipart(form).send().await?;
        let body: ProcessResponse = decode(response).await?;
        Ok(body.result_id)
    }

    /// Fetches the generated report for a result.
    pub async fn report(&self, result_id: &str) -> Result<Report> {
        let url = format!("{}/v1/report/{}", self.base_url, result_id);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    /// Asks one question about a result and returns the service's answer.
    pub async fn chat(&self, result_id: &str, question: &str) -> Result<String> {
        let url = format!("{}/v1/chat", self.base_url);
        debug!("POST {}", url);
        let form = Form::new()
            .text("result_id", result_id.to_string())
            .text("pergunta", question.to_string());
        let response = self.client.post(&url).multipart(form).send().await?;
        let body: ChatAnswer = decode(response).await?;
        Ok(body.answer)
    }

    /// Address of the downloadable artifact for a result. The download itself
    /// is handed off to whatever opens the URL; this client never streams it.
    #[must_use]
    pub fn download_url(&self, result_id: &str) -> String {
        format!("{}/v1/download/{}", self.base_url, result_id)
    }

    /// Checks that the service is up.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    /// Reads analysis state the service saved from an earlier session.
    pub async fn saved_state(&self) -> Result<SavedAnalysis> {
        let url = format!("{}/data", self.base_url);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }
}

/// Reads the body once and maps the response: non-success statuses become
/// [`StatementInsightError::Backend`] carrying the service's `detail` text,
/// success bodies are decoded as JSON.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(backend_error(status, &body));
    }
    Ok(serde_json::from_str(&body)?)
}

fn backend_error(status: StatusCode, body: &str) -> StatementInsightError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .unwrap_or_else(|| format!("the service returned status {status}"));
    StatementInsightError::Backend {
        status: status.as_u16(),
        detail,
    }
}
