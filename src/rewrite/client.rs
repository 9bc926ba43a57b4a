// Rewrite client: one request to Gemini, one displayable string back

use anyhow::Context;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::prompt::{build_prompt, TEMPERATURE, TOP_P};
use super::types::{Content, GenerateRequest, GenerateResponse, GenerationConfig, Part};
use crate::config::constants::{DEFAULT_GEMINI_BASE_URL, DEFAULT_REWRITE_MODEL};

/// Shown while the request is in flight.
pub const STATUS_REWRITING: &str = "Gemini AI가 문장을 다듬는 중...";

/// Reason given when a failure carries no message of its own.
const NETWORK_HINT: &str = "네트워크 상태 확인 요망";

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("시스템 설정에서 API_KEY가 구성되지 않았습니다. 관리자에게 문의하세요.")]
    NotConfigured,

    #[error("API 키 권한 오류입니다. 키가 활성화되어 있는지 확인해주세요.")]
    PermissionDenied,

    #[error("요청이 너무 많습니다. 잠시 후 다시 시도해주세요.")]
    RateLimited,

    #[error("AI 변환 중 오류가 발생했습니다. (사유: AI 응답 생성 실패)")]
    EmptyResponse,

    #[error("AI 변환 중 오류가 발생했습니다. (사유: {0})")]
    Failed(String),
}

impl RewriteError {
    /// The text to show the user in place of a rewrite.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::FORBIDDEN => Self::PermissionDenied,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            _ => Self::Failed(format!("HTTP {}: {}", status, body.trim())),
        }
    }

    /// Classify an error that carries no status code by its message text.
    fn from_message(message: &str) -> Self {
        if message.contains("403") {
            Self::PermissionDenied
        } else if message.contains("429") {
            Self::RateLimited
        } else if message.trim().is_empty() {
            Self::Failed(NETWORK_HINT.to_string())
        } else {
            Self::Failed(message.to_string())
        }
    }
}

#[derive(Clone)]
pub struct RewriteClient {
    http: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl RewriteClient {
    /// Build a client. `api_key` of `None` (or blank) disables network calls.
    pub fn new(api_key: Option<String>) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("edulog/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("HTTP 클라이언트를 만들지 못했습니다")?;

        Ok(Self {
            http,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: DEFAULT_REWRITE_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Rewrite `raw`, always returning displayable text.
    pub async fn rewrite(&self, raw: &str, on_status: Option<&(dyn Fn(&str) + Sync)>) -> String {
        match self.try_rewrite(raw, on_status).await {
            Ok(text) => text,
            Err(e) => e.user_message(),
        }
    }

    /// Rewrite `raw`, keeping the failure kind for callers that need it.
    pub async fn try_rewrite(
        &self,
        raw: &str,
        on_status: Option<&(dyn Fn(&str) + Sync)>,
    ) -> Result<String, RewriteError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(RewriteError::NotConfigured);
        };

        if let Some(report) = on_status {
            report(STATUS_REWRITING);
        }

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: Some(build_prompt(raw)),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        tracing::debug!(model = %self.model, chars = raw.chars().count(), "Sending rewrite request");

        let result = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Gemini request failed");
                return Err(match e.status() {
                    Some(status) => RewriteError::from_status(status, ""),
                    None => RewriteError::from_message(&e.to_string()),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "Gemini API returned an error");
            return Err(RewriteError::from_status(status, &body));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::Failed(format!("응답 해석 실패: {}", e)))?;

        match parsed.text() {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            _ => Err(RewriteError::EmptyResponse),
        }
    }
}
