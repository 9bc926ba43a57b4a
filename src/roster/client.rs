// Roster source adapter: fetches class groups from the spreadsheet endpoint

use anyhow::Context;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::types::ClassGroup;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("명단 주소에 연결할 수 없습니다: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("명단 주소가 {status} 응답을 보냈습니다")]
    Status { status: StatusCode },

    /// The body is not JSON at all, e.g. a sign-in or error page.
    #[error("명단 응답이 JSON이 아닙니다: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("명단 응답이 학급 목록 형식이 아닙니다: {reason}")]
    Shape { reason: String },
}

impl RosterError {
    /// Anything short of a JSON reply means the endpoint is not usable. Valid
    /// JSON of the wrong shape says nothing about connectivity.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::Decode(_)
        )
    }
}

pub struct RosterClient {
    http: Client,
}

impl RosterClient {
    pub fn new() -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("edulog/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("HTTP 클라이언트를 만들지 못했습니다")?;
        Ok(Self { http })
    }

    /// Issue one GET to `url` and parse the body as an array of classes.
    pub async fn fetch(&self, url: &str) -> Result<Vec<ClassGroup>, RosterError> {
        tracing::debug!(url, "Fetching roster");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(RosterError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RosterError::Status { status });
        }

        let body = resp.text().await.map_err(RosterError::Transport)?;
        parse_roster(&body)
    }
}

/// Strictly validate a roster payload.
pub fn parse_roster(body: &str) -> Result<Vec<ClassGroup>, RosterError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(RosterError::Decode)?;

    if !value.is_array() {
        return Err(RosterError::Shape {
            reason: "배열이 아님".to_string(),
        });
    }

    serde_json::from_value(value).map_err(|e| RosterError::Shape {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_companion_script_output() {
        let body = r#"[
            {"id": "1-1", "name": "1-1", "students": [
                {"id": "1-1_1", "number": 1, "name": "Kim"},
                {"id": "1-1_2", "number": 2, "name": "Lee"}
            ]},
            {"id": "1-2", "name": "1-2", "students": []}
        ]"#;
        let classes = parse_roster(body).unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].students[1].name, "Lee");
        assert_eq!(classes[0].student_by_number(2).unwrap().id, "1-1_2");
    }

    #[test]
    fn test_parse_rejects_object() {
        let err = parse_roster(r#"{"error": "no access"}"#).unwrap_err();
        assert!(matches!(err, RosterError::Shape { .. }));
        assert!(!err.is_connection_failure());
    }

    #[test]
    fn test_parse_html_page_is_connection_failure() {
        let err = parse_roster("<!DOCTYPE html><html></html>").unwrap_err();
        assert!(matches!(err, RosterError::Decode(_)));
        assert!(err.is_connection_failure());
    }

    #[test]
    fn test_parse_empty_body_is_connection_failure() {
        assert!(parse_roster("").unwrap_err().is_connection_failure());
    }

    #[test]
    fn test_parse_rejects_malformed_students() {
        let body = r#"[{"id": "1-1", "name": "1-1", "students": [{"id": "x", "name": "Kim"}]}]"#;
        assert!(matches!(parse_roster(body), Err(RosterError::Shape { .. })));
    }

    #[test]
    fn test_status_is_connection_failure() {
        let err = RosterError::Status {
            status: StatusCode::NOT_FOUND,
        };
        assert!(err.is_connection_failure());
    }
}
