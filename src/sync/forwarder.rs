// Sync forwarder: fire-and-forget push of new records to the spreadsheet
//
// The spreadsheet script cannot report back in a way the browser client could
// read, so the push is one-directional: `Ok(())` means the request went out,
// never that the row was written.

use anyhow::Context;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::records::ActivityRecord;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("시트 전송 데이터 변환 실패: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("시트로 기록을 보내지 못했습니다: {0}")]
    Dispatch(#[source] reqwest::Error),
}

/// Body expected by the companion script's `doPost`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    pub class_name: String,
    pub student_number: i64,
    pub student_name: String,
    pub content: String,
}

impl From<&ActivityRecord> for SyncPayload {
    fn from(record: &ActivityRecord) -> Self {
        Self {
            class_name: record.class_name.clone(),
            student_number: record.student_number,
            student_name: record.student_name.clone(),
            content: record.content.clone(),
        }
    }
}

pub struct SyncForwarder {
    http: Client,
}

impl SyncForwarder {
    pub fn new() -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("edulog/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("HTTP 클라이언트를 만들지 못했습니다")?;
        Ok(Self { http })
    }

    /// Send one POST to `url`. The response is dropped unread.
    pub async fn push(&self, url: &str, payload: &SyncPayload) -> Result<(), SyncError> {
        let body = serde_json::to_string(payload).map_err(SyncError::Encode)?;

        // text/plain keeps this a "simple" request, same as the browser's
        // no-cors POST; the script parses the raw body itself.
        let response = self
            .http
            .post(url)
            .header("content-type", "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(SyncError::Dispatch)?;

        tracing::debug!(status = %response.status(), "Sync request dispatched");
        drop(response);
        Ok(())
    }
}
