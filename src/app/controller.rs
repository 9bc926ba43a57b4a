// Application controller: wires roster, records, rewrite and sync together
//
// Every failure that reaches this layer is turned into a `Notice`; only local
// persistence problems and invalid requests come back as errors.

use std::sync::Arc;

use anyhow::{Context, Result};
use thiserror::Error;

use super::notice::Notice;
use crate::config::Config;
use crate::records::{RecordDraft, RecordStore, StoreError};
use crate::rewrite::{RewriteClient, RewriteError};
use crate::roster::{Roster, RosterClient};
use crate::storage::{FileStore, KeyValueStore, SHEET_URL_KEY};
use crate::sync::{SyncForwarder, SyncPayload};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("기록할 내용이 비어 있습니다.")]
    EmptyContent,

    #[error("명단에 '{0}' 학급이 없습니다.")]
    UnknownClass(String),

    #[error("'{class}' 학급에 '{student}' 학생이 없습니다.")]
    UnknownStudent { class: String, student: String },

    #[error("기록을 저장하지 못했습니다: {0}")]
    Store(#[from] StoreError),
}

/// What a save should act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    New { class_id: String, student_id: String },
    Edit { record_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub target: SaveTarget,
    pub content: String,
}

/// Steps a single save moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePhase {
    Idle,
    SavingLocal,
    Syncing,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
    /// Edit of a record that no longer exists; nothing was written.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct SaveReport {
    pub record_id: String,
    pub outcome: SaveOutcome,
    pub phases: Vec<SavePhase>,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Blank input; no request was made.
    Skipped,
    Rewritten(String),
    /// User-facing failure message.
    Failed(String),
}

impl RewriteOutcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Skipped => None,
            Self::Rewritten(_) => Some(Notice::success("AI 변환 완료")),
            Self::Failed(message) => Some(Notice::error(message.clone())),
        }
    }
}

pub struct App {
    storage: Arc<dyn KeyValueStore>,
    records: RecordStore,
    roster: Roster,
    roster_client: RosterClient,
    rewriter: RewriteClient,
    forwarder: SyncForwarder,
    sheet_url: Option<String>,
}

impl App {
    /// Build the app over `storage`, loading the saved endpoint and records.
    /// No network access happens here; call [`App::boot`] for that.
    pub fn new(storage: Arc<dyn KeyValueStore>, rewriter: RewriteClient) -> Result<Self> {
        let sheet_url = storage
            .get(SHEET_URL_KEY)
            .context("저장된 시트 URL을 읽지 못했습니다")?
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let records = RecordStore::open(storage.clone()).context("기록을 불러오지 못했습니다")?;

        Ok(Self {
            storage,
            records,
            roster: Roster::new(),
            roster_client: RosterClient::new()?,
            rewriter,
            forwarder: SyncForwarder::new()?,
            sheet_url,
        })
    }

    /// Build the app from loaded configuration with a file-backed store.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = FileStore::open(&config.data_dir).with_context(|| {
            format!("데이터 디렉터리를 열 수 없습니다: {}", config.data_dir.display())
        })?;
        let rewriter = RewriteClient::new(config.api_key.clone())?
            .with_model(config.model.clone())
            .with_base_url(config.gemini_base_url.clone());
        Self::new(Arc::new(store), rewriter)
    }

    /// Initial roster load when an endpoint is already configured.
    pub async fn boot(&mut self) -> Vec<Notice> {
        if self.sheet_url.is_none() {
            tracing::debug!("No spreadsheet URL configured, skipping roster load");
            return Vec::new();
        }
        self.refresh_roster(None).await
    }

    pub fn sheet_url(&self) -> Option<&str> {
        self.sheet_url.as_deref()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn rewriter(&self) -> &RewriteClient {
        &self.rewriter
    }

    /// Re-fetch the roster from `url_override` or the configured endpoint.
    ///
    /// A blank target is a no-op. On success the URL that worked is saved.
    pub async fn refresh_roster(&mut self, url_override: Option<&str>) -> Vec<Notice> {
        let target = url_override
            .or(self.sheet_url.as_deref())
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if target.is_empty() {
            return Vec::new();
        }

        let outcome = self.roster_client.fetch(&target).await;
        match self.roster.apply(outcome) {
            Ok(()) => {
                let mut notices = vec![Notice::info(format!(
                    "{}개 학급을 불러왔습니다.",
                    self.roster.classes().len()
                ))];
                if let Err(e) = self.remember_url(&target) {
                    notices.push(Notice::error(format!("URL 저장 실패: {}", e)));
                }
                notices
            }
            Err(e) => vec![Notice::error(format!(
                "명단 불러오기 실패. URL을 확인해 주세요. ({})",
                e
            ))],
        }
    }

    /// Save the endpoint URL, then reload the roster from it.
    pub async fn save_settings(&mut self, url: &str) -> Vec<Notice> {
        if let Err(e) = self.remember_url(url) {
            return vec![Notice::error(format!("설정 저장 실패: {}", e))];
        }
        let mut notices = self.refresh_roster(None).await;
        notices.push(Notice::success("설정이 저장되었습니다."));
        notices
    }

    /// Rewrite `content` into formal register. Blank content makes no call.
    pub async fn rewrite(
        &self,
        content: &str,
        on_status: Option<&(dyn Fn(&str) + Sync)>,
    ) -> RewriteOutcome {
        if content.trim().is_empty() {
            return RewriteOutcome::Skipped;
        }
        match self.rewriter.try_rewrite(content, on_status).await {
            Ok(text) => RewriteOutcome::Rewritten(text),
            Err(e) => {
                if !matches!(e, RewriteError::NotConfigured) {
                    tracing::warn!(error = %e, "Rewrite failed");
                }
                RewriteOutcome::Failed(e.user_message())
            }
        }
    }

    /// Save a note: always locally, then to the spreadsheet for new records.
    pub async fn save_record(&mut self, request: SaveRequest) -> Result<SaveReport, SaveError> {
        let content = request.content.trim();
        if content.is_empty() {
            return Err(SaveError::EmptyContent);
        }

        let mut phases = vec![SavePhase::Idle];
        let mut notices = Vec::new();

        match request.target {
            SaveTarget::Edit { record_id } => {
                phases.push(SavePhase::SavingLocal);
                let updated = self.records.update_content(&record_id, content)?;
                let outcome = if updated {
                    notices.push(Notice::success("기록이 수정되었습니다."));
                    SaveOutcome::Updated
                } else {
                    notices.push(Notice::info("해당 기록이 없어 변경하지 않았습니다."));
                    SaveOutcome::Unchanged
                };
                phases.push(SavePhase::Done);
                Ok(SaveReport {
                    record_id,
                    outcome,
                    phases,
                    notices,
                })
            }
            SaveTarget::New {
                class_id,
                student_id,
            } => {
                let class = self
                    .roster
                    .class(&class_id)
                    .ok_or_else(|| SaveError::UnknownClass(class_id.clone()))?;
                let student =
                    class
                        .student_by_id(&student_id)
                        .ok_or_else(|| SaveError::UnknownStudent {
                            class: class_id.clone(),
                            student: student_id.clone(),
                        })?;
                let draft = RecordDraft::new(class, student, content);

                phases.push(SavePhase::SavingLocal);
                let record = self.records.create(draft)?;
                let record_id = record.id.clone();
                let payload = SyncPayload::from(record);
                notices.push(Notice::success("임시 저장되었습니다."));

                if let Some(url) = self.sheet_url.as_deref() {
                    phases.push(SavePhase::Syncing);
                    match self.forwarder.push(url, &payload).await {
                        Ok(()) => notices.push(Notice::success("구글 시트 전송 완료")),
                        Err(e) => {
                            tracing::warn!(error = %e, record = %record_id, "Sync failed");
                            notices.push(Notice::error("시트 전송 실패"));
                        }
                    }
                }
                phases.push(SavePhase::Done);

                Ok(SaveReport {
                    record_id,
                    outcome: SaveOutcome::Created,
                    phases,
                    notices,
                })
            }
        }
    }

    fn remember_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        self.storage
            .set(SHEET_URL_KEY, url)
            .context("시트 URL을 저장하지 못했습니다")?;
        self.sheet_url = (!url.is_empty()).then(|| url.to_string());
        Ok(())
    }
}
