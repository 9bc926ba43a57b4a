// Editing session for one note
//
// Mirrors the editor surface: while a rewrite or save is in flight, neither
// can be started again, and the session cannot be closed mid-rewrite so the
// rewritten text is not lost.

use thiserror::Error;

use super::controller::{RewriteOutcome, SaveRequest, SaveTarget};
use crate::records::ActivityRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Rewriting,
    Saving,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a rewrite is already in progress")]
    RewriteInProgress,

    #[error("a save is already in progress")]
    SaveInProgress,

    #[error("note content is empty")]
    EmptyContent,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    target: SaveTarget,
    content: String,
    state: SessionState,
}

impl EditSession {
    /// Start a blank note for a student.
    pub fn new_record(class_id: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            target: SaveTarget::New {
                class_id: class_id.into(),
                student_id: student_id.into(),
            },
            content: String::new(),
            state: SessionState::Idle,
        }
    }

    /// Reopen an existing record with its current content.
    pub fn edit(record: &ActivityRecord) -> Self {
        Self {
            target: SaveTarget::Edit {
                record_id: record.id.clone(),
            },
            content: record.content.clone(),
            state: SessionState::Idle,
        }
    }

    pub fn target(&self) -> &SaveTarget {
        &self.target
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.target, SaveTarget::Edit { .. })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Replace the draft text. Ignored while a rewrite is running.
    pub fn set_content(&mut self, content: impl Into<String>) {
        if self.state != SessionState::Rewriting {
            self.content = content.into();
        }
    }

    pub fn can_rewrite(&self) -> bool {
        self.state == SessionState::Idle && !self.content.trim().is_empty()
    }

    pub fn can_save(&self) -> bool {
        self.can_rewrite()
    }

    /// Enter the rewriting state and hand back the text to send.
    pub fn begin_rewrite(&mut self) -> Result<String, SessionError> {
        self.check_idle()?;
        if self.content.trim().is_empty() {
            return Err(SessionError::EmptyContent);
        }
        self.state = SessionState::Rewriting;
        Ok(self.content.clone())
    }

    /// Leave the rewriting state; a successful rewrite replaces the draft.
    pub fn finish_rewrite(&mut self, outcome: &RewriteOutcome) {
        if let RewriteOutcome::Rewritten(text) = outcome {
            self.content = text.clone();
        }
        self.state = SessionState::Idle;
    }

    /// Enter the saving state and build the request for the controller.
    pub fn begin_save(&mut self) -> Result<SaveRequest, SessionError> {
        self.check_idle()?;
        if self.content.trim().is_empty() {
            return Err(SessionError::EmptyContent);
        }
        self.state = SessionState::Saving;
        Ok(SaveRequest {
            target: self.target.clone(),
            content: self.content.trim().to_string(),
        })
    }

    pub fn finish_save(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Closing is refused only while a rewrite is running.
    pub fn close(self) -> Result<(), (Self, SessionError)> {
        if self.state == SessionState::Rewriting {
            return Err((self, SessionError::RewriteInProgress));
        }
        Ok(())
    }

    fn check_idle(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Idle => Ok(()),
            SessionState::Rewriting => Err(SessionError::RewriteInProgress),
            SessionState::Saving => Err(SessionError::SaveInProgress),
        }
    }
}
