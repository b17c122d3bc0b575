use crate::crypto;
use crate::database::models::ReplyRecord;
use crate::database::repositories::{ReplyRepository, ThreadRepository};
use crate::database::Database;
use crate::error::{BoardError, Result};
use crate::model::{self, ThreadView, REPLY_TOMBSTONE};
use crate::utils::now_utc_iso;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reply-level operations, scoped to (board, thread id).
#[derive(Clone)]
pub struct ReplyService {
    database: Database,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendReplyInput {
    pub thread_id: String,
    pub text: String,
    pub delete_password: String,
}

enum DeleteOutcome {
    Tombstoned,
    WrongPassword,
    Missing,
}

impl ReplyService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Single thread with its full reply sequence, redacted. Never
    /// truncates.
    pub fn get_thread(&self, board: &str, thread_id: &str) -> Result<ThreadView> {
        let found = self.database.with_repositories(|repos| {
            let Some(thread) = repos.threads().get(board, thread_id)? else {
                return Ok(None);
            };
            let replies = repos.replies().list_for_thread(thread_id)?;
            Ok(Some(model::redact(thread, replies)))
        })?;
        found.ok_or(BoardError::NotFound("thread"))
    }

    /// Appends a reply and bumps the parent thread in one store operation;
    /// returns the new reply's id.
    pub fn append_reply(&self, board: &str, input: AppendReplyInput) -> Result<String> {
        if input.text.trim().is_empty() {
            return Err(BoardError::Validation("reply text may not be empty"));
        }
        if input.delete_password.is_empty() {
            return Err(BoardError::Validation("delete password may not be empty"));
        }

        let now = now_utc_iso();
        let record = ReplyRecord {
            id: Uuid::new_v4().to_string(),
            thread_id: input.thread_id.clone(),
            text: input.text,
            created_on: now.clone(),
            reported: false,
            delete_password: crypto::hash_password(&input.delete_password)?,
        };

        let appended = self.database.with_repositories(|repos| {
            repos
                .replies()
                .append(board, &input.thread_id, &record, &now)
        })?;
        if !appended {
            return Err(BoardError::NotFound("thread"));
        }

        tracing::info!(board, thread_id = %input.thread_id, reply_id = %record.id, "reply appended");
        Ok(record.id)
    }

    /// Flags a reply for review. Idempotent.
    pub fn report_reply(&self, board: &str, thread_id: &str, reply_id: &str) -> Result<()> {
        let matched = self.database.with_repositories(|repos| {
            repos.replies().set_reported(board, thread_id, reply_id)
        })?;
        if !matched {
            return Err(BoardError::NotFound("reply"));
        }
        tracing::info!(board, thread_id, reply_id, "reply reported");
        Ok(())
    }

    /// Tombstones a reply's text when the password verifies; the reply keeps
    /// its id, position, and timestamps. Deleting an already tombstoned
    /// reply with the correct password succeeds again trivially.
    pub fn delete_reply(
        &self,
        board: &str,
        thread_id: &str,
        reply_id: &str,
        password: &str,
    ) -> Result<()> {
        let outcome = self.database.with_repositories(|repos| {
            let replies = repos.replies();
            let Some(stored) = replies.delete_password(board, thread_id, reply_id)? else {
                return Ok(DeleteOutcome::Missing);
            };
            if !crypto::verify_password(password, &stored) {
                return Ok(DeleteOutcome::WrongPassword);
            }
            replies.tombstone(board, thread_id, reply_id, REPLY_TOMBSTONE)?;
            Ok(DeleteOutcome::Tombstoned)
        })?;

        match outcome {
            DeleteOutcome::Tombstoned => {
                tracing::info!(board, thread_id, reply_id, "reply deleted");
                Ok(())
            }
            DeleteOutcome::WrongPassword => Err(BoardError::Unauthorized),
            DeleteOutcome::Missing => Err(BoardError::NotFound("reply")),
        }
    }
}
