use crate::crypto;
use crate::database::models::ThreadRecord;
use crate::database::repositories::{ReplyRepository, ThreadRepository};
use crate::database::Database;
use crate::error::{BoardError, Result};
use crate::model::{self, ThreadView, REPLY_PREVIEW_LIMIT, THREAD_PAGE_LIMIT};
use crate::utils::now_utc_iso;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Thread-level operations, each scoped to one board.
#[derive(Clone)]
pub struct BoardService {
    database: Database,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateThreadInput {
    pub text: String,
    pub delete_password: String,
}

enum DeleteOutcome {
    Deleted,
    WrongPassword,
    Missing,
}

impl BoardService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Redacted board index: up to ten threads, most recently bumped first,
    /// each carrying its three most recent replies.
    pub fn list_threads(&self, board: &str) -> Result<Vec<ThreadView>> {
        let views = self.database.with_repositories(|repos| {
            let threads = repos.threads().list_by_bump(board, THREAD_PAGE_LIMIT)?;
            let replies_repo = repos.replies();
            let mut views = Vec::with_capacity(threads.len());
            for thread in threads {
                let replies = replies_repo.list_for_thread(&thread.id)?;
                let view = model::redact(thread, replies);
                views.push(model::truncate_replies(view, REPLY_PREVIEW_LIMIT));
            }
            Ok(views)
        })?;
        Ok(views)
    }

    /// Creates a thread and returns its id. The delete password is hashed
    /// before it ever reaches the store.
    pub fn create_thread(&self, board: &str, input: CreateThreadInput) -> Result<String> {
        if input.text.trim().is_empty() {
            return Err(BoardError::Validation("thread text may not be empty"));
        }
        if input.delete_password.is_empty() {
            return Err(BoardError::Validation("delete password may not be empty"));
        }

        let now = now_utc_iso();
        let record = ThreadRecord {
            id: Uuid::new_v4().to_string(),
            board: board.to_string(),
            text: input.text,
            created_on: now.clone(),
            bumped_on: now,
            reported: false,
            delete_password: crypto::hash_password(&input.delete_password)?,
        };

        self.database
            .with_repositories(|repos| repos.threads().create(&record))?;

        tracing::info!(board, thread_id = %record.id, "thread created");
        Ok(record.id)
    }

    /// Flags a thread for review. Repeated reports are no-ops that still
    /// succeed.
    pub fn report_thread(&self, board: &str, thread_id: &str) -> Result<()> {
        let matched = self
            .database
            .with_repositories(|repos| repos.threads().set_reported(board, thread_id))?;
        if !matched {
            return Err(BoardError::NotFound("thread"));
        }
        tracing::info!(board, thread_id, "thread reported");
        Ok(())
    }

    /// Removes a thread (and, through the store, its replies) when the
    /// password verifies. A missing id and a failed password check are
    /// reported as different errors.
    pub fn delete_thread(&self, board: &str, thread_id: &str, password: &str) -> Result<()> {
        let outcome = self.database.with_repositories(|repos| {
            let threads = repos.threads();
            let Some(stored) = threads.delete_password(board, thread_id)? else {
                return Ok(DeleteOutcome::Missing);
            };
            if !crypto::verify_password(password, &stored) {
                return Ok(DeleteOutcome::WrongPassword);
            }
            threads.delete(board, thread_id)?;
            Ok(DeleteOutcome::Deleted)
        })?;

        match outcome {
            DeleteOutcome::Deleted => {
                tracing::info!(board, thread_id, "thread deleted");
                Ok(())
            }
            DeleteOutcome::WrongPassword => Err(BoardError::Unauthorized),
            DeleteOutcome::Missing => Err(BoardError::NotFound("thread")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replies::{AppendReplyInput, ReplyService};
    use rusqlite::Connection;

    fn setup() -> (BoardService, ReplyService) {
        let conn = Connection::open_in_memory().expect("in-memory db");
        let db = Database::from_connection(conn, true);
        db.ensure_migrations().expect("migrations");
        (BoardService::new(db.clone()), ReplyService::new(db))
    }

    fn input(text: &str, password: &str) -> CreateThreadInput {
        CreateThreadInput {
            text: text.into(),
            delete_password: password.into(),
        }
    }

    #[test]
    fn created_thread_shows_up_redacted() {
        let (boards, _) = setup();
        boards.create_thread("b", input("hello", "p1")).expect("create");

        let listed = boards.list_threads("b").expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].text, "hello");
        assert_eq!(listed[0].reply_count, 0);
        assert!(listed[0].replies.is_empty());
        assert_eq!(listed[0].bumped_on, listed[0].created_on);
    }

    #[test]
    fn empty_board_lists_nothing() {
        let (boards, _) = setup();
        assert!(boards.list_threads("empty").expect("list").is_empty());
    }

    #[test]
    fn create_thread_requires_text_and_password() {
        let (boards, _) = setup();
        assert!(matches!(
            boards.create_thread("b", input("  ", "p1")),
            Err(BoardError::Validation(_))
        ));
        assert!(matches!(
            boards.create_thread("b", input("hello", "")),
            Err(BoardError::Validation(_))
        ));
        assert!(boards.list_threads("b").expect("list").is_empty());
    }

    #[test]
    fn listing_caps_at_ten_and_follows_bumps() {
        let (boards, replies) = setup();
        let mut ids = Vec::new();
        for n in 0..12 {
            ids.push(
                boards
                    .create_thread("b", input(&format!("thread {n}"), "pw"))
                    .expect("create"),
            );
        }

        // bump the oldest thread to the top
        replies
            .append_reply(
                "b",
                AppendReplyInput {
                    thread_id: ids[0].clone(),
                    text: "bump".into(),
                    delete_password: "rp".into(),
                },
            )
            .expect("append");

        let listed = boards.list_threads("b").expect("list");
        assert_eq!(listed.len(), 10);
        assert_eq!(listed[0].id, ids[0]);
        // newest creations follow the bumped thread
        assert_eq!(listed[1].id, ids[11]);
        assert_eq!(listed[2].id, ids[10]);
        // the two least recently bumped threads fall off the page
        assert!(!listed.iter().any(|t| t.id == ids[1]));
        assert!(!listed.iter().any(|t| t.id == ids[2]));
    }

    #[test]
    fn listed_threads_carry_at_most_three_replies() {
        let (boards, replies) = setup();
        let thread_id = boards.create_thread("b", input("op", "pw")).expect("create");
        for n in 0..5 {
            replies
                .append_reply(
                    "b",
                    AppendReplyInput {
                        thread_id: thread_id.clone(),
                        text: format!("reply {n}"),
                        delete_password: "rp".into(),
                    },
                )
                .expect("append");
        }

        let listed = boards.list_threads("b").expect("list");
        assert_eq!(listed[0].reply_count, 5);
        assert_eq!(listed[0].replies.len(), 3);
        let texts: Vec<&str> = listed[0].replies.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["reply 2", "reply 3", "reply 4"]);
    }

    #[test]
    fn report_thread_is_idempotent() {
        let (boards, _) = setup();
        let thread_id = boards.create_thread("b", input("op", "pw")).expect("create");

        boards.report_thread("b", &thread_id).expect("first report");
        boards.report_thread("b", &thread_id).expect("second report");
        assert!(matches!(
            boards.report_thread("b", "no-such-id"),
            Err(BoardError::NotFound(_))
        ));
    }

    #[test]
    fn delete_thread_distinguishes_missing_from_unauthorized() {
        let (boards, _) = setup();
        let thread_id = boards.create_thread("b", input("op", "p1")).expect("create");

        assert!(matches!(
            boards.delete_thread("b", &thread_id, "wrong"),
            Err(BoardError::Unauthorized)
        ));
        // still listed after the failed attempt
        assert_eq!(boards.list_threads("b").expect("list").len(), 1);

        boards.delete_thread("b", &thread_id, "p1").expect("delete");
        assert!(boards.list_threads("b").expect("list").is_empty());

        // second delete of the same thread: the id no longer resolves
        assert!(matches!(
            boards.delete_thread("b", &thread_id, "p1"),
            Err(BoardError::NotFound(_))
        ));
    }

    #[test]
    fn boards_are_isolated_partitions() {
        let (boards, _) = setup();
        let thread_id = boards.create_thread("b", input("op", "p1")).expect("create");

        assert!(boards.list_threads("other").expect("list").is_empty());
        assert!(matches!(
            boards.report_thread("other", &thread_id),
            Err(BoardError::NotFound(_))
        ));
        assert!(matches!(
            boards.delete_thread("other", &thread_id, "p1"),
            Err(BoardError::NotFound(_))
        ));
    }
}
