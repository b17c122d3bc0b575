mod replies;
mod threads;

use super::models::{ReplyRecord, ThreadRecord};
use anyhow::Result;
use rusqlite::Connection;

pub trait ThreadRepository {
    fn create(&self, record: &ThreadRecord) -> Result<()>;
    fn get(&self, board: &str, id: &str) -> Result<Option<ThreadRecord>>;
    /// Threads of one board, most recently bumped first, ties broken by
    /// insertion order.
    fn list_by_bump(&self, board: &str, limit: usize) -> Result<Vec<ThreadRecord>>;
    /// Returns false when the id does not resolve within the board.
    fn set_reported(&self, board: &str, id: &str) -> Result<bool>;
    fn delete_password(&self, board: &str, id: &str) -> Result<Option<String>>;
    /// Removes the thread row; replies cascade. Returns false when missing.
    fn delete(&self, board: &str, id: &str) -> Result<bool>;
}

pub trait ReplyRepository {
    /// Appends a reply and advances the parent's `bumped_on` in one
    /// transaction. Returns false (and writes nothing) when the thread does
    /// not resolve within the board.
    fn append(
        &self,
        board: &str,
        thread_id: &str,
        record: &ReplyRecord,
        bumped_on: &str,
    ) -> Result<bool>;
    /// Replies of one thread, oldest first.
    fn list_for_thread(&self, thread_id: &str) -> Result<Vec<ReplyRecord>>;
    fn set_reported(&self, board: &str, thread_id: &str, reply_id: &str) -> Result<bool>;
    fn delete_password(
        &self,
        board: &str,
        thread_id: &str,
        reply_id: &str,
    ) -> Result<Option<String>>;
    /// Replaces the reply text with the tombstone marker, leaving id,
    /// position, and timestamps intact. Returns false when the reply does
    /// not resolve under the thread.
    fn tombstone(&self, board: &str, thread_id: &str, reply_id: &str, marker: &str)
        -> Result<bool>;
}

pub struct SqliteRepositories<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRepositories<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn threads(&self) -> impl ThreadRepository + '_ {
        threads::SqliteThreadRepository { conn: self.conn }
    }

    pub fn replies(&self) -> impl ReplyRepository + '_ {
        replies::SqliteReplyRepository { conn: self.conn }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MIGRATIONS;

    fn setup_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory db");
        conn.execute_batch(MIGRATIONS).expect("migrations");
        conn
    }

    fn thread(id: &str, board: &str, bumped_on: &str) -> ThreadRecord {
        ThreadRecord {
            id: id.into(),
            board: board.into(),
            text: "original post".into(),
            created_on: "2026-08-07T00:00:00.000000Z".into(),
            bumped_on: bumped_on.into(),
            reported: false,
            delete_password: "$argon2id$stub".into(),
        }
    }

    fn reply(id: &str, thread_id: &str, created_on: &str) -> ReplyRecord {
        ReplyRecord {
            id: id.into(),
            thread_id: thread_id.into(),
            text: "a reply".into(),
            created_on: created_on.into(),
            reported: false,
            delete_password: "$argon2id$stub".into(),
        }
    }

    #[test]
    fn thread_repository_round_trip() {
        let conn = setup_conn();
        let repos = SqliteRepositories::new(&conn);

        repos
            .threads()
            .create(&thread("t1", "b", "2026-08-07T00:00:00.000000Z"))
            .unwrap();

        let fetched = repos.threads().get("b", "t1").unwrap().unwrap();
        assert_eq!(fetched.text, "original post");
        assert!(!fetched.reported);

        // scoped to the board: same id on another board does not resolve
        assert!(repos.threads().get("other", "t1").unwrap().is_none());

        assert!(repos.threads().set_reported("b", "t1").unwrap());
        assert!(repos.threads().get("b", "t1").unwrap().unwrap().reported);
        assert!(!repos.threads().set_reported("b", "missing").unwrap());

        assert!(repos.threads().delete("b", "t1").unwrap());
        assert!(!repos.threads().delete("b", "t1").unwrap());
    }

    #[test]
    fn list_by_bump_orders_and_limits() {
        let conn = setup_conn();
        let repos = SqliteRepositories::new(&conn);

        repos
            .threads()
            .create(&thread("old", "b", "2026-08-07T00:00:01.000000Z"))
            .unwrap();
        repos
            .threads()
            .create(&thread("new", "b", "2026-08-07T00:00:03.000000Z"))
            .unwrap();
        repos
            .threads()
            .create(&thread("mid", "b", "2026-08-07T00:00:02.000000Z"))
            .unwrap();

        let listed = repos.threads().list_by_bump("b", 10).unwrap();
        let ids: Vec<&str> = listed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);

        let limited = repos.threads().list_by_bump("b", 2).unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn reply_append_bumps_thread_and_preserves_order() {
        let conn = setup_conn();
        let repos = SqliteRepositories::new(&conn);

        repos
            .threads()
            .create(&thread("t1", "b", "2026-08-07T00:00:00.000000Z"))
            .unwrap();

        let appended = repos
            .replies()
            .append(
                "b",
                "t1",
                &reply("r1", "t1", "2026-08-07T00:00:05.000000Z"),
                "2026-08-07T00:00:05.000000Z",
            )
            .unwrap();
        assert!(appended);

        let bumped = repos.threads().get("b", "t1").unwrap().unwrap().bumped_on;
        assert_eq!(bumped, "2026-08-07T00:00:05.000000Z");

        repos
            .replies()
            .append(
                "b",
                "t1",
                &reply("r2", "t1", "2026-08-07T00:00:06.000000Z"),
                "2026-08-07T00:00:06.000000Z",
            )
            .unwrap();

        let listed = repos.replies().list_for_thread("t1").unwrap();
        let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2"]);
    }

    #[test]
    fn reply_append_refuses_missing_thread() {
        let conn = setup_conn();
        let repos = SqliteRepositories::new(&conn);

        let appended = repos
            .replies()
            .append(
                "b",
                "nope",
                &reply("r1", "nope", "2026-08-07T00:00:05.000000Z"),
                "2026-08-07T00:00:05.000000Z",
            )
            .unwrap();
        assert!(!appended);
        assert!(repos.replies().list_for_thread("nope").unwrap().is_empty());
    }

    #[test]
    fn tombstone_keeps_the_row() {
        let conn = setup_conn();
        let repos = SqliteRepositories::new(&conn);

        repos
            .threads()
            .create(&thread("t1", "b", "2026-08-07T00:00:00.000000Z"))
            .unwrap();
        repos
            .replies()
            .append(
                "b",
                "t1",
                &reply("r1", "t1", "2026-08-07T00:00:05.000000Z"),
                "2026-08-07T00:00:05.000000Z",
            )
            .unwrap();

        assert!(repos
            .replies()
            .tombstone("b", "t1", "r1", "[deleted]")
            .unwrap());
        let listed = repos.replies().list_for_thread("t1").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].text, "[deleted]");
        assert_eq!(listed[0].created_on, "2026-08-07T00:00:05.000000Z");

        // wrong board never matches
        assert!(!repos
            .replies()
            .tombstone("other", "t1", "r1", "[deleted]")
            .unwrap());
    }

    #[test]
    fn thread_delete_cascades_to_replies() {
        let conn = setup_conn();
        let repos = SqliteRepositories::new(&conn);

        repos
            .threads()
            .create(&thread("t1", "b", "2026-08-07T00:00:00.000000Z"))
            .unwrap();
        repos
            .replies()
            .append(
                "b",
                "t1",
                &reply("r1", "t1", "2026-08-07T00:00:05.000000Z"),
                "2026-08-07T00:00:05.000000Z",
            )
            .unwrap();

        assert!(repos.threads().delete("b", "t1").unwrap());
        assert!(repos.replies().list_for_thread("t1").unwrap().is_empty());
    }
}
