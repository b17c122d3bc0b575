use crate::database::models::ReplyRecord;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqliteReplyRepository<'conn> {
    pub(super) conn: &'conn Connection,
}

impl<'conn> super::ReplyRepository for SqliteReplyRepository<'conn> {
    fn append(
        &self,
        board: &str,
        thread_id: &str,
        record: &ReplyRecord,
        bumped_on: &str,
    ) -> Result<bool> {
        // Bump and insert share one transaction: the bump doubles as the
        // existence check, and neither write is visible without the other.
        let tx = self.conn.unchecked_transaction()?;
        let bumped = tx.execute(
            r#"
            UPDATE threads
            SET bumped_on = ?3
            WHERE board = ?1 AND id = ?2
            "#,
            params![board, thread_id, bumped_on],
        )?;
        if bumped == 0 {
            return Ok(false);
        }
        tx.execute(
            r#"
            INSERT INTO replies (id, thread_id, text, created_on, reported, delete_password)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                record.id,
                record.thread_id,
                record.text,
                record.created_on,
                if record.reported { 1 } else { 0 },
                record.delete_password
            ],
        )?;
        tx.commit()?;
        Ok(true)
    }

    fn list_for_thread(&self, thread_id: &str) -> Result<Vec<ReplyRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, thread_id, text, created_on, reported, delete_password
            FROM replies
            WHERE thread_id = ?1
            ORDER BY created_on ASC, rowid ASC
            "#,
        )?;
        let rows = stmt.query_map(params![thread_id], |row| {
            Ok(ReplyRecord {
                id: row.get(0)?,
                thread_id: row.get(1)?,
                text: row.get(2)?,
                created_on: row.get(3)?,
                reported: row.get::<_, i64>(4)? != 0,
                delete_password: row.get(5)?,
            })
        })?;
        let mut replies = Vec::new();
        for row in rows {
            replies.push(row?);
        }
        Ok(replies)
    }

    fn set_reported(&self, board: &str, thread_id: &str, reply_id: &str) -> Result<bool> {
        let changed = self.conn.execute(
            r#"
            UPDATE replies
            SET reported = 1
            WHERE id = ?3 AND thread_id = ?2
              AND EXISTS (SELECT 1 FROM threads WHERE id = ?2 AND board = ?1)
            "#,
            params![board, thread_id, reply_id],
        )?;
        Ok(changed > 0)
    }

    fn delete_password(
        &self,
        board: &str,
        thread_id: &str,
        reply_id: &str,
    ) -> Result<Option<String>> {
        let hash = self
            .conn
            .query_row(
                r#"
                SELECT r.delete_password
                FROM replies r
                JOIN threads t ON t.id = r.thread_id
                WHERE t.board = ?1 AND r.thread_id = ?2 AND r.id = ?3
                "#,
                params![board, thread_id, reply_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(hash)
    }

    fn tombstone(
        &self,
        board: &str,
        thread_id: &str,
        reply_id: &str,
        marker: &str,
    ) -> Result<bool> {
        let changed = self.conn.execute(
            r#"
            UPDATE replies
            SET text = ?4
            WHERE id = ?3 AND thread_id = ?2
              AND EXISTS (SELECT 1 FROM threads WHERE id = ?2 AND board = ?1)
            "#,
            params![board, thread_id, reply_id, marker],
        )?;
        Ok(changed > 0)
    }
}
