use crate::database::models::ThreadRecord;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqliteThreadRepository<'conn> {
    pub(super) conn: &'conn Connection,
}

impl<'conn> super::ThreadRepository for SqliteThreadRepository<'conn> {
    fn create(&self, record: &ThreadRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO threads (id, board, text, created_on, bumped_on, reported, delete_password)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                record.id,
                record.board,
                record.text,
                record.created_on,
                record.bumped_on,
                if record.reported { 1 } else { 0 },
                record.delete_password
            ],
        )?;
        Ok(())
    }

    fn get(&self, board: &str, id: &str) -> Result<Option<ThreadRecord>> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT id, board, text, created_on, bumped_on, reported, delete_password
                FROM threads
                WHERE board = ?1 AND id = ?2
                "#,
                params![board, id],
                |row| {
                    Ok(ThreadRecord {
                        id: row.get(0)?,
                        board: row.get(1)?,
                        text: row.get(2)?,
                        created_on: row.get(3)?,
                        bumped_on: row.get(4)?,
                        reported: row.get::<_, i64>(5)? != 0,
                        delete_password: row.get(6)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    fn list_by_bump(&self, board: &str, limit: usize) -> Result<Vec<ThreadRecord>> {
        // bumped_on is fixed-width RFC 3339, so the raw column sorts
        // chronologically; rowid keeps ties in insertion order.
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, board, text, created_on, bumped_on, reported, delete_password
            FROM threads
            WHERE board = ?1
            ORDER BY bumped_on DESC, rowid ASC
            LIMIT ?2
            "#,
        )?;
        let rows = stmt.query_map(params![board, limit as i64], |row| {
            Ok(ThreadRecord {
                id: row.get(0)?,
                board: row.get(1)?,
                text: row.get(2)?,
                created_on: row.get(3)?,
                bumped_on: row.get(4)?,
                reported: row.get::<_, i64>(5)? != 0,
                delete_password: row.get(6)?,
            })
        })?;

        let mut threads = Vec::new();
        for row in rows {
            threads.push(row?);
        }
        Ok(threads)
    }

    fn set_reported(&self, board: &str, id: &str) -> Result<bool> {
        let changed = self.conn.execute(
            r#"
            UPDATE threads
            SET reported = 1
            WHERE board = ?1 AND id = ?2
            "#,
            params![board, id],
        )?;
        Ok(changed > 0)
    }

    fn delete_password(&self, board: &str, id: &str) -> Result<Option<String>> {
        let hash = self
            .conn
            .query_row(
                r#"
                SELECT delete_password
                FROM threads
                WHERE board = ?1 AND id = ?2
                "#,
                params![board, id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(hash)
    }

    fn delete(&self, board: &str, id: &str) -> Result<bool> {
        let deleted = self.conn.execute(
            r#"
            DELETE FROM threads
            WHERE board = ?1 AND id = ?2
            "#,
            params![board, id],
        )?;
        Ok(deleted > 0)
    }
}
