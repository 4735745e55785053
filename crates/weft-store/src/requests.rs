use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;
use crate::models::Request;

impl Database {
    /// Insert a pending connection request from `sender_id` to
    /// `recipient_id`.
    pub fn add_request(&self, sender_id: i64, recipient_id: i64) -> Result<Request> {
        let created_at = Utc::now();
        self.conn().execute(
            "INSERT INTO requests (sender_id, recipient_id, created_at)
             VALUES (?1, ?2, ?3)",
            params![sender_id, recipient_id, created_at.to_rfc3339()],
        )?;

        Ok(Request {
            id: self.conn().last_insert_rowid(),
            sender_id,
            recipient_id,
            created_at,
        })
    }

    /// Fetch a single request by id.
    pub fn get_request(&self, id: i64) -> Result<Option<Request>> {
        let request = self
            .conn()
            .query_row(
                "SELECT id, sender_id, recipient_id, created_at
                 FROM requests
                 WHERE id = ?1",
                params![id],
                row_to_request,
            )
            .optional()?;
        Ok(request)
    }

    /// Look up a pending request between two people, in either direction.
    pub fn find_pending_request(&self, a: i64, b: i64) -> Result<Option<Request>> {
        let request = self
            .conn()
            .query_row(
                "SELECT id, sender_id, recipient_id, created_at
                 FROM requests
                 WHERE (sender_id = ?1 AND recipient_id = ?2)
                    OR (sender_id = ?2 AND recipient_id = ?1)
                 ORDER BY id ASC
                 LIMIT 1",
                params![a, b],
                row_to_request,
            )
            .optional()?;
        Ok(request)
    }

    // a request is consumed when it is accepted or ignored
    pub fn delete_request(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM requests WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}

fn row_to_request(row: &rusqlite::Row<'_>) -> rusqlite::Result<Request> {
    let id: i64 = row.get(0)?;
    let sender_id: i64 = row.get(1)?;
    let recipient_id: i64 = row.get(2)?;
    let created_str: String = row.get(3)?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e)))?;

    Ok(Request {
        id,
        sender_id,
        recipient_id,
        created_at,
    })
}
