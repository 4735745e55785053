//! CRUD operations for [`Aspect`] and [`Contact`] records.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;
use crate::models::{Aspect, Contact};

impl Database {
    /// Insert a new aspect owned by `person_id`.
    pub fn add_aspect(&self, person_id: i64, name: &str) -> Result<Aspect> {
        let created_at = Utc::now();
        self.conn().execute(
            "INSERT INTO aspects (person_id, name, created_at) VALUES (?1, ?2, ?3)",
            params![person_id, name, created_at.to_rfc3339()],
        )?;

        Ok(Aspect {
            id: self.conn().last_insert_rowid(),
            person_id,
            name: name.to_string(),
            created_at,
        })
    }

    /// List a person's aspects, oldest first.
    pub fn aspects_for(&self, person_id: i64) -> Result<Vec<Aspect>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, person_id, name, created_at
             FROM aspects
             WHERE person_id = ?1
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map(params![person_id], row_to_aspect)?;

        let mut aspects = Vec::new();
        for row in rows {
            aspects.push(row?);
        }
        Ok(aspects)
    }

    /// Insert `owner_id`'s contact entry pointing at `person_id`, filed
    /// under `aspect_id`.  A mutual connection is two of these, one per
    /// direction.
    pub fn add_contact(&self, owner_id: i64, person_id: i64, aspect_id: i64) -> Result<Contact> {
        let created_at = Utc::now();
        self.conn().execute(
            "INSERT INTO contacts (owner_id, person_id, aspect_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![owner_id, person_id, aspect_id, created_at.to_rfc3339()],
        )?;

        Ok(Contact {
            id: self.conn().last_insert_rowid(),
            owner_id,
            person_id,
            aspect_id,
            created_at,
        })
    }

    /// Fetch a single contact by id.
    pub fn get_contact(&self, id: i64) -> Result<Option<Contact>> {
        let contact = self
            .conn()
            .query_row(
                "SELECT id, owner_id, person_id, aspect_id, created_at
                 FROM contacts
                 WHERE id = ?1",
                params![id],
                row_to_contact,
            )
            .optional()?;
        Ok(contact)
    }

    /// Look up a connection between two people, in either orientation.
    ///
    /// When both direction rows exist, the row owned by `a` wins, so the
    /// caller gets their own contact entry back.
    pub fn find_contact(&self, a: i64, b: i64) -> Result<Option<Contact>> {
        let contact = self
            .conn()
            .query_row(
                "SELECT id, owner_id, person_id, aspect_id, created_at
                 FROM contacts
                 WHERE (owner_id = ?1 AND person_id = ?2)
                    OR (owner_id = ?2 AND person_id = ?1)
                 ORDER BY (owner_id = ?1) DESC, id ASC
                 LIMIT 1",
                params![a, b],
                row_to_contact,
            )
            .optional()?;
        Ok(contact)
    }

    /// List everyone on `owner_id`'s contact list, oldest first.
    pub fn contacts_for(&self, owner_id: i64) -> Result<Vec<Contact>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, owner_id, person_id, aspect_id, created_at
             FROM contacts
             WHERE owner_id = ?1
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map(params![owner_id], row_to_contact)?;

        let mut contacts = Vec::new();
        for row in rows {
            contacts.push(row?);
        }
        Ok(contacts)
    }
}

fn row_to_aspect(row: &rusqlite::Row<'_>) -> rusqlite::Result<Aspect> {
    let id: i64 = row.get(0)?;
    let person_id: i64 = row.get(1)?;
    let name: String = row.get(2)?;
    let created_str: String = row.get(3)?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e)))?;

    Ok(Aspect {
        id,
        person_id,
        name,
        created_at,
    })
}

fn row_to_contact(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contact> {
    let id: i64 = row.get(0)?;
    let owner_id: i64 = row.get(1)?;
    let person_id: i64 = row.get(2)?;
    let aspect_id: i64 = row.get(3)?;
    let created_str: String = row.get(4)?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e)))?;

    Ok(Contact {
        id,
        owner_id,
        person_id,
        aspect_id,
        created_at,
    })
}
