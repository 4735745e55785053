//! CRUD operations for [`Person`] and [`Profile`] records.
//!
//! A person and their profile are created together; the profile carries the
//! `searchable` visibility flag consulted during identity resolution.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;
use crate::models::{Person, Profile};

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new person together with their profile.
    pub fn add_person(&self, handle: &str, full_name: &str, searchable: bool) -> Result<Person> {
        let created_at = Utc::now();

        self.conn().execute(
            "INSERT INTO people (handle, created_at) VALUES (?1, ?2)",
            params![handle, created_at.to_rfc3339()],
        )?;
        let id = self.conn().last_insert_rowid();

        self.conn().execute(
            "INSERT INTO profiles (person_id, full_name, searchable)
             VALUES (?1, ?2, ?3)",
            params![id, full_name, searchable as i32],
        )?;

        Ok(Person {
            id,
            handle: handle.to_string(),
            created_at,
        })
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single person by id.  Absence is a normal result.
    pub fn get_person(&self, id: i64) -> Result<Option<Person>> {
        let person = self
            .conn()
            .query_row(
                "SELECT id, handle, created_at FROM people WHERE id = ?1",
                params![id],
                row_to_person,
            )
            .optional()?;
        Ok(person)
    }

    /// Fetch the profile belonging to a person.
    pub fn get_profile(&self, person_id: i64) -> Result<Option<Profile>> {
        let profile = self
            .conn()
            .query_row(
                "SELECT person_id, full_name, searchable
                 FROM profiles
                 WHERE person_id = ?1",
                params![person_id],
                row_to_profile,
            )
            .optional()?;
        Ok(profile)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Flip a person's visibility flag.  Returns `true` if a row changed.
    pub fn set_searchable(&self, person_id: i64, searchable: bool) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE profiles SET searchable = ?2 WHERE person_id = ?1",
            params![person_id, searchable as i32],
        )?;
        Ok(affected > 0)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`Person`].
fn row_to_person(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
    let id: i64 = row.get(0)?;
    let handle: String = row.get(1)?;
    let created_str: String = row.get(2)?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e)))?;

    Ok(Person {
        id,
        handle,
        created_at,
    })
}

/// Map a `rusqlite::Row` to a [`Profile`].
fn row_to_profile(row: &rusqlite::Row<'_>) -> rusqlite::Result<Profile> {
    let person_id: i64 = row.get(0)?;
    let full_name: String = row.get(1)?;
    let searchable_int: i32 = row.get(2)?;

    Ok(Profile {
        person_id,
        full_name,
        searchable: searchable_int != 0,
    })
}
