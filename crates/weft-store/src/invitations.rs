//! CRUD operations for [`Invitation`] records.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;
use crate::models::{Invitation, ServiceKind};

impl Database {
    /// Record that `sender_id` invited an external identity, addressed by
    /// `(service, identifier)`.
    pub fn add_invitation(
        &self,
        sender_id: i64,
        aspect_id: i64,
        service: ServiceKind,
        identifier: &str,
    ) -> Result<Invitation> {
        let created_at = Utc::now();
        self.conn().execute(
            "INSERT INTO invitations (sender_id, aspect_id, service, identifier, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                sender_id,
                aspect_id,
                service.as_str(),
                identifier,
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(Invitation {
            id: self.conn().last_insert_rowid(),
            sender_id,
            aspect_id,
            service,
            identifier: identifier.to_string(),
            created_at,
        })
    }

    /// Fetch a single invitation by id.
    pub fn get_invitation(&self, id: i64) -> Result<Option<Invitation>> {
        let invitation = self
            .conn()
            .query_row(
                "SELECT id, sender_id, aspect_id, service, identifier, created_at
                 FROM invitations
                 WHERE id = ?1",
                params![id],
                row_to_invitation,
            )
            .optional()?;
        Ok(invitation)
    }

    /// Look up an invitation by the exact `(service, identifier)` pair it
    /// was addressed to.  When the same identity was invited more than
    /// once, the earliest invitation wins.
    pub fn find_invitation(
        &self,
        service: ServiceKind,
        identifier: &str,
    ) -> Result<Option<Invitation>> {
        let invitation = self
            .conn()
            .query_row(
                "SELECT id, sender_id, aspect_id, service, identifier, created_at
                 FROM invitations
                 WHERE service = ?1 AND identifier = ?2
                 ORDER BY id ASC
                 LIMIT 1",
                params![service.as_str(), identifier],
                row_to_invitation,
            )
            .optional()?;
        Ok(invitation)
    }
}

fn row_to_invitation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Invitation> {
    let id: i64 = row.get(0)?;
    let sender_id: i64 = row.get(1)?;
    let aspect_id: i64 = row.get(2)?;
    let service_str: String = row.get(3)?;
    let identifier: String = row.get(4)?;
    let created_str: String = row.get(5)?;

    let service: ServiceKind = service_str
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e)))?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e)))?;

    Ok(Invitation {
        id,
        sender_id,
        aspect_id,
        service,
        identifier,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        db: Database,
        sender_id: i64,
        aspect_id: i64,
    }

    fn fixture() -> Fixture {
        let db = Database::open_in_memory().unwrap();
        let sender = db.add_person("alice@pod.example", "Alice", true).unwrap();
        let aspect = db.add_aspect(sender.id, "friends").unwrap();
        Fixture {
            sender_id: sender.id,
            aspect_id: aspect.id,
            db,
        }
    }

    #[test]
    fn test_find_invitation_exact_identifier() {
        let f = fixture();
        let inv = f
            .db
            .add_invitation(f.sender_id, f.aspect_id, ServiceKind::Facebook, "820651")
            .unwrap();

        assert_eq!(
            f.db.find_invitation(ServiceKind::Facebook, "820651").unwrap(),
            Some(inv)
        );
        assert_eq!(
            f.db.find_invitation(ServiceKind::Facebook, "dsaofhnadsoifnsdanf").unwrap(),
            None
        );
    }

    #[test]
    fn test_find_invitation_matching_service() {
        let f = fixture();
        f.db.add_invitation(f.sender_id, f.aspect_id, ServiceKind::Facebook, "820651")
            .unwrap();

        assert_eq!(
            f.db.find_invitation(ServiceKind::Twitter, "820651").unwrap(),
            None
        );
    }

    #[test]
    fn test_earliest_invitation_wins() {
        let f = fixture();
        let bob = f.db.add_person("bob@pod.example", "Bob", true).unwrap();
        let bob_aspect = f.db.add_aspect(bob.id, "pals").unwrap();

        let first = f
            .db
            .add_invitation(f.sender_id, f.aspect_id, ServiceKind::Facebook, "abc123")
            .unwrap();
        f.db.add_invitation(bob.id, bob_aspect.id, ServiceKind::Facebook, "abc123")
            .unwrap();

        assert_eq!(
            f.db.find_invitation(ServiceKind::Facebook, "abc123").unwrap(),
            Some(first)
        );
    }

    #[test]
    fn test_get_invitation_by_id() {
        let f = fixture();
        let inv = f
            .db
            .add_invitation(f.sender_id, f.aspect_id, ServiceKind::Twitter, "998877")
            .unwrap();

        assert_eq!(f.db.get_invitation(inv.id).unwrap(), Some(inv));
        assert_eq!(f.db.get_invitation(4242).unwrap(), None);
    }
}
