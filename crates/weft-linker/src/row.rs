//! Named-field access to raw link rows.
//!
//! Link results are normally computed live by [`resolve_link`]; rows
//! exported from an older materialized `service_users` table, or cached
//! by an upstream job, arrive as positional value arrays instead.
//! [`ServiceUserRecord`] gives such a row its field names back,
//! validating shape and column types up front, and re-attaches the
//! referenced store records on demand.
//!
//! [`resolve_link`]: crate::link::resolve_link

use chrono::{DateTime, Utc};
use thiserror::Error;
use weft_store::{Contact, Database, Invitation, Person, Request, StoreError};

/// A loosely typed cell of a raw result row.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Integer(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Null,
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(value: DateTime<Utc>) -> Self {
        RawValue::Timestamp(value)
    }
}

impl RawValue {
    fn kind(&self) -> &'static str {
        match self {
            RawValue::Integer(_) => "integer",
            RawValue::Text(_) => "text",
            RawValue::Timestamp(_) => "timestamp",
            RawValue::Null => "null",
        }
    }

    fn integer(&self, index: usize, field: &'static str) -> Result<i64, RowError> {
        match self {
            RawValue::Integer(value) => Ok(*value),
            other => Err(RowError::Type {
                index,
                field,
                expected: "integer",
                got: other.kind(),
            }),
        }
    }

    fn integer_or_null(&self, index: usize, field: &'static str) -> Result<Option<i64>, RowError> {
        match self {
            RawValue::Integer(value) => Ok(Some(*value)),
            RawValue::Null => Ok(None),
            other => Err(RowError::Type {
                index,
                field,
                expected: "integer or null",
                got: other.kind(),
            }),
        }
    }

    fn text(&self, index: usize, field: &'static str) -> Result<String, RowError> {
        match self {
            RawValue::Text(value) => Ok(value.clone()),
            other => Err(RowError::Type {
                index,
                field,
                expected: "text",
                got: other.kind(),
            }),
        }
    }

    fn timestamp(&self, index: usize, field: &'static str) -> Result<DateTime<Utc>, RowError> {
        match self {
            RawValue::Timestamp(value) => Ok(*value),
            other => Err(RowError::Type {
                index,
                field,
                expected: "timestamp",
                got: other.kind(),
            }),
        }
    }
}

/// Errors produced while constructing a record from a raw row.
#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("Expected {expected} columns, got {got}")]
    Arity { expected: usize, got: usize },

    #[error("Column {index} ({field}): expected {expected}, got {got}")]
    Type {
        index: usize,
        field: &'static str,
        expected: &'static str,
        got: &'static str,
    },
}

/// A materialized link row with named fields.
///
/// The column order is fixed by the legacy export format:
/// `[id, uid, name, photo_url, service_id, person_id, contact_id,
/// request_id, invitation_id, created_at, updated_at]`. The four
/// relational ids are nullable; everything else is required.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceUserRecord {
    pub id: i64,
    pub uid: String,
    pub name: String,
    pub photo_url: String,
    pub service_id: i64,
    pub person_id: Option<i64>,
    pub contact_id: Option<i64>,
    pub request_id: Option<i64>,
    pub invitation_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceUserRecord {
    /// Number of columns in the raw layout.
    pub const COLUMNS: usize = 11;

    /// Build a record from a positional row, validating arity and
    /// per-column types before any field is taken on faith.
    pub fn from_row_values(values: &[RawValue]) -> Result<Self, RowError> {
        if values.len() != Self::COLUMNS {
            return Err(RowError::Arity {
                expected: Self::COLUMNS,
                got: values.len(),
            });
        }

        Ok(Self {
            id: values[0].integer(0, "id")?,
            uid: values[1].text(1, "uid")?,
            name: values[2].text(2, "name")?,
            photo_url: values[3].text(3, "photo_url")?,
            service_id: values[4].integer(4, "service_id")?,
            person_id: values[5].integer_or_null(5, "person_id")?,
            contact_id: values[6].integer_or_null(6, "contact_id")?,
            request_id: values[7].integer_or_null(7, "request_id")?,
            invitation_id: values[8].integer_or_null(8, "invitation_id")?,
            created_at: values[9].timestamp(9, "created_at")?,
            updated_at: values[10].timestamp(10, "updated_at")?,
        })
    }

    /// Re-attach the person this row points at.
    ///
    /// A null id, or an id whose row has since been deleted, is absence
    /// rather than an error. The same holds for the other lookups below.
    pub fn person(&self, db: &Database) -> Result<Option<Person>, StoreError> {
        match self.person_id {
            Some(id) => db.get_person(id),
            None => Ok(None),
        }
    }

    pub fn contact(&self, db: &Database) -> Result<Option<Contact>, StoreError> {
        match self.contact_id {
            Some(id) => db.get_contact(id),
            None => Ok(None),
        }
    }

    pub fn request(&self, db: &Database) -> Result<Option<Request>, StoreError> {
        match self.request_id {
            Some(id) => db.get_request(id),
            None => Ok(None),
        }
    }

    pub fn invitation(&self, db: &Database) -> Result<Option<Invitation>, StoreError> {
        match self.invitation_id {
            Some(id) => db.get_invitation(id),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use weft_store::{Database, ServiceKind};

    fn export_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2011, 5, 17, 0, 31, 44).unwrap()
    }

    fn legacy_row() -> Vec<RawValue> {
        let t = export_time();
        vec![
            RawValue::from(182),
            RawValue::from("820651"),
            RawValue::from("Maxwell Salzberg"),
            RawValue::from("http://cdn.fn.com/pic1.jpg"),
            RawValue::from(299),
            RawValue::from(1610),
            RawValue::Null,
            RawValue::Null,
            RawValue::Null,
            RawValue::from(t),
            RawValue::from(t),
        ]
    }

    #[test]
    fn test_positional_row_gets_field_names() {
        let record = ServiceUserRecord::from_row_values(&legacy_row()).unwrap();

        assert_eq!(record.id, 182);
        assert_eq!(record.uid, "820651");
        assert_eq!(record.name, "Maxwell Salzberg");
        assert_eq!(record.photo_url, "http://cdn.fn.com/pic1.jpg");
        assert_eq!(record.service_id, 299);
        assert_eq!(record.person_id, Some(1610));
        assert_eq!(record.contact_id, None);
        assert_eq!(record.request_id, None);
        assert_eq!(record.invitation_id, None);
        assert_eq!(record.created_at, export_time());
        assert_eq!(record.updated_at, export_time());
    }

    #[test]
    fn test_short_row_rejected() {
        let row = vec![RawValue::from(182), RawValue::from("820651")];

        let err = ServiceUserRecord::from_row_values(&row).unwrap_err();

        assert_eq!(
            err,
            RowError::Arity {
                expected: ServiceUserRecord::COLUMNS,
                got: 2
            }
        );
    }

    #[test]
    fn test_mistyped_column_rejected() {
        let mut row = legacy_row();
        row[0] = RawValue::from("one-eighty-two");

        let err = ServiceUserRecord::from_row_values(&row).unwrap_err();

        assert!(matches!(
            err,
            RowError::Type {
                index: 0,
                field: "id",
                ..
            }
        ));
    }

    #[test]
    fn test_null_ids_reattach_as_none() {
        let db = Database::open_in_memory().unwrap();
        let mut row = legacy_row();
        row[5] = RawValue::Null;
        let record = ServiceUserRecord::from_row_values(&row).unwrap();

        assert_eq!(record.person_id, None);
        assert_eq!(record.person(&db).unwrap(), None);
        assert_eq!(record.contact(&db).unwrap(), None);
        assert_eq!(record.request(&db).unwrap(), None);
        assert_eq!(record.invitation(&db).unwrap(), None);
    }

    #[test]
    fn test_stale_person_id_reattaches_as_none() {
        let db = Database::open_in_memory().unwrap();
        let record = ServiceUserRecord::from_row_values(&legacy_row()).unwrap();

        // Nothing in this store has id 1610.
        assert_eq!(record.person(&db).unwrap(), None);
    }

    #[test]
    fn test_live_person_id_reattaches() {
        let db = Database::open_in_memory().unwrap();
        let person = db
            .add_person("maxwell@pod.example", "Maxwell Salzberg", true)
            .unwrap();

        let mut row = legacy_row();
        row[5] = RawValue::from(person.id);
        let record = ServiceUserRecord::from_row_values(&row).unwrap();

        assert_eq!(record.person(&db).unwrap(), Some(person));
    }

    #[test]
    fn test_live_invitation_id_reattaches() {
        let db = Database::open_in_memory().unwrap();
        let sender = db.add_person("alice@pod.example", "Alice", true).unwrap();
        let aspect = db.add_aspect(sender.id, "friends").unwrap();
        let invitation = db
            .add_invitation(sender.id, aspect.id, ServiceKind::Facebook, "820651")
            .unwrap();

        let mut row = legacy_row();
        row[8] = RawValue::from(invitation.id);
        let record = ServiceUserRecord::from_row_values(&row).unwrap();

        assert_eq!(record.invitation(&db).unwrap(), Some(invitation));
    }
}
