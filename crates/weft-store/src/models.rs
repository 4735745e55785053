//! Domain model structs persisted in the local SQLite database.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to an API or UI layer without remapping.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ServiceKind
// ---------------------------------------------------------------------------

/// Supported third-party providers.
///
/// Stored as a lowercase string column (`"facebook"` / `"twitter"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Facebook,
    Twitter,
}

impl ServiceKind {
    /// The canonical lowercase name used in database columns and URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Facebook => "facebook",
            ServiceKind::Twitter => "twitter",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown service name.
#[derive(Debug, Error)]
#[error("Unknown service kind: {0}")]
pub struct ParseServiceKindError(String);

impl FromStr for ServiceKind {
    type Err = ParseServiceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facebook" => Ok(ServiceKind::Facebook),
            "twitter" => Ok(ServiceKind::Twitter),
            other => Err(ParseServiceKindError(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Person / Profile
// ---------------------------------------------------------------------------

/// A local person.  Rowid primary key; every person has exactly one
/// [`Profile`], created alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub id: i64,
    /// Federation handle, e.g. `alice@pod.example`.
    pub handle: String,
    pub created_at: DateTime<Utc>,
}

/// Public profile attached to a [`Person`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub person_id: i64,
    pub full_name: String,
    /// Whether the person may be found by identity resolution. Persons who
    /// opt out stay invisible unless the viewer is already connected.
    pub searchable: bool,
}

// ---------------------------------------------------------------------------
// Aspect
// ---------------------------------------------------------------------------

/// A named grouping of contacts owned by a person ("friends", "work", ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Aspect {
    pub id: i64,
    /// Owning person.
    pub person_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// An established connection: `owner_id`'s contact entry pointing at
/// `person_id`, filed under one of the owner's aspects.  A mutual
/// connection is two rows, one per direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: i64,
    pub owner_id: i64,
    pub person_id: i64,
    pub aspect_id: i64,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A pending, unaccepted connection request between two persons.
/// Accepting it replaces the row with contacts; the row is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Request {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Invitation
// ---------------------------------------------------------------------------

/// Records that a person invited an external identity before it had a
/// local account.  Keyed by `(service, identifier)`; the identifier is the
/// provider-side UID the invite was addressed to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Invitation {
    pub id: i64,
    pub sender_id: i64,
    /// Aspect the sender would file the new contact under.
    pub aspect_id: i64,
    pub service: ServiceKind,
    pub identifier: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// ServiceAccount
// ---------------------------------------------------------------------------

/// Linkage of a local person to one external-provider identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceAccount {
    pub id: i64,
    /// Owning person.
    pub person_id: i64,
    pub service: ServiceKind,
    /// UID on the provider's side.
    pub uid: String,
    /// OAuth credential used for provider API calls.  Absent for accounts
    /// we only know about through other people's friend lists.
    pub access_token: Option<String>,
    pub created_at: DateTime<Utc>,
}
