//! v001 -- Initial schema creation.
//!
//! Creates the seven core tables: `people`, `profiles`, `aspects`,
//! `contacts`, `requests`, `invitations`, and `service_accounts`.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- People
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS people (
    id         INTEGER PRIMARY KEY,
    handle     TEXT NOT NULL UNIQUE,         -- federation handle
    created_at TEXT NOT NULL                 -- ISO-8601 / RFC-3339
);

-- ----------------------------------------------------------------
-- Profiles (1:1 with people)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS profiles (
    person_id  INTEGER PRIMARY KEY,
    full_name  TEXT NOT NULL,
    searchable INTEGER NOT NULL DEFAULT 1,   -- boolean 0/1

    FOREIGN KEY (person_id) REFERENCES people(id) ON DELETE CASCADE
);

-- ----------------------------------------------------------------
-- Aspects (contact groupings)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS aspects (
    id         INTEGER PRIMARY KEY,
    person_id  INTEGER NOT NULL,             -- owning person
    name       TEXT NOT NULL,
    created_at TEXT NOT NULL,

    FOREIGN KEY (person_id) REFERENCES people(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_aspects_person ON aspects(person_id);

-- ----------------------------------------------------------------
-- Contacts (one row per direction of a connection)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS contacts (
    id         INTEGER PRIMARY KEY,
    owner_id   INTEGER NOT NULL,             -- whose contact list
    person_id  INTEGER NOT NULL,             -- who it points at
    aspect_id  INTEGER NOT NULL,
    created_at TEXT NOT NULL,

    UNIQUE (owner_id, person_id),
    FOREIGN KEY (owner_id)  REFERENCES people(id)  ON DELETE CASCADE,
    FOREIGN KEY (person_id) REFERENCES people(id)  ON DELETE CASCADE,
    FOREIGN KEY (aspect_id) REFERENCES aspects(id) ON DELETE CASCADE
);

-- ----------------------------------------------------------------
-- Requests (pending connection requests)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS requests (
    id           INTEGER PRIMARY KEY,
    sender_id    INTEGER NOT NULL,
    recipient_id INTEGER NOT NULL,
    created_at   TEXT NOT NULL,

    UNIQUE (sender_id, recipient_id),
    FOREIGN KEY (sender_id)    REFERENCES people(id) ON DELETE CASCADE,
    FOREIGN KEY (recipient_id) REFERENCES people(id) ON DELETE CASCADE
);

-- ----------------------------------------------------------------
-- Invitations (pre-registration invites to external identities)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS invitations (
    id         INTEGER PRIMARY KEY,
    sender_id  INTEGER NOT NULL,
    aspect_id  INTEGER NOT NULL,
    service    TEXT NOT NULL,                -- lowercase service kind
    identifier TEXT NOT NULL,                -- provider-side UID invited
    created_at TEXT NOT NULL,

    FOREIGN KEY (sender_id) REFERENCES people(id)  ON DELETE CASCADE,
    FOREIGN KEY (aspect_id) REFERENCES aspects(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_invitations_service_identifier
    ON invitations(service, identifier);

-- ----------------------------------------------------------------
-- Service accounts (person <-> provider identity links)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS service_accounts (
    id           INTEGER PRIMARY KEY,
    person_id    INTEGER NOT NULL,
    service      TEXT NOT NULL,
    uid          TEXT NOT NULL,
    access_token TEXT,
    created_at   TEXT NOT NULL,

    UNIQUE (service, uid),
    FOREIGN KEY (person_id) REFERENCES people(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_service_accounts_person
    ON service_accounts(person_id);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
