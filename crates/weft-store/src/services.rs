//! CRUD operations for [`ServiceAccount`] records.
//!
//! A service account ties a local person to one identity on an external
//! provider.  The `(service, uid)` pair is unique and is the lookup key
//! used by identity resolution.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;
use crate::models::{ServiceAccount, ServiceKind};

impl Database {
    /// Link `person_id` to a provider identity.
    pub fn add_service_account(
        &self,
        person_id: i64,
        service: ServiceKind,
        uid: &str,
        access_token: Option<&str>,
    ) -> Result<ServiceAccount> {
        let created_at = Utc::now();
        self.conn().execute(
            "INSERT INTO service_accounts (person_id, service, uid, access_token, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                person_id,
                service.as_str(),
                uid,
                access_token,
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(ServiceAccount {
            id: self.conn().last_insert_rowid(),
            person_id,
            service,
            uid: uid.to_string(),
            access_token: access_token.map(str::to_string),
            created_at,
        })
    }

    /// Exact-match lookup by `(service, uid)`.  At most one row exists.
    pub fn find_service_account(
        &self,
        service: ServiceKind,
        uid: &str,
    ) -> Result<Option<ServiceAccount>> {
        let account = self
            .conn()
            .query_row(
                "SELECT id, person_id, service, uid, access_token, created_at
                 FROM service_accounts
                 WHERE service = ?1 AND uid = ?2",
                params![service.as_str(), uid],
                row_to_service_account,
            )
            .optional()?;
        Ok(account)
    }

    /// List the provider identities linked to a person, oldest first.
    pub fn services_for(&self, person_id: i64) -> Result<Vec<ServiceAccount>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, person_id, service, uid, access_token, created_at
             FROM service_accounts
             WHERE person_id = ?1
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map(params![person_id], row_to_service_account)?;

        let mut accounts = Vec::new();
        for row in rows {
            accounts.push(row?);
        }
        Ok(accounts)
    }
}

fn row_to_service_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<ServiceAccount> {
    let id: i64 = row.get(0)?;
    let person_id: i64 = row.get(1)?;
    let service_str: String = row.get(2)?;
    let uid: String = row.get(3)?;
    let access_token: Option<String> = row.get(4)?;
    let created_str: String = row.get(5)?;

    let service: ServiceKind = service_str
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e)))?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e)))?;

    Ok(ServiceAccount {
        id,
        person_id,
        service,
        uid,
        access_token,
        created_at,
    })
}
