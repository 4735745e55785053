//! # weft-store
//!
//! Relational storage for the Weft social graph, backed by SQLite.
//!
//! The crate exposes a synchronous `Database` handle that wraps a
//! `rusqlite::Connection` and provides typed CRUD helpers for every domain
//! model: people and their profiles, aspects, contacts, connection
//! requests, invitations, and external service accounts.
//!
//! Lookups on the identity-resolution read path (`find_*`, `get_*`) return
//! `Option`: absence of a match is a normal result there, never an error.

pub mod contacts;
pub mod database;
pub mod invitations;
pub mod migrations;
pub mod models;
pub mod people;
pub mod requests;
pub mod services;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use models::*;
