//! # weft-linker
//!
//! Identity resolution for the Weft social graph.
//!
//! An external service tells us who someone is on its network; the
//! linker decides whether that identity belongs to a known local person
//! and what the viewer's standing relationship to them is: an
//! established contact, a pending connection request, or an invitation
//! sent before the identity ever registered here. The result is a
//! [`ServiceUserLink`], a read-time projection computed fresh on every
//! call and never persisted.
//!
//! [`row`] handles the one place link data does arrive persisted: raw
//! positional rows exported from an older materialized table.

pub mod link;
pub mod row;

mod error;

pub use error::LinkError;
pub use link::{resolve_all, resolve_link, ExternalIdentity, ServiceUserLink};
pub use row::{RawValue, RowError, ServiceUserRecord};
