//! # weft-provider
//!
//! Friend-list retrieval from external services.
//!
//! A linked [`weft_store::ServiceAccount`] may expose a list of friends
//! on its provider. This crate fetches that list over HTTP, decodes the
//! wire envelope, and hands back [`weft_linker::ExternalIdentity`]
//! snapshots ready for [`weft_linker::resolve_all`]. Facebook is the
//! only service with a friend-list endpoint; Twitter accounts can be
//! linked but not harvested.

pub mod client;
pub mod wire;

mod error;

pub use client::{ProviderClient, DEFAULT_BASE_URL};
pub use error::ProviderError;
pub use wire::{FriendEntry, FriendListPage};
