use thiserror::Error;
use weft_store::StoreError;

/// Errors produced while resolving an external identity.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The viewer is not a known local person.
    #[error("Unauthorized: viewer is not a known local person")]
    Unauthorized,

    /// A required identity field was missing or empty.
    #[error("Invalid identity: {0}")]
    InvalidInput(String),

    /// The store failed mid-resolution. Propagated unchanged.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}
