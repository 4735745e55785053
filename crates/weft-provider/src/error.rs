use reqwest::StatusCode;
use thiserror::Error;
use weft_store::ServiceKind;

/// Errors produced while fetching a friend list from a provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The account carries no usable access token.
    #[error("Account has no access token")]
    MissingCredential,

    /// The service does not expose a friend-list endpoint.
    #[error("No friend-list endpoint for {0}")]
    Unsupported(ServiceKind),

    /// Transport-level failure, before any response arrived.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider answered {0}")]
    Api(StatusCode),

    /// The response body was not the shape we expect.
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),
}
