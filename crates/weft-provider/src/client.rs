//! HTTP retrieval of provider friend lists.

use tracing::debug;
use weft_linker::ExternalIdentity;
use weft_store::{ServiceAccount, ServiceKind};

use crate::error::ProviderError;
use crate::wire::FriendListPage;

/// Default Graph API endpoint. Tests point the client at a local stub.
pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";

/// Fetches friend lists on behalf of linked service accounts.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProviderClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// A client talking to a different endpoint, e.g. a local stub.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the friend list for a linked account.
    ///
    /// Only Facebook exposes one; other services fail with
    /// [`ProviderError::Unsupported`] before any request is made. The
    /// account must carry a non-empty access token. A single GET, no
    /// retries; entries come back in provider order, ready for
    /// [`weft_linker::resolve_all`].
    pub async fn fetch_friends(
        &self,
        account: &ServiceAccount,
    ) -> Result<Vec<ExternalIdentity>, ProviderError> {
        if account.service != ServiceKind::Facebook {
            return Err(ProviderError::Unsupported(account.service));
        }

        let token = match account.access_token.as_deref() {
            Some(token) if !token.is_empty() => token,
            _ => return Err(ProviderError::MissingCredential),
        };

        let url = format!(
            "{}/me/friends?fields=name,picture&access_token={}",
            self.base_url.trim_end_matches('/'),
            token
        );

        debug!(service = %account.service, uid = %account.uid, "fetching friend list");

        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(ProviderError::Api(resp.status()));
        }

        let body = resp.text().await?;
        let page = FriendListPage::parse(&body)?;

        debug!(count = page.data.len(), "friend list fetched");

        Ok(page.into_identities(account.service))
    }
}

impl Default for ProviderClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(service: ServiceKind, token: Option<&str>) -> ServiceAccount {
        ServiceAccount {
            id: 1,
            person_id: 1,
            service,
            uid: "820651".to_string(),
            access_token: token.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_twitter_has_no_friend_list() {
        let client = ProviderClient::new();

        let err = client
            .fetch_friends(&account(ServiceKind::Twitter, Some("token")))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProviderError::Unsupported(ServiceKind::Twitter)
        ));
    }

    #[tokio::test]
    async fn test_tokenless_account_cannot_fetch() {
        let client = ProviderClient::new();

        let err = client
            .fetch_friends(&account(ServiceKind::Facebook, None))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::MissingCredential));
    }

    #[tokio::test]
    async fn test_empty_token_counts_as_missing() {
        let client = ProviderClient::new();

        let err = client
            .fetch_friends(&account(ServiceKind::Facebook, Some("")))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::MissingCredential));
    }
}
