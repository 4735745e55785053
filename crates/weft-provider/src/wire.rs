//! Wire shapes of the Graph API friend-list endpoint.

use serde::Deserialize;
use weft_linker::ExternalIdentity;
use weft_store::ServiceKind;

/// One entry of a provider friend list, as it appears on the wire.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FriendEntry {
    pub id: String,
    pub name: String,
    /// Absent or empty when the friend has no picture.
    #[serde(default)]
    pub picture: String,
}

impl FriendEntry {
    /// Convert into the linker's identity snapshot.
    pub fn into_identity(self, service: ServiceKind) -> ExternalIdentity {
        ExternalIdentity {
            service,
            uid: self.id,
            name: self.name,
            photo_url: self.picture,
        }
    }
}

/// A page of friends, wrapped in the provider's `data` envelope.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FriendListPage {
    pub data: Vec<FriendEntry>,
}

impl FriendListPage {
    /// Parse a raw response body.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Convert the whole page, preserving provider order.
    pub fn into_identities(self, service: ServiceKind) -> Vec<ExternalIdentity> {
        self.data
            .into_iter()
            .map(|entry| entry.into_identity(service))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRIENDS_BODY: &str = r#"{"data":[{"name":"Maxwell Salzberg","id":"820651","picture":""},{"name":"Person to Invite","id":"abc123","picture":"http://cdn.fn.com/pic1.jpg"}]}"#;

    #[test]
    fn test_parse_friend_list() {
        let page = FriendListPage::parse(FRIENDS_BODY).unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].id, "820651");
        assert_eq!(page.data[0].name, "Maxwell Salzberg");
        assert_eq!(page.data[0].picture, "");
        assert_eq!(page.data[1].id, "abc123");
        assert_eq!(page.data[1].picture, "http://cdn.fn.com/pic1.jpg");
    }

    #[test]
    fn test_missing_picture_defaults_empty() {
        let page = FriendListPage::parse(r#"{"data":[{"name":"Anyone","id":"1"}]}"#).unwrap();

        assert_eq!(page.data[0].picture, "");
    }

    #[test]
    fn test_malformed_body_rejected() {
        assert!(FriendListPage::parse("<html>rate limited</html>").is_err());
        assert!(FriendListPage::parse(r#"{"friends":[]}"#).is_err());
    }

    #[test]
    fn test_into_identities_keeps_order() {
        let page = FriendListPage::parse(FRIENDS_BODY).unwrap();

        let identities = page.into_identities(ServiceKind::Facebook);

        assert_eq!(identities.len(), 2);
        assert_eq!(identities[0].service, ServiceKind::Facebook);
        assert_eq!(identities[0].uid, "820651");
        assert_eq!(identities[0].name, "Maxwell Salzberg");
        assert_eq!(identities[0].photo_url, "");
        assert_eq!(identities[1].uid, "abc123");
        assert_eq!(identities[1].photo_url, "http://cdn.fn.com/pic1.jpg");
    }
}
