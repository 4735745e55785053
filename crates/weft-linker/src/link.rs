//! Resolution of external identities against the local social graph.
//!
//! A provider tells us who someone is on its network; the linker decides
//! who that is on ours, and what the viewer's standing relationship to
//! them looks like. Everything here is a read: links are computed fresh
//! from current store state and never written back.

use serde::{Deserialize, Serialize};
use tracing::debug;
use weft_store::{Contact, Database, Person, Request, ServiceKind};

use crate::error::LinkError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An identity as reported by an external service.
///
/// This is a snapshot of the provider's view at fetch time. `uid` is the
/// provider-side identifier and is only meaningful together with
/// `service`; the same string can name different people on different
/// networks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalIdentity {
    pub service: ServiceKind,
    pub uid: String,
    pub name: String,
    /// Providers do not always supply a picture; empty means none.
    pub photo_url: String,
}

/// The outcome of resolving one [`ExternalIdentity`] for one viewer.
///
/// The snapshot fields (`uid`, `name`, `photo_url`) are always carried
/// over verbatim. The relational fields are populated only as far as
/// resolution got: no matching account leaves all of them empty, and a
/// person who is neither searchable nor already connected to the viewer
/// stays hidden.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceUserLink {
    pub uid: String,
    pub name: String,
    pub photo_url: String,
    /// The local person behind the identity, if visible to the viewer.
    pub person: Option<Person>,
    /// An established contact between the viewer and that person.
    pub contact: Option<Contact>,
    /// A pending connection request between the two, either direction.
    pub request: Option<Request>,
    /// An invitation previously sent to exactly this identity.
    pub invitation_id: Option<i64>,
}

impl ServiceUserLink {
    /// A link carrying only the provider snapshot, nothing resolved.
    fn unmatched(identity: &ExternalIdentity) -> Self {
        Self {
            uid: identity.uid.clone(),
            name: identity.name.clone(),
            photo_url: identity.photo_url.clone(),
            person: None,
            contact: None,
            request: None,
            invitation_id: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve one externally observed identity against the local graph.
///
/// `viewer_id` must name an existing local person; resolution is always
/// relative to who is asking. The lookup sequence is bounded and exact,
/// with no mutation and no network I/O:
///
/// 1. no account registered for `(service, uid)` ends resolution early
///    with a bare snapshot link;
/// 2. the account owner becomes visible if their profile is searchable
///    or the viewer is already connected to them;
/// 3. once visible, contact and pending request are looked up
///    independently, so inconsistent stored data surfaces both;
/// 4. an invitation addressed to exactly this identity is reported
///    whether or not the owner was visible.
pub fn resolve_link(
    db: &Database,
    viewer_id: i64,
    identity: &ExternalIdentity,
) -> Result<ServiceUserLink, LinkError> {
    if identity.uid.is_empty() {
        return Err(LinkError::InvalidInput("uid must not be empty".into()));
    }
    if identity.name.is_empty() {
        return Err(LinkError::InvalidInput("name must not be empty".into()));
    }

    let viewer = db.get_person(viewer_id)?.ok_or(LinkError::Unauthorized)?;

    let mut link = ServiceUserLink::unmatched(identity);

    let Some(account) = db.find_service_account(identity.service, &identity.uid)? else {
        debug!(service = %identity.service, uid = %identity.uid, "no account for identity");
        return Ok(link);
    };

    if let Some(owner) = db.get_person(account.person_id)? {
        // A missing profile counts as not searchable.
        let searchable = db
            .get_profile(owner.id)?
            .map(|profile| profile.searchable)
            .unwrap_or(false);
        let contact = db.find_contact(viewer.id, owner.id)?;

        if searchable || contact.is_some() {
            link.request = db.find_pending_request(viewer.id, owner.id)?;
            link.contact = contact;
            link.person = Some(owner);
        }
    }

    link.invitation_id = db
        .find_invitation(identity.service, &identity.uid)?
        .map(|invitation| invitation.id);

    debug!(
        service = %identity.service,
        uid = %identity.uid,
        resolved = link.person.is_some(),
        invited = link.invitation_id.is_some(),
        "resolved identity"
    );

    Ok(link)
}

/// Resolve a whole batch of identities, preserving input order.
///
/// Each entry is an independent read of current store state. The first
/// store failure aborts the batch; partial results are discarded.
pub fn resolve_all(
    db: &Database,
    viewer_id: i64,
    identities: &[ExternalIdentity],
) -> Result<Vec<ServiceUserLink>, LinkError> {
    identities
        .iter()
        .map(|identity| resolve_link(db, viewer_id, identity))
        .collect()
}
