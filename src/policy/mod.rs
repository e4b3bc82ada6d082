//! Permission matrix for every guarded mutation.
//!
//! A service works out how the actor relates to the resource it is about to
//! touch, then asks [`authorize`] whether that relation may perform the
//! operation. The rules live in [`permitted`] and nowhere else.

use std::borrow::Cow;

use uuid::Uuid;

use crate::api::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ViewFriendship,
    AcceptFriendship,
    RejectFriendship,
    BlockFriendship,
    UnlinkFriendship,
    UpdateGroup,
    DeleteGroup,
    AddMember,
    ChangeRole,
    RemoveMember,
    UpdateEvent,
    DeleteEvent,
    Rsvp,
    UpdateRsvp,
    RemoveRsvp,
    MarkMessageRead,
    MarkNotificationRead,
    DeleteNotification,
}

/// How the actor stands with respect to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `user_id` of a friendship: the party that sent the request.
    Requester,
    /// `friend_id` of a friendship, or the addressee of a message/notification.
    Recipient,
    /// `created_by` of the group or event that owns the record.
    Owner,
    /// The user the record is about (member, attendee).
    Subject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

pub fn permitted(operation: Operation) -> &'static [Relation] {
    use Operation::*;
    use Relation::*;

    match operation {
        ViewFriendship | BlockFriendship | UnlinkFriendship => &[Requester, Recipient],
        AcceptFriendship | RejectFriendship => &[Recipient],
        UpdateGroup | DeleteGroup | AddMember | ChangeRole | UpdateEvent | DeleteEvent => {
            &[Owner]
        }
        RemoveMember => &[Owner, Subject],
        Rsvp | UpdateRsvp | RemoveRsvp => &[Subject],
        MarkMessageRead | MarkNotificationRead | DeleteNotification => &[Recipient],
    }
}

/// `held` lists every relation the actor has with the resource; one match is enough.
pub fn authorize(operation: Operation, held: &[Relation]) -> Decision {
    let allowed = permitted(operation);
    if held.iter().any(|relation| allowed.contains(relation)) {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

/// Relations an actor holds on a directed pair such as a friendship or message.
pub fn pair_relations(actor: &Uuid, from: &Uuid, to: &Uuid) -> Vec<Relation> {
    let mut held = Vec::with_capacity(2);
    if actor == from {
        held.push(Relation::Requester);
    }
    if actor == to {
        held.push(Relation::Recipient);
    }
    held
}

/// Relations an actor holds on a child record of an owned resource.
pub fn owned_relations(actor: &Uuid, owner: Option<&Uuid>, subject: Option<&Uuid>) -> Vec<Relation> {
    let mut held = Vec::with_capacity(2);
    if owner == Some(actor) {
        held.push(Relation::Owner);
    }
    if subject == Some(actor) {
        held.push(Relation::Subject);
    }
    held
}

impl Decision {
    pub fn ensure(self, msg: impl Into<Cow<'static, str>>) -> Result<(), error::SystemError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(error::SystemError::forbidden(msg)),
        }
    }
}
