use uuid::Uuid;

use crate::{
    api::error,
    modules::friend::{
        model::{FriendResponse, FriendUserRow},
        schema::{FriendshipEntity, FriendshipStatus},
    },
};

/// Relationship ledger. Writes are single statements so each one commits on its own.
#[async_trait::async_trait]
pub trait FriendshipRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<FriendshipEntity>, error::SystemError>;

    /// Looks up the record for the unordered pair, whichever way it was requested.
    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;

    /// Inserts a pending request. `None` when the pair already has a record.
    async fn create_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;

    /// Moves `id` from `expected` to `next`. `None` when the record is gone or
    /// no longer in `expected`.
    async fn update_status(
        &self,
        id: &Uuid,
        expected: FriendshipStatus,
        next: FriendshipStatus,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;

    /// Deletes `id`, optionally only while it is in `expected`.
    async fn delete(
        &self,
        id: &Uuid,
        expected: Option<FriendshipStatus>,
    ) -> Result<bool, error::SystemError>;

    async fn find_friends(&self, user_id: &Uuid)
        -> Result<Vec<FriendResponse>, error::SystemError>;

    /// Pending requests addressed to `user_id`, newest first.
    async fn find_requests_to_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendUserRow>, error::SystemError>;

    /// Pending requests sent by `user_id`, newest first.
    async fn find_requests_from_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendUserRow>, error::SystemError>;
}
