use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    constants::notification_type,
    modules::{
        friend::{
            model::{FriendRequestResponse, FriendResponse},
            repository::FriendshipRepository,
            schema::{FriendshipEntity, FriendshipStatus},
        },
        notification::{model::NewNotification, service::NotificationService},
        user::repository::UserRepository,
    },
    policy::{self, Operation},
};

#[derive(Clone)]
pub struct FriendService<R, U>
where
    R: FriendshipRepository,
    U: UserRepository + Send + Sync,
{
    friend_repo: Arc<R>,
    user_repo: Arc<U>,
    notifications: NotificationService,
}

impl<R, U> FriendService<R, U>
where
    R: FriendshipRepository,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(
        friend_repo: Arc<R>,
        user_repo: Arc<U>,
        notifications: NotificationService,
    ) -> Self {
        FriendService { friend_repo, user_repo, notifications }
    }

    pub async fn send_friend_request(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<FriendshipEntity, error::SystemError> {
        if receiver_id == sender_id {
            return Err(error::SystemError::bad_request("Cannot send friend request to yourself"));
        }

        if !self.user_repo.exists(&receiver_id).await? {
            return Err(error::SystemError::not_found("Receiver user not found"));
        }

        if let Some(existing) = self.friend_repo.find_between(&sender_id, &receiver_id).await? {
            return Err(error::SystemError::conflict(format!(
                "A {} friendship already exists between these users",
                existing.status
            )));
        }

        let friendship = self
            .friend_repo
            .create_request(&sender_id, &receiver_id)
            .await?
            .ok_or_else(|| {
                error::SystemError::conflict("A friendship already exists between these users")
            })?;

        tracing::debug!("Friend request {} sent from {} to {}", friendship.id, sender_id, receiver_id);

        self.notifications
            .notify_best_effort(NewNotification {
                user_id: receiver_id,
                kind: notification_type::FRIEND_REQUEST,
                title: "New friend request".into(),
                message: "You have a new friend request".into(),
                data: Some(serde_json::json!({
                    "friendship_id": friendship.id,
                    "from_user_id": sender_id,
                })),
            })
            .await;

        Ok(friendship)
    }

    pub async fn get_friendship(
        &self,
        user_id: Uuid,
        friendship_id: Uuid,
    ) -> Result<FriendshipEntity, error::SystemError> {
        self.load_authorized(
            friendship_id,
            user_id,
            Operation::ViewFriendship,
            "You are not a party to this friendship",
        )
        .await
    }

    pub async fn accept_friend_request(
        &self,
        user_id: Uuid,
        friendship_id: Uuid,
    ) -> Result<FriendshipEntity, error::SystemError> {
        let friendship = self
            .load_authorized(
                friendship_id,
                user_id,
                Operation::AcceptFriendship,
                "You are not allowed to accept this friend request",
            )
            .await?;

        let accepted = self.transition(&friendship, FriendshipStatus::Accepted).await?;

        self.notifications
            .notify_best_effort(NewNotification {
                user_id: accepted.user_id,
                kind: notification_type::FRIEND_ACCEPTED,
                title: "Friend request accepted".into(),
                message: "Your friend request was accepted".into(),
                data: Some(serde_json::json!({
                    "friendship_id": accepted.id,
                    "friend_id": accepted.friend_id,
                })),
            })
            .await;

        Ok(accepted)
    }

    /// Rejection removes the request; the requester may ask again later.
    pub async fn reject_friend_request(
        &self,
        user_id: Uuid,
        friendship_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let friendship = self
            .load_authorized(
                friendship_id,
                user_id,
                Operation::RejectFriendship,
                "You are not allowed to reject this friend request",
            )
            .await?;

        if friendship.status != FriendshipStatus::Pending {
            return Err(error::SystemError::conflict(format!(
                "Cannot reject a friendship that is {}",
                friendship.status
            )));
        }

        if !self.friend_repo.delete(&friendship_id, Some(FriendshipStatus::Pending)).await? {
            return Err(error::SystemError::conflict(
                "Friendship was changed by another request",
            ));
        }

        tracing::debug!("Friend request {} rejected by {}", friendship_id, user_id);
        Ok(())
    }

    pub async fn block(
        &self,
        user_id: Uuid,
        friendship_id: Uuid,
    ) -> Result<FriendshipEntity, error::SystemError> {
        let friendship = self
            .load_authorized(
                friendship_id,
                user_id,
                Operation::BlockFriendship,
                "You are not a party to this friendship",
            )
            .await?;

        self.transition(&friendship, FriendshipStatus::Blocked).await
    }

    /// Removes the record whatever its status.
    pub async fn unlink(&self, user_id: Uuid, friendship_id: Uuid) -> Result<(), error::SystemError> {
        self.load_authorized(
            friendship_id,
            user_id,
            Operation::UnlinkFriendship,
            "You are not a party to this friendship",
        )
        .await?;

        if !self.friend_repo.delete(&friendship_id, None).await? {
            return Err(error::SystemError::not_found("Friendship not found"));
        }

        tracing::debug!("Friendship {} removed by {}", friendship_id, user_id);
        Ok(())
    }

    pub async fn get_friends(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        self.friend_repo.find_friends(&user_id).await
    }

    pub async fn get_incoming_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let rows = self.friend_repo.find_requests_to_user(&user_id).await?;
        Ok(rows.into_iter().map(|row| FriendRequestResponse::incoming(user_id, row)).collect())
    }

    pub async fn get_outgoing_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let rows = self.friend_repo.find_requests_from_user(&user_id).await?;
        Ok(rows.into_iter().map(|row| FriendRequestResponse::outgoing(user_id, row)).collect())
    }

    async fn load_authorized(
        &self,
        friendship_id: Uuid,
        actor_id: Uuid,
        operation: Operation,
        denied: &'static str,
    ) -> Result<FriendshipEntity, error::SystemError> {
        let friendship = self
            .friend_repo
            .find_by_id(&friendship_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Friendship not found"))?;

        let held = policy::pair_relations(&actor_id, &friendship.user_id, &friendship.friend_id);
        policy::authorize(operation, &held).ensure(denied)?;

        Ok(friendship)
    }

    async fn transition(
        &self,
        friendship: &FriendshipEntity,
        next: FriendshipStatus,
    ) -> Result<FriendshipEntity, error::SystemError> {
        if !friendship.status.can_become(next) {
            return Err(error::SystemError::conflict(format!(
                "Cannot change a {} friendship to {}",
                friendship.status, next
            )));
        }

        let updated = self
            .friend_repo
            .update_status(&friendship.id, friendship.status, next)
            .await?
            .ok_or_else(|| {
                error::SystemError::conflict("Friendship was changed by another request")
            })?;

        tracing::debug!("Friendship {} moved {} -> {}", updated.id, friendship.status, next);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test::MemoryStore, utils::Pagination};

    type Svc = FriendService<MemoryStore, MemoryStore>;

    fn setup() -> (Arc<MemoryStore>, Svc) {
        let store = Arc::new(MemoryStore::default());
        let notifications = NotificationService::with_dependencies(store.clone());
        let service = FriendService::with_dependencies(store.clone(), store.clone(), notifications);
        (store, service)
    }

    fn ids(friends: &[FriendResponse]) -> Vec<Uuid> {
        friends.iter().map(|f| f.id).collect()
    }

    #[tokio::test]
    async fn duplicate_request_conflicts_in_both_directions() {
        let (store, service) = setup();
        let (a, b) = (store.seed_user("ana"), store.seed_user("bia"));

        let request = service.send_friend_request(a, b).await.unwrap();
        assert_eq!(request.status, FriendshipStatus::Pending);
        assert_eq!((request.user_id, request.friend_id), (a, b));

        let err = service.send_friend_request(a, b).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Conflict(_)));
        let err = service.send_friend_request(b, a).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Conflict(_)));
    }

    #[tokio::test]
    async fn self_and_unknown_targets_are_rejected() {
        let (store, service) = setup();
        let a = store.seed_user("ana");

        let err = service.send_friend_request(a, a).await.unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));

        let ghost = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let err = service.send_friend_request(a, ghost).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    #[tokio::test]
    async fn storage_uniqueness_catches_a_lost_race() {
        let (store, service) = setup();
        let (a, b) = (store.seed_user("ana"), store.seed_user("bia"));

        // Simulates the reverse request committing between the check and the insert.
        store.hide_friendships_from_lookup(true);
        service.send_friend_request(b, a).await.unwrap();
        let err = service.send_friend_request(a, b).await.unwrap_err();

        assert!(matches!(err, error::SystemError::Conflict(_)));
    }

    #[tokio::test]
    async fn only_recipient_accepts() {
        let (store, service) = setup();
        let (a, b, c) = (store.seed_user("ana"), store.seed_user("bia"), store.seed_user("caio"));
        let request = service.send_friend_request(a, b).await.unwrap();

        let err = service.accept_friend_request(a, request.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));
        let err = service.accept_friend_request(c, request.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));

        let accepted = service.accept_friend_request(b, request.id).await.unwrap();
        assert_eq!(accepted.status, FriendshipStatus::Accepted);

        let err = service.accept_friend_request(b, request.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Conflict(_)));
    }

    #[tokio::test]
    async fn accepted_friendship_is_visible_from_both_sides() {
        let (store, service) = setup();
        let (a, b, c) = (store.seed_user("ana"), store.seed_user("bia"), store.seed_user("caio"));

        let request = service.send_friend_request(a, b).await.unwrap();
        assert!(service.get_friends(a).await.unwrap().is_empty());

        service.accept_friend_request(b, request.id).await.unwrap();
        service.send_friend_request(c, a).await.unwrap();

        assert_eq!(ids(&service.get_friends(a).await.unwrap()), vec![b]);
        assert_eq!(ids(&service.get_friends(b).await.unwrap()), vec![a]);
        assert!(service.get_friends(c).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reject_deletes_and_allows_a_new_request() {
        let (store, service) = setup();
        let (a, b) = (store.seed_user("ana"), store.seed_user("bia"));
        let request = service.send_friend_request(a, b).await.unwrap();

        let err = service.reject_friend_request(a, request.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));

        service.reject_friend_request(b, request.id).await.unwrap();
        let err = service.get_friendship(a, request.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));

        service.send_friend_request(a, b).await.unwrap();
    }

    #[tokio::test]
    async fn reject_only_applies_to_pending_requests() {
        let (store, service) = setup();
        let (a, b) = (store.seed_user("ana"), store.seed_user("bia"));
        let request = service.send_friend_request(a, b).await.unwrap();
        service.accept_friend_request(b, request.id).await.unwrap();

        let err = service.reject_friend_request(b, request.id).await.unwrap_err();
        assert!(matches!(
            &err,
            error::SystemError::Conflict(msg)
                if msg == "Cannot reject a friendship that is accepted"
        ));
    }

    #[tokio::test]
    async fn either_party_blocks_and_block_is_final() {
        let (store, service) = setup();
        let (a, b, c) = (store.seed_user("ana"), store.seed_user("bia"), store.seed_user("caio"));
        let request = service.send_friend_request(a, b).await.unwrap();

        let err = service.block(c, request.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));

        let blocked = service.block(a, request.id).await.unwrap();
        assert_eq!(blocked.status, FriendshipStatus::Blocked);

        let err = service.block(b, request.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Conflict(_)));
        let err = service.accept_friend_request(b, request.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Conflict(_)));

        // The blocked pair still occupies the slot.
        let err = service.send_friend_request(b, a).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Conflict(_)));
    }

    #[tokio::test]
    async fn unlink_removes_any_status() {
        let (store, service) = setup();
        let (a, b, c) = (store.seed_user("ana"), store.seed_user("bia"), store.seed_user("caio"));
        let request = service.send_friend_request(a, b).await.unwrap();
        service.accept_friend_request(b, request.id).await.unwrap();
        service.block(b, request.id).await.unwrap();

        let err = service.unlink(c, request.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));

        service.unlink(a, request.id).await.unwrap();
        let err = service.unlink(a, request.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    #[tokio::test]
    async fn pending_lists_split_by_direction() {
        let (store, service) = setup();
        let (a, b, c) = (store.seed_user("ana"), store.seed_user("bia"), store.seed_user("caio"));
        let to_b = service.send_friend_request(a, b).await.unwrap();
        let from_c = service.send_friend_request(c, a).await.unwrap();

        let outgoing = service.get_outgoing_requests(a).await.unwrap();
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].id, to_b.id);

        let incoming = service.get_incoming_requests(a).await.unwrap();
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].id, from_c.id);
    }

    #[tokio::test]
    async fn request_and_accept_notify_the_other_party() {
        let (store, service) = setup();
        let (a, b) = (store.seed_user("ana"), store.seed_user("bia"));
        let notifications = NotificationService::with_dependencies(store.clone());

        let request = service.send_friend_request(a, b).await.unwrap();
        let to_b = notifications.list(b, &Pagination::default()).await.unwrap();
        assert_eq!(to_b.len(), 1);
        assert_eq!(to_b[0].kind, notification_type::FRIEND_REQUEST);

        service.accept_friend_request(b, request.id).await.unwrap();
        let to_a = notifications.list(a, &Pagination::default()).await.unwrap();
        assert_eq!(to_a.len(), 1);
        assert_eq!(to_a[0].kind, notification_type::FRIEND_ACCEPTED);
    }

    #[tokio::test]
    async fn failed_notification_does_not_fail_request() {
        let (store, service) = setup();
        let (a, b) = (store.seed_user("ana"), store.seed_user("bia"));

        store.fail_notifications(true);
        let request = service.send_friend_request(a, b).await.unwrap();

        assert_eq!(service.get_friendship(b, request.id).await.unwrap().id, request.id);
    }
}
