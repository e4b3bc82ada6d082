use std::{collections::HashMap, sync::Arc};

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{repository::FriendshipRepository, schema::FriendshipStatus},
        message::{
            model::{InsertMessage, MessageThread},
            repository::MessageRepository,
            schema::MessageEntity,
        },
        user::repository::UserRepository,
    },
    policy::{self, Operation},
    utils::Pagination,
};

#[derive(Clone)]
pub struct MessageService {
    message_repo: Arc<dyn MessageRepository + Send + Sync>,
    user_repo: Arc<dyn UserRepository + Send + Sync>,
    friend_repo: Arc<dyn FriendshipRepository>,
}

impl MessageService {
    pub fn with_dependencies(
        message_repo: Arc<dyn MessageRepository + Send + Sync>,
        user_repo: Arc<dyn UserRepository + Send + Sync>,
        friend_repo: Arc<dyn FriendshipRepository>,
    ) -> Self {
        MessageService { message_repo, user_repo, friend_repo }
    }

    pub async fn send_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> Result<MessageEntity, error::SystemError> {
        if sender_id == receiver_id {
            return Err(error::SystemError::bad_request("Cannot send a message to yourself"));
        }

        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(error::SystemError::bad_request("Message content cannot be empty"));
        }

        if !self.user_repo.exists(&receiver_id).await? {
            return Err(error::SystemError::not_found("User not found"));
        }

        if let Some(friendship) = self.friend_repo.find_between(&sender_id, &receiver_id).await? {
            if friendship.status == FriendshipStatus::Blocked {
                return Err(error::SystemError::forbidden("Messaging is blocked between these users"));
            }
        }

        let message = self
            .message_repo
            .create(&InsertMessage { sender_id, receiver_id, content })
            .await?;

        tracing::debug!("Message {} sent from {} to {}", message.id, sender_id, receiver_id);
        Ok(message)
    }

    pub async fn list_conversation(
        &self,
        user_id: Uuid,
        other_id: Uuid,
        page: &Pagination,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        self.message_repo.find_between(&user_id, &other_id, page.skip(), page.limit()).await
    }

    pub async fn list_threads(&self, user_id: Uuid) -> Result<Vec<MessageThread>, error::SystemError> {
        let messages = self.message_repo.find_by_user(&user_id).await?;
        Ok(group_threads(&user_id, messages))
    }

    pub async fn mark_read(
        &self,
        message_id: Uuid,
        actor_id: Uuid,
    ) -> Result<MessageEntity, error::SystemError> {
        let message = self
            .message_repo
            .find_by_id(&message_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Message not found"))?;

        let held = policy::pair_relations(&actor_id, &message.sender_id, &message.receiver_id);
        policy::authorize(Operation::MarkMessageRead, &held)
            .ensure("Only the receiver can mark a message as read")?;

        self.message_repo
            .mark_read(&message_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Message not found"))
    }

    pub async fn mark_thread_read(
        &self,
        user_id: Uuid,
        other_id: Uuid,
    ) -> Result<u64, error::SystemError> {
        self.message_repo.mark_thread_read(&user_id, &other_id).await
    }
}

/// Folds newest-first messages into one thread per counterpart, keeping that order.
fn group_threads(user_id: &Uuid, messages: Vec<MessageEntity>) -> Vec<MessageThread> {
    let mut threads: Vec<MessageThread> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for message in messages {
        let counterpart = message.counterpart(user_id);
        let unread = u64::from(&message.receiver_id == user_id && !message.is_read);

        match index.get(&counterpart) {
            Some(&i) => threads[i].unread_count += unread,
            None => {
                index.insert(counterpart, threads.len());
                threads.push(MessageThread {
                    user_id: counterpart,
                    last_message: message,
                    unread_count: unread,
                });
            }
        }
    }

    threads
}
