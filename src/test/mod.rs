//! In-memory stand-in for the Postgres repositories, plus seeding helpers for
//! the `#[sqlx::test]` cases that exercise the real ones.
//!
//! Every table is a `Vec` behind a mutex, so each call is atomic the same way a
//! single SQL statement is. Uniqueness and conditional writes follow the
//! constraints in `migrations/`.

use std::{
    cmp::Ordering,
    sync::{
        atomic::{self, AtomicBool},
        Mutex,
    },
};

use chrono::Utc;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        event::{
            model::{CreateEventModel, EventFilter, EventSortField, UpdateEventModel},
            repository::{AttendeeRepository, EventRepository},
            schema::{EventAttendeeEntity, EventEntity, RsvpStatus},
        },
        friend::{
            model::{FriendResponse, FriendUserRow},
            repository::FriendshipRepository,
            schema::{FriendshipEntity, FriendshipStatus},
        },
        group::{
            model::{CreateGroupModel, GroupListQuery, GroupSortField, UpdateGroupModel},
            repository::{GroupRepository, MemberRepository},
            schema::{GroupEntity, GroupMemberEntity, GroupRole},
        },
        message::{model::InsertMessage, repository::MessageRepository, schema::MessageEntity},
        notification::{
            model::NewNotification, repository::NotificationRepository,
            schema::NotificationEntity,
        },
        user::{
            model::{InsertUser, UpdateUserModel, UserListQuery, UserSortField},
            repository::UserRepository,
            repository_pg::UserRepositoryPg,
            schema::UserEntity,
        },
    },
    utils::SortOrder,
};

/// Inserts a user through the SQL repository, for `#[sqlx::test]` cases.
pub async fn insert_user(pool: &sqlx::PgPool, name: &str) -> Uuid {
    let user = InsertUser {
        email: format!("{name}@example.com"),
        name: name.to_string(),
        hash_password: String::new(),
        avatar_url: None,
        bio: None,
        location: None,
    };
    UserRepositoryPg::new(pool.clone()).create(&user).await.unwrap()
}

fn new_id() -> Uuid {
    Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))
}

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<UserEntity>>,
    friendships: Mutex<Vec<FriendshipEntity>>,
    groups: Mutex<Vec<GroupEntity>>,
    members: Mutex<Vec<GroupMemberEntity>>,
    events: Mutex<Vec<EventEntity>>,
    attendees: Mutex<Vec<EventAttendeeEntity>>,
    messages: Mutex<Vec<MessageEntity>>,
    notifications: Mutex<Vec<NotificationEntity>>,
    hide_friendships: AtomicBool,
    fail_notifications: AtomicBool,
}

impl MemoryStore {
    pub fn seed_user(&self, name: &str) -> Uuid {
        let now = Utc::now();
        let user = UserEntity {
            id: new_id(),
            email: format!("{name}@example.com"),
            name: name.to_string(),
            hash_password: String::new(),
            avatar_url: None,
            bio: None,
            location: None,
            created_at: now,
            updated_at: now,
        };
        let id = user.id;
        self.users.lock().unwrap().push(user);
        id
    }

    /// Makes `find_between` miss, as if a concurrent insert had not committed yet.
    pub fn hide_friendships_from_lookup(&self, hide: bool) {
        self.hide_friendships.store(hide, atomic::Ordering::SeqCst);
    }

    pub fn fail_notifications(&self, fail: bool) {
        self.fail_notifications.store(fail, atomic::Ordering::SeqCst);
    }

    fn user(&self, id: &Uuid) -> Option<UserEntity> {
        self.users.lock().unwrap().iter().find(|u| &u.id == id).cloned()
    }

    fn pending_rows<F>(&self, keep: F) -> Vec<FriendUserRow>
    where
        F: Fn(&FriendshipEntity) -> Option<Uuid>,
    {
        let friendships = self.friendships.lock().unwrap();
        friendships
            .iter()
            .rev()
            .filter(|f| f.status == FriendshipStatus::Pending)
            .filter_map(|f| {
                let other = self.user(&keep(f)?)?;
                Some(FriendUserRow {
                    req_id: f.id,
                    user_id: other.id,
                    name: other.name,
                    avatar_url: other.avatar_url,
                    created_at: f.created_at,
                })
            })
            .collect()
    }
}

fn page<T>(rows: impl Iterator<Item = T>, skip: i64, limit: i64) -> Vec<T> {
    rows.skip(skip as usize).take(limit as usize).collect()
}

/// Stable ascending sort, reversed for `Desc`, so ties come out newest first.
fn ordered<T>(mut rows: Vec<T>, order: SortOrder, cmp: impl FnMut(&T, &T) -> Ordering) -> Vec<T> {
    rows.sort_by(cmp);
    if order == SortOrder::Desc {
        rows.reverse();
    }
    rows
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait::async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn exists(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        Ok(self.user(id).is_some())
    }

    async fn list(
        &self,
        query: &UserListQuery,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let is_match = |u: &UserEntity| {
            query.search().map_or(true, |term| {
                contains_ignore_case(&u.name, term) || contains_ignore_case(&u.email, term)
            })
        };
        let users: Vec<UserEntity> =
            self.users.lock().unwrap().iter().filter(|u| is_match(u)).cloned().collect();

        let users = ordered(users, query.sort_order, |a, b| match query.sort_by {
            UserSortField::Name => a.name.cmp(&b.name),
            UserSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        });
        Ok(page(users.into_iter(), skip, limit))
    }

    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(error::SystemError::conflict("Email already exists"));
        }

        let now = Utc::now();
        let id = new_id();
        users.push(UserEntity {
            id,
            email: user.email.clone(),
            name: user.name.clone(),
            hash_password: user.hash_password.clone(),
            avatar_url: user.avatar_url.clone(),
            bio: user.bio.clone(),
            location: user.location.clone(),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn update(
        &self,
        id: &Uuid,
        changes: &UpdateUserModel,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| &u.id == id) else {
            return Ok(None);
        };

        if let Some(name) = &changes.name {
            user.name = name.clone();
        }
        if let Some(avatar_url) = &changes.avatar_url {
            user.avatar_url = avatar_url.clone();
        }
        if let Some(bio) = &changes.bio {
            user.bio = bio.clone();
        }
        if let Some(location) = &changes.location {
            user.location = location.clone();
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<FriendshipEntity>, error::SystemError> {
        Ok(self.friendships.lock().unwrap().iter().find(|f| &f.id == id).cloned())
    }

    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        if self.hide_friendships.load(atomic::Ordering::SeqCst) {
            return Ok(None);
        }

        let friendships = self.friendships.lock().unwrap();
        Ok(friendships
            .iter()
            .find(|f| {
                (&f.user_id == user_id_a && &f.friend_id == user_id_b)
                    || (&f.user_id == user_id_b && &f.friend_id == user_id_a)
            })
            .cloned())
    }

    async fn create_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let mut friendships = self.friendships.lock().unwrap();
        let taken = friendships.iter().any(|f| {
            (&f.user_id == sender_id && &f.friend_id == receiver_id)
                || (&f.user_id == receiver_id && &f.friend_id == sender_id)
        });
        if taken {
            return Ok(None);
        }

        let now = Utc::now();
        let friendship = FriendshipEntity {
            id: new_id(),
            user_id: *sender_id,
            friend_id: *receiver_id,
            status: FriendshipStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        friendships.push(friendship.clone());
        Ok(Some(friendship))
    }

    async fn update_status(
        &self,
        id: &Uuid,
        expected: FriendshipStatus,
        next: FriendshipStatus,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let mut friendships = self.friendships.lock().unwrap();
        match friendships.iter_mut().find(|f| &f.id == id && f.status == expected) {
            Some(friendship) => {
                friendship.status = next;
                friendship.updated_at = Utc::now();
                Ok(Some(friendship.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(
        &self,
        id: &Uuid,
        expected: Option<FriendshipStatus>,
    ) -> Result<bool, error::SystemError> {
        let mut friendships = self.friendships.lock().unwrap();
        let before = friendships.len();
        friendships.retain(|f| !(&f.id == id && expected.map_or(true, |s| f.status == s)));
        Ok(friendships.len() < before)
    }

    async fn find_friends(&self, user_id: &Uuid) -> Result<Vec<FriendResponse>, error::SystemError> {
        let friendships = self.friendships.lock().unwrap();
        Ok(friendships
            .iter()
            .filter(|f| f.status == FriendshipStatus::Accepted)
            .filter(|f| &f.user_id == user_id || &f.friend_id == user_id)
            .filter_map(|f| {
                let other = if &f.user_id == user_id { f.friend_id } else { f.user_id };
                self.user(&other)
            })
            .map(|u| FriendResponse { id: u.id, name: u.name, avatar_url: u.avatar_url })
            .collect())
    }

    async fn find_requests_to_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendUserRow>, error::SystemError> {
        Ok(self.pending_rows(|f| (&f.friend_id == user_id).then_some(f.user_id)))
    }

    async fn find_requests_from_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendUserRow>, error::SystemError> {
        Ok(self.pending_rows(|f| (&f.user_id == user_id).then_some(f.friend_id)))
    }
}

#[async_trait::async_trait]
impl GroupRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<GroupEntity>, error::SystemError> {
        Ok(self.groups.lock().unwrap().iter().find(|g| &g.id == id).cloned())
    }

    async fn list(
        &self,
        query: &GroupListQuery,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<GroupEntity>, error::SystemError> {
        let groups: Vec<GroupEntity> = self
            .groups
            .lock()
            .unwrap()
            .iter()
            .filter(|g| query.search().map_or(true, |term| contains_ignore_case(&g.name, term)))
            .cloned()
            .collect();

        let groups = ordered(groups, query.sort_order, |a, b| match query.sort_by {
            GroupSortField::Name => a.name.cmp(&b.name),
            GroupSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        });
        Ok(page(groups.into_iter(), skip, limit))
    }

    async fn create(
        &self,
        created_by: &Uuid,
        group: &CreateGroupModel,
    ) -> Result<GroupEntity, error::SystemError> {
        let mut groups = self.groups.lock().unwrap();
        if groups.iter().any(|g| g.name == group.name) {
            return Err(error::SystemError::conflict("Name already exists"));
        }

        let now = Utc::now();
        let group = GroupEntity {
            id: new_id(),
            name: group.name.clone(),
            description: group.description.clone(),
            is_public: group.is_public.unwrap_or(true),
            max_members: group.max_members,
            created_by: *created_by,
            created_at: now,
            updated_at: now,
        };
        groups.push(group.clone());
        Ok(group)
    }

    async fn update(
        &self,
        id: &Uuid,
        changes: &UpdateGroupModel,
    ) -> Result<Option<GroupEntity>, error::SystemError> {
        let mut groups = self.groups.lock().unwrap();
        if let Some(name) = &changes.name {
            if groups.iter().any(|g| &g.id != id && &g.name == name) {
                return Err(error::SystemError::conflict("Name already exists"));
            }
        }

        let Some(group) = groups.iter_mut().find(|g| &g.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            group.name = name.clone();
        }
        if let Some(description) = &changes.description {
            group.description = description.clone();
        }
        if let Some(is_public) = changes.is_public {
            group.is_public = is_public;
        }
        if let Some(max_members) = changes.max_members {
            group.max_members = max_members;
        }
        group.updated_at = Utc::now();

        Ok(Some(group.clone()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let mut groups = self.groups.lock().unwrap();
        let before = groups.len();
        groups.retain(|g| &g.id != id);
        if groups.len() == before {
            return Ok(false);
        }

        self.members.lock().unwrap().retain(|m| &m.group_id != id);
        Ok(true)
    }
}

#[async_trait::async_trait]
impl MemberRepository for MemoryStore {
    async fn find_members(
        &self,
        group_id: &Uuid,
    ) -> Result<Vec<GroupMemberEntity>, error::SystemError> {
        let members = self.members.lock().unwrap();
        Ok(members.iter().filter(|m| &m.group_id == group_id).cloned().collect())
    }

    async fn insert_member(
        &self,
        group_id: &Uuid,
        user_id: &Uuid,
        role: GroupRole,
    ) -> Result<Option<GroupMemberEntity>, error::SystemError> {
        let mut members = self.members.lock().unwrap();
        if members.iter().any(|m| &m.group_id == group_id && &m.user_id == user_id) {
            return Ok(None);
        }

        let member = GroupMemberEntity {
            id: new_id(),
            group_id: *group_id,
            user_id: *user_id,
            role,
            joined_at: Utc::now(),
        };
        members.push(member.clone());
        Ok(Some(member))
    }

    async fn update_role(
        &self,
        group_id: &Uuid,
        user_id: &Uuid,
        role: GroupRole,
    ) -> Result<Option<GroupMemberEntity>, error::SystemError> {
        let mut members = self.members.lock().unwrap();
        match members.iter_mut().find(|m| &m.group_id == group_id && &m.user_id == user_id) {
            Some(member) => {
                member.role = role;
                Ok(Some(member.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_member(
        &self,
        group_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| !(&m.group_id == group_id && &m.user_id == user_id));
        Ok(members.len() < before)
    }
}

#[async_trait::async_trait]
impl EventRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<EventEntity>, error::SystemError> {
        Ok(self.events.lock().unwrap().iter().find(|e| &e.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &EventFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<EventEntity>, error::SystemError> {
        let events: Vec<EventEntity> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.group_id.map_or(true, |g| e.group_id == Some(g)))
            .filter(|e| filter.start_from.map_or(true, |from| e.start_time >= from))
            .filter(|e| filter.end_until.map_or(true, |until| e.start_time <= until))
            .cloned()
            .collect();

        let events = ordered(events, filter.sort_order, |a, b| match filter.sort_by {
            EventSortField::StartTime => a.start_time.cmp(&b.start_time),
            EventSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        });
        Ok(page(events.into_iter(), skip, limit))
    }

    async fn create(
        &self,
        created_by: &Uuid,
        event: &CreateEventModel,
    ) -> Result<EventEntity, error::SystemError> {
        let now = Utc::now();
        let event = EventEntity {
            id: new_id(),
            title: event.title.clone(),
            description: event.description.clone(),
            group_id: event.group_id,
            created_by: *created_by,
            start_time: event.start_time,
            end_time: event.end_time,
            max_attendees: event.max_attendees,
            is_public: event.is_public.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn update(
        &self,
        id: &Uuid,
        changes: &UpdateEventModel,
    ) -> Result<Option<EventEntity>, error::SystemError> {
        let mut events = self.events.lock().unwrap();
        let Some(event) = events.iter_mut().find(|e| &e.id == id) else {
            return Ok(None);
        };

        if let Some(title) = &changes.title {
            event.title = title.clone();
        }
        if let Some(description) = &changes.description {
            event.description = description.clone();
        }
        if let Some(group_id) = changes.group_id {
            event.group_id = group_id;
        }
        if let Some(start_time) = changes.start_time {
            event.start_time = start_time;
        }
        if let Some(end_time) = changes.end_time {
            event.end_time = end_time;
        }
        if let Some(max_attendees) = changes.max_attendees {
            event.max_attendees = max_attendees;
        }
        if let Some(is_public) = changes.is_public {
            event.is_public = is_public;
        }
        event.updated_at = Utc::now();
        Ok(Some(event.clone()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| &e.id != id);
        if events.len() == before {
            return Ok(false);
        }

        self.attendees.lock().unwrap().retain(|a| &a.event_id != id);
        Ok(true)
    }
}

#[async_trait::async_trait]
impl AttendeeRepository for MemoryStore {
    async fn find_attendees(
        &self,
        event_id: &Uuid,
    ) -> Result<Vec<EventAttendeeEntity>, error::SystemError> {
        let attendees = self.attendees.lock().unwrap();
        Ok(attendees.iter().filter(|a| &a.event_id == event_id).cloned().collect())
    }

    async fn insert_attendee(
        &self,
        event_id: &Uuid,
        user_id: &Uuid,
        status: RsvpStatus,
    ) -> Result<Option<EventAttendeeEntity>, error::SystemError> {
        let mut attendees = self.attendees.lock().unwrap();
        if attendees.iter().any(|a| &a.event_id == event_id && &a.user_id == user_id) {
            return Ok(None);
        }

        let attendee = EventAttendeeEntity {
            id: new_id(),
            event_id: *event_id,
            user_id: *user_id,
            status,
            joined_at: Utc::now(),
        };
        attendees.push(attendee.clone());
        Ok(Some(attendee))
    }

    async fn update_status(
        &self,
        event_id: &Uuid,
        user_id: &Uuid,
        status: RsvpStatus,
    ) -> Result<Option<EventAttendeeEntity>, error::SystemError> {
        let mut attendees = self.attendees.lock().unwrap();
        match attendees.iter_mut().find(|a| &a.event_id == event_id && &a.user_id == user_id) {
            Some(attendee) => {
                attendee.status = status;
                Ok(Some(attendee.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_attendee(
        &self,
        event_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let mut attendees = self.attendees.lock().unwrap();
        let before = attendees.len();
        attendees.retain(|a| !(&a.event_id == event_id && &a.user_id == user_id));
        Ok(attendees.len() < before)
    }
}

#[async_trait::async_trait]
impl MessageRepository for MemoryStore {
    async fn create(&self, message: &InsertMessage) -> Result<MessageEntity, error::SystemError> {
        let message = MessageEntity {
            id: new_id(),
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content.clone(),
            is_read: false,
            created_at: Utc::now(),
        };
        self.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MessageEntity>, error::SystemError> {
        Ok(self.messages.lock().unwrap().iter().find(|m| &m.id == id).cloned())
    }

    async fn find_between(
        &self,
        user_id: &Uuid,
        other_id: &Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        let messages = self.messages.lock().unwrap();
        let rows = messages
            .iter()
            .rev()
            .filter(|m| {
                (&m.sender_id == user_id && &m.receiver_id == other_id)
                    || (&m.sender_id == other_id && &m.receiver_id == user_id)
            })
            .cloned();
        Ok(page(rows, skip, limit))
    }

    async fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<MessageEntity>, error::SystemError> {
        let messages = self.messages.lock().unwrap();
        Ok(messages
            .iter()
            .rev()
            .filter(|m| &m.sender_id == user_id || &m.receiver_id == user_id)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: &Uuid) -> Result<Option<MessageEntity>, error::SystemError> {
        let mut messages = self.messages.lock().unwrap();
        match messages.iter_mut().find(|m| &m.id == id) {
            Some(message) => {
                message.is_read = true;
                Ok(Some(message.clone()))
            }
            None => Ok(None),
        }
    }

    async fn mark_thread_read(
        &self,
        receiver_id: &Uuid,
        sender_id: &Uuid,
    ) -> Result<u64, error::SystemError> {
        let mut messages = self.messages.lock().unwrap();
        let mut updated = 0;
        for message in messages
            .iter_mut()
            .filter(|m| &m.receiver_id == receiver_id && &m.sender_id == sender_id && !m.is_read)
        {
            message.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }
}

#[async_trait::async_trait]
impl NotificationRepository for MemoryStore {
    async fn create(
        &self,
        notification: &NewNotification,
    ) -> Result<NotificationEntity, error::SystemError> {
        if self.fail_notifications.load(atomic::Ordering::SeqCst) {
            return Err(error::SystemError::DatabaseError("notifications unavailable".into()));
        }

        let notification = NotificationEntity {
            id: new_id(),
            user_id: notification.user_id,
            kind: notification.kind.to_string(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            data: notification.data.clone(),
            is_read: false,
            created_at: Utc::now(),
        };
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(notification)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<NotificationEntity>, error::SystemError> {
        Ok(self.notifications.lock().unwrap().iter().find(|n| &n.id == id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: &Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<NotificationEntity>, error::SystemError> {
        let notifications = self.notifications.lock().unwrap();
        let rows = notifications.iter().rev().filter(|n| &n.user_id == user_id).cloned();
        Ok(page(rows, skip, limit))
    }

    async fn mark_read(&self, id: &Uuid) -> Result<Option<NotificationEntity>, error::SystemError> {
        let mut notifications = self.notifications.lock().unwrap();
        match notifications.iter_mut().find(|n| &n.id == id) {
            Some(notification) => {
                notification.is_read = true;
                Ok(Some(notification.clone()))
            }
            None => Ok(None),
        }
    }

    async fn mark_all_read(&self, user_id: &Uuid) -> Result<u64, error::SystemError> {
        let mut notifications = self.notifications.lock().unwrap();
        let mut updated = 0;
        for notification in notifications.iter_mut().filter(|n| &n.user_id == user_id && !n.is_read) {
            notification.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let mut notifications = self.notifications.lock().unwrap();
        let before = notifications.len();
        notifications.retain(|n| &n.id != id);
        Ok(notifications.len() < before)
    }
}
