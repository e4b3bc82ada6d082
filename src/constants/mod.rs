pub const DEFAULT_PAGE_LIMIT: i64 = 50;
pub const MAX_PAGE_LIMIT: i64 = 100;

pub const DEFAULT_ACCESS_TOKEN_EXPIRATION: u64 = 1800;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub mod notification_type {
    pub const FRIEND_REQUEST: &str = "friend_request";
    pub const FRIEND_ACCEPTED: &str = "friend_accepted";
    pub const GROUP_MEMBER_ADDED: &str = "group_member_added";
}
