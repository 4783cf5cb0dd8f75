pub mod comments;
pub mod messages;
pub mod rooms;
pub mod users;
