use crate::schema::*;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

// db models
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Identifiable, Insertable,
)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub created_at: String,
    pub last_message: Option<String>,
}

#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Selectable, Queryable, Identifiable, Insertable,
)]
#[diesel(table_name = rooms)]
pub struct Room {
    pub id: String,
    pub name: String,
    #[serde(rename = "created")]
    pub created_at: String,
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Queryable,
    Identifiable,
    Associations,
    Insertable,
    Selectable,
)]
#[diesel(belongs_to(Room))]
#[diesel(table_name = messages)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub room_id: String,
    pub author_id: Option<String>,
    pub created_at: String,
}

#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Identifiable, Insertable, Selectable,
)]
#[diesel(table_name = comments)]
pub struct Comment {
    pub id: String,
    pub text: String,
    #[serde(rename = "message")]
    pub message_id: Option<String>,
    #[serde(rename = "created")]
    pub created_at: String,
}

// business models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub sign_in: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoom {
    #[serde(default)]
    pub name: String,
}

/// Inline comment as it appears inside a message create payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInlineComment {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub comments: Vec<NewInlineComment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Fields of a message a client may change after creation.
///
/// `comments` is accepted so clients can send back a full representation,
/// but it is never applied. Anything else (author, room, created, id) is
/// rejected when the update body is parsed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessagePatch {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub comments: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub text: String,
    pub room: String,
    pub author: Option<String>,
    pub created: String,
    pub comments: Vec<Comment>,
}

impl MessageResponse {
    pub fn new(message: Message, comments: Vec<Comment>) -> Self {
        Self {
            id: message.id,
            text: message.text,
            room: message.room_id,
            author: message.author_id,
            created: message.created_at,
            comments,
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}
