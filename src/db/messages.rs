use std::collections::HashMap;

use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    models::{Comment, Message},
    schema::{comments, messages},
};

use super::{users, DbError};

/// Inserts a message together with its inline comments.
///
/// When the message has an author, that user's `last_message` is set to the
/// message's creation time within the same transaction.
pub fn create_message(
    conn: &mut SqliteConnection,
    text: String,
    room_id: String,
    author_id: Option<String>,
    comment_texts: Vec<String>,
    created_at: String,
) -> Result<(Message, Vec<Comment>), DbError> {
    conn.transaction::<_, DbError, _>(|conn| {
        let author_id = match author_id {
            Some(author) => {
                if users::touch_last_message(conn, &author, &created_at)? {
                    Some(author)
                } else {
                    log::warn!("session user {author} no longer exists; posting anonymously");
                    None
                }
            }
            None => None,
        };

        let new_message = Message {
            id: Uuid::new_v4().to_string(),
            text,
            room_id,
            author_id,
            created_at: created_at.clone(),
        };

        diesel::insert_into(messages::table)
            .values(&new_message)
            .execute(conn)?;

        let new_comments = comment_texts
            .into_iter()
            .map(|text| Comment {
                id: Uuid::new_v4().to_string(),
                text,
                message_id: Some(new_message.id.clone()),
                created_at: created_at.clone(),
            })
            .collect::<Vec<_>>();

        if !new_comments.is_empty() {
            diesel::insert_into(comments::table)
                .values(&new_comments)
                .execute(conn)?;
        }

        Ok((new_message, new_comments))
    })
}

pub fn find_message(
    conn: &mut SqliteConnection,
    message_id: &str,
) -> Result<Option<Message>, DbError> {
    let message = messages::table
        .find(message_id)
        .first::<Message>(conn)
        .optional()?;

    Ok(message)
}

/// Replaces the text of a message. No other column is ever written.
pub fn update_message_text(
    conn: &mut SqliteConnection,
    message_id: &str,
    new_text: &str,
) -> Result<Message, DbError> {
    let message = diesel::update(messages::table.find(message_id))
        .set(messages::text.eq(new_text))
        .get_result::<Message>(conn)?;

    Ok(message)
}

pub fn count_messages(conn: &mut SqliteConnection, room: Option<&str>) -> Result<i64, DbError> {
    let count = match room {
        Some(room) => messages::table
            .filter(messages::room_id.eq(room))
            .count()
            .get_result(conn)?,
        None => messages::table.count().get_result(conn)?,
    };

    Ok(count)
}

/// Messages in default order: oldest first, ties broken by id.
pub fn list_messages(
    conn: &mut SqliteConnection,
    room: Option<&str>,
    offset: i64,
    limit: i64,
) -> Result<Vec<Message>, DbError> {
    let mut query = messages::table
        .order((messages::created_at.asc(), messages::id.asc()))
        .offset(offset)
        .limit(limit)
        .into_boxed();

    if let Some(room) = room {
        query = query.filter(messages::room_id.eq(room.to_string()));
    }

    Ok(query.load::<Message>(conn)?)
}

/// Comments of the given messages, keyed by message id.
pub fn comments_by_message(
    conn: &mut SqliteConnection,
    message_ids: &[String],
) -> Result<HashMap<String, Vec<Comment>>, DbError> {
    let rows: Vec<Comment> = comments::table
        .filter(comments::message_id.eq_any(message_ids.to_vec()))
        .order((comments::created_at.asc(), comments::id.asc()))
        .load(conn)?;

    let mut grouped: HashMap<String, Vec<Comment>> = HashMap::new();
    for comment in rows {
        if let Some(message_id) = comment.message_id.clone() {
            grouped.entry(message_id).or_default().push(comment);
        }
    }

    Ok(grouped)
}
