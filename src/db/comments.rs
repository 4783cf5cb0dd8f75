use diesel::prelude::*;
use uuid::Uuid;

use crate::{models::Comment, schema::comments};

use super::{iso_date, DbError};

pub fn create_comment(
    conn: &mut SqliteConnection,
    text: String,
    message_id: Option<String>,
) -> Result<Comment, DbError> {
    let new_comment = Comment {
        id: Uuid::new_v4().to_string(),
        text,
        message_id,
        created_at: iso_date(),
    };

    diesel::insert_into(comments::table)
        .values(&new_comment)
        .execute(conn)?;

    Ok(new_comment)
}

pub fn find_comment(
    conn: &mut SqliteConnection,
    comment_id: &str,
) -> Result<Option<Comment>, DbError> {
    let comment = comments::table
        .find(comment_id)
        .first::<Comment>(conn)
        .optional()?;

    Ok(comment)
}

pub fn count_comments(conn: &mut SqliteConnection, message: Option<&str>) -> Result<i64, DbError> {
    let count = match message {
        Some(message) => comments::table
            .filter(comments::message_id.eq(message))
            .count()
            .get_result(conn)?,
        None => comments::table.count().get_result(conn)?,
    };

    Ok(count)
}

pub fn list_comments(
    conn: &mut SqliteConnection,
    message: Option<&str>,
    offset: i64,
    limit: i64,
) -> Result<Vec<Comment>, DbError> {
    let mut query = comments::table
        .order((comments::created_at.asc(), comments::id.asc()))
        .offset(offset)
        .limit(limit)
        .into_boxed();

    if let Some(message) = message {
        query = query.filter(comments::message_id.eq(message.to_string()));
    }

    Ok(query.load::<Comment>(conn)?)
}
