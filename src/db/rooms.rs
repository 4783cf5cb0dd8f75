use diesel::prelude::*;
use uuid::Uuid;

use crate::{models::Room, schema::rooms};

use super::{iso_date, DbError};

pub fn create_room(conn: &mut SqliteConnection, room_name: &str) -> Result<Room, DbError> {
    let new_room = Room {
        id: Uuid::new_v4().to_string(),
        name: room_name.to_string(),
        created_at: iso_date(),
    };

    diesel::insert_into(rooms::table)
        .values(&new_room)
        .execute(conn)?;

    Ok(new_room)
}

pub fn find_room(conn: &mut SqliteConnection, room_id: &str) -> Result<Option<Room>, DbError> {
    let room = rooms::table
        .find(room_id)
        .first::<Room>(conn)
        .optional()?;

    Ok(room)
}

pub fn count_rooms(conn: &mut SqliteConnection) -> Result<i64, DbError> {
    Ok(rooms::table.count().get_result(conn)?)
}

pub fn list_rooms(
    conn: &mut SqliteConnection,
    offset: i64,
    limit: i64,
) -> Result<Vec<Room>, DbError> {
    let rooms = rooms::table
        .order((rooms::created_at.asc(), rooms::id.asc()))
        .offset(offset)
        .limit(limit)
        .load::<Room>(conn)?;

    Ok(rooms)
}
