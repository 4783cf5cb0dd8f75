use crate::{db::iso_date, models::User};
use bcrypt::{hash, DEFAULT_COST};
use diesel::prelude::*;
use uuid::Uuid;

use super::DbError;

pub fn find_user_by_uid(conn: &mut SqliteConnection, uid: Uuid) -> Result<Option<User>, DbError> {
    use crate::schema::users::dsl::*;

    let user = users
        .filter(id.eq(uid.to_string()))
        .first::<User>(conn)
        .optional()?;
    Ok(user)
}

pub fn find_user_by_username(
    conn: &mut SqliteConnection,
    un: String,
) -> Result<Option<User>, DbError> {
    use crate::schema::users::dsl::*;
    let user = users
        .filter(username.eq(un))
        .first::<User>(conn)
        .optional()?;

    Ok(user)
}

pub fn insert_new_user(conn: &mut SqliteConnection, un: &str, pw: &str) -> Result<User, DbError> {
    insert_user_with_cost(conn, un, pw, DEFAULT_COST)
}

/// Like [`insert_new_user`] with an explicit bcrypt cost.
pub fn insert_user_with_cost(
    conn: &mut SqliteConnection,
    un: &str,
    pw: &str,
    cost: u32,
) -> Result<User, DbError> {
    use crate::schema::users::dsl::*;

    let hashed_password = hash(pw, cost)?;

    let new_user = User {
        id: Uuid::new_v4().to_string(),
        username: un.to_owned(),
        password: hashed_password,
        created_at: iso_date(),
        last_message: None,
    };
    diesel::insert_into(users).values(&new_user).execute(conn)?;

    Ok(new_user)
}

/// Records that `uid` just posted a message. Returns whether the user exists.
pub fn touch_last_message(
    conn: &mut SqliteConnection,
    uid: &str,
    at: &str,
) -> Result<bool, DbError> {
    use crate::schema::users::dsl::*;

    let updated = diesel::update(users.filter(id.eq(uid)))
        .set(last_message.eq(Some(at)))
        .execute(conn)?;

    Ok(updated == 1)
}
