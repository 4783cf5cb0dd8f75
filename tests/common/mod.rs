#![allow(dead_code)]

use actix_web::{cookie::Cookie, dev::ServiceResponse, test::TestRequest};
use chat_room::{
    db::{self, format_timestamp},
    models::{Message, Room, User},
    schema::messages,
    types::DbPool,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::json;
use uuid::Uuid;

pub const PASSWORD: &str = "password";

// Minimum bcrypt cost keeps fixture users cheap to create and sign in.
const TEST_HASH_COST: u32 = 4;

/// Builds the full application around `$pool`, the way `main` does.
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .wrap(chat_room::middlewares::auth::Authentication)
                .wrap(chat_room::app::session_middleware(
                    actix_web::cookie::Key::from(&[0; 64]),
                    12,
                ))
                .configure(chat_room::routes::configure)
                .wrap(actix_web::middleware::NormalizePath::trim()),
        )
        .await
    };
}
pub(crate) use test_app;

pub fn pool() -> DbPool {
    let pool = db::build_memory_pool().unwrap();
    let mut conn = pool.get().unwrap();
    db::run_migrations(&mut conn).unwrap();
    drop(conn);
    pool
}

pub fn create_user(pool: &DbPool, username: &str) -> User {
    let mut conn = pool.get().unwrap();
    db::users::insert_user_with_cost(&mut conn, username, PASSWORD, TEST_HASH_COST).unwrap()
}

pub fn create_room(pool: &DbPool, name: &str) -> Room {
    let mut conn = pool.get().unwrap();
    db::rooms::create_room(&mut conn, name).unwrap()
}

/// Inserts a message directly, with full control over author and age.
pub fn message_factory(
    pool: &DbPool,
    text: &str,
    author: Option<&User>,
    created: DateTime<Utc>,
) -> Message {
    let room = create_room(pool, "factory_room");
    let mut conn = pool.get().unwrap();

    let message = Message {
        id: Uuid::new_v4().to_string(),
        text: text.to_string(),
        room_id: room.id,
        author_id: author.map(|user| user.id.clone()),
        created_at: format_timestamp(created),
    };
    diesel::insert_into(messages::table)
        .values(&message)
        .execute(&mut conn)
        .unwrap();

    message
}

pub fn reload_message(pool: &DbPool, id: &str) -> Message {
    let mut conn = pool.get().unwrap();
    db::messages::find_message(&mut conn, id).unwrap().unwrap()
}

pub fn reload_user(pool: &DbPool, id: &str) -> User {
    let mut conn = pool.get().unwrap();
    db::users::find_user_by_uid(&mut conn, Uuid::parse_str(id).unwrap())
        .unwrap()
        .unwrap()
}

pub fn message_count(pool: &DbPool) -> i64 {
    let mut conn = pool.get().unwrap();
    db::messages::count_messages(&mut conn, None).unwrap()
}

pub fn signin_request(username: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(json!({ "username": username, "password": PASSWORD }))
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == "id")
        .expect("signin should set a session cookie")
        .into_owned()
}
