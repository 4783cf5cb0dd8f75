use actix_web::{web, Scope};

use crate::error::ApiError;

pub mod auth;
pub mod comments;
pub mod messages;
pub mod rooms;
pub mod users;

pub fn create_auth_scope() -> Scope {
    web::scope("/auth")
        .service(auth::sign_up)
        .service(auth::sign_in)
        .service(auth::get_current_user)
        .service(auth::log_out)
}

pub fn create_room_scope() -> Scope {
    web::scope("/rooms")
        .service(rooms::get_rooms)
        .service(rooms::create_room)
        .service(rooms::get_room)
}

pub fn create_message_scope() -> Scope {
    web::scope("/messages")
        .service(messages::get_messages)
        .service(messages::create_message)
        .service(messages::get_message)
        .service(messages::put_message)
        .service(messages::patch_message)
}

pub fn create_comment_scope() -> Scope {
    web::scope("/comments")
        .service(comments::get_comments)
        .service(comments::create_comment)
        .service(comments::get_comment)
}

/// Registers the whole `/api` tree together with the extractor configs that
/// turn malformed bodies and query strings into validation errors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req| ApiError::from(err).into()),
    )
    .app_data(web::QueryConfig::default().error_handler(|err, _req| ApiError::from(err).into()))
    .service(
        web::scope("/api")
            .service(create_auth_scope())
            .service(create_room_scope())
            .service(create_message_scope())
            .service(create_comment_scope())
            .service(users::get_user_by_id),
    );
}
