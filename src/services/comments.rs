use actix_web::web;
use uuid::Uuid;

use crate::{
    db,
    error::{ApiError, ApiResult},
    models::{Comment, NewComment, Page},
    pagination::{into_page, PageRequest},
    types::{DbPool, FieldErrors},
    utils::{does_not_exist, require_text},
};

/// Creates a comment, optionally attached to an existing message.
///
/// Comments are not subject to the message edit window: attaching one to an
/// old message is allowed.
pub async fn create_comment(pool: web::Data<DbPool>, form: NewComment) -> ApiResult<Comment> {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, "text", &form.text);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    web::block(move || -> ApiResult<Comment> {
        let mut conn = pool.get()?;

        if let Some(message_id) = &form.message {
            if db::messages::find_message(&mut conn, message_id)?.is_none() {
                return Err(ApiError::field("message", does_not_exist(message_id)));
            }
        }

        Ok(db::comments::create_comment(
            &mut conn,
            form.text.trim().to_string(),
            form.message,
        )?)
    })
    .await?
}

pub async fn get_comment(pool: web::Data<DbPool>, comment_id: Uuid) -> ApiResult<Comment> {
    web::block(move || -> ApiResult<Comment> {
        let mut conn = pool.get()?;
        db::comments::find_comment(&mut conn, &comment_id.to_string())?.ok_or(ApiError::NotFound)
    })
    .await?
}

pub async fn list_comments(
    pool: web::Data<DbPool>,
    message: Option<Uuid>,
    page: PageRequest,
) -> ApiResult<Page<Comment>> {
    web::block(move || -> ApiResult<Page<Comment>> {
        let mut conn = pool.get()?;
        let message = message.map(|id| id.to_string());

        let count = db::comments::count_comments(&mut conn, message.as_deref())?;
        page.ensure_within(count)?;
        let comments =
            db::comments::list_comments(&mut conn, message.as_deref(), page.offset(), page.limit())?;

        let filters = message
            .map(|message| vec![("message", message)])
            .unwrap_or_default();

        Ok(into_page(page, count, comments, "/api/comments", &filters))
    })
    .await?
}
