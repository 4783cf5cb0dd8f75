use actix_web::web;
use chrono::{DateTime, Utc};
use diesel::Connection;
use uuid::Uuid;

use crate::{
    db::{self, format_timestamp},
    error::{ApiError, ApiResult},
    guard,
    identity::Requester,
    models::{MessagePatch, MessageResponse, NewMessage, Page},
    pagination::{into_page, PageRequest},
    types::{DbPool, FieldErrors},
    utils::{does_not_exist, push_error, require_text, NULL},
};

const LIST_PATH: &str = "/api/messages";

/// Whether an update replaces the whole writable representation or only
/// the supplied fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Full,
    Partial,
}

fn validate_new_message(form: &NewMessage) -> ApiResult<()> {
    let mut errors = FieldErrors::new();

    require_text(&mut errors, "text", &form.text);
    if form.room.is_none() {
        push_error(&mut errors, "room", NULL);
    }
    for comment in &form.comments {
        if comment.text.trim().is_empty() {
            push_error(&mut errors, "comments", "Comment text may not be blank.");
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

fn parse_patch(body: &[u8]) -> ApiResult<MessagePatch> {
    serde_json::from_slice(body).map_err(|err| ApiError::non_field(err.to_string()))
}

fn validate_patch(patch: &MessagePatch, kind: UpdateKind) -> ApiResult<Option<String>> {
    match (&patch.text, kind) {
        (None, UpdateKind::Full) => Err(ApiError::field("text", "This field is required.")),
        (None, UpdateKind::Partial) => Ok(None),
        (Some(text), _) => {
            let mut errors = FieldErrors::new();
            require_text(&mut errors, "text", text);
            if errors.is_empty() {
                Ok(Some(text.trim().to_string()))
            } else {
                Err(ApiError::Validation(errors))
            }
        }
    }
}

pub async fn create_message(
    pool: web::Data<DbPool>,
    requester: Requester,
    form: NewMessage,
    now: DateTime<Utc>,
) -> ApiResult<MessageResponse> {
    validate_new_message(&form)?;

    web::block(move || -> ApiResult<MessageResponse> {
        let mut conn = pool.get()?;

        let room_id = form.room.unwrap_or_default();
        if db::rooms::find_room(&mut conn, &room_id)?.is_none() {
            return Err(ApiError::field("room", does_not_exist(&room_id)));
        }

        let (message, comments) = db::messages::create_message(
            &mut conn,
            form.text.trim().to_string(),
            room_id,
            requester.user_id().map(|id| id.to_string()),
            form.comments
                .into_iter()
                .map(|comment| comment.text.trim().to_string())
                .collect(),
            format_timestamp(now),
        )?;

        Ok(MessageResponse::new(message, comments))
    })
    .await?
}

pub async fn get_message(pool: web::Data<DbPool>, message_id: Uuid) -> ApiResult<MessageResponse> {
    web::block(move || -> ApiResult<MessageResponse> {
        let mut conn = pool.get()?;
        let message_id = message_id.to_string();

        let message =
            db::messages::find_message(&mut conn, &message_id)?.ok_or(ApiError::NotFound)?;
        let mut comments =
            db::messages::comments_by_message(&mut conn, std::slice::from_ref(&message.id))?;

        Ok(MessageResponse::new(
            message,
            comments.remove(&message_id).unwrap_or_default(),
        ))
    })
    .await?
}

pub async fn list_messages(
    pool: web::Data<DbPool>,
    room: Option<Uuid>,
    page: PageRequest,
) -> ApiResult<Page<MessageResponse>> {
    web::block(move || -> ApiResult<Page<MessageResponse>> {
        let mut conn = pool.get()?;
        let room = room.map(|room| room.to_string());

        let count = db::messages::count_messages(&mut conn, room.as_deref())?;
        page.ensure_within(count)?;

        let messages = db::messages::list_messages(
            &mut conn,
            room.as_deref(),
            page.offset(),
            page.limit(),
        )?;
        let ids = messages.iter().map(|m| m.id.clone()).collect::<Vec<_>>();
        let mut comments = db::messages::comments_by_message(&mut conn, &ids)?;

        let results = messages
            .into_iter()
            .map(|message| {
                let own = comments.remove(&message.id).unwrap_or_default();
                MessageResponse::new(message, own)
            })
            .collect();

        let filters = room
            .map(|room| vec![("room", room)])
            .unwrap_or_default();

        Ok(into_page(page, count, results, LIST_PATH, &filters))
    })
    .await?
}

/// Applies the JSON `body` to a message after the edit policy allows it.
///
/// The body is parsed only once the policy has passed, so expired and
/// foreign messages are reported the same way whatever the payload holds.
/// The lookup, the policy check and the write share one transaction; on any
/// error the stored message is left as it was.
pub async fn update_message(
    pool: web::Data<DbPool>,
    message_id: Uuid,
    requester: Requester,
    body: web::Bytes,
    kind: UpdateKind,
    now: DateTime<Utc>,
) -> ApiResult<MessageResponse> {
    web::block(move || -> ApiResult<MessageResponse> {
        let mut conn = pool.get()?;
        let message_id = message_id.to_string();

        let message = conn.transaction::<_, ApiError, _>(|conn| {
            let message =
                db::messages::find_message(conn, &message_id)?.ok_or(ApiError::NotFound)?;

            guard::check_update(&message, &requester, now)?;

            let patch = parse_patch(&body)?;
            match validate_patch(&patch, kind)? {
                Some(text) => Ok(db::messages::update_message_text(conn, &message_id, &text)?),
                None => Ok(message),
            }
        })?;

        let mut comments =
            db::messages::comments_by_message(&mut conn, std::slice::from_ref(&message.id))?;

        Ok(MessageResponse::new(
            message,
            comments.remove(&message_id).unwrap_or_default(),
        ))
    })
    .await?
}
