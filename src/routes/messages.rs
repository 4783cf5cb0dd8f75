use actix_web::{get, patch, post, put, web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::ApiResult,
    identity::Requester,
    models::NewMessage,
    pagination::PageRequest,
    services::messages::{self, UpdateKind},
    types::DbPool,
};

#[derive(Debug, Deserialize)]
struct MessageListQuery {
    page: Option<String>,
    room: Option<Uuid>,
}

#[get("")]
pub async fn get_messages(
    pool: web::Data<DbPool>,
    query: web::Query<MessageListQuery>,
) -> ApiResult<HttpResponse> {
    let page = PageRequest::parse(query.page.as_deref())?;
    let messages = messages::list_messages(pool, query.room, page).await?;

    Ok(HttpResponse::Ok().json(messages))
}

#[post("")]
pub async fn create_message(
    pool: web::Data<DbPool>,
    requester: Requester,
    form: web::Json<NewMessage>,
) -> ApiResult<HttpResponse> {
    let message = messages::create_message(pool, requester, form.into_inner(), Utc::now()).await?;
    log::info!(
        "message {} created in room {} by {:?}",
        message.id,
        message.room,
        requester
    );

    Ok(HttpResponse::Created().json(message))
}

#[get("/{id}")]
pub async fn get_message(pool: web::Data<DbPool>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let message = messages::get_message(pool, id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(message))
}

async fn update(
    pool: web::Data<DbPool>,
    id: Uuid,
    requester: Requester,
    body: web::Bytes,
    kind: UpdateKind,
) -> ApiResult<HttpResponse> {
    let message = messages::update_message(pool, id, requester, body, kind, Utc::now())
        .await
        .inspect_err(|err| log::debug!("{kind:?} update of message {id} rejected: {err}"))?;
    log::info!("message {id} updated by {requester:?}");

    Ok(HttpResponse::Ok().json(message))
}

#[put("/{id}")]
pub async fn put_message(
    pool: web::Data<DbPool>,
    id: web::Path<Uuid>,
    requester: Requester,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    update(pool, id.into_inner(), requester, body, UpdateKind::Full).await
}

#[patch("/{id}")]
pub async fn patch_message(
    pool: web::Data<DbPool>,
    id: web::Path<Uuid>,
    requester: Requester,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    update(pool, id.into_inner(), requester, body, UpdateKind::Partial).await
}
