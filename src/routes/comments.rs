use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::ApiResult, models::NewComment, pagination::PageRequest, services::comments,
    types::DbPool,
};

#[derive(Debug, Deserialize)]
struct CommentListQuery {
    page: Option<String>,
    message: Option<Uuid>,
}

#[get("")]
pub async fn get_comments(
    pool: web::Data<DbPool>,
    query: web::Query<CommentListQuery>,
) -> ApiResult<HttpResponse> {
    let page = PageRequest::parse(query.page.as_deref())?;
    let comments = comments::list_comments(pool, query.message, page).await?;

    Ok(HttpResponse::Ok().json(comments))
}

#[post("")]
pub async fn create_comment(
    pool: web::Data<DbPool>,
    form: web::Json<NewComment>,
) -> ApiResult<HttpResponse> {
    let comment = comments::create_comment(pool, form.into_inner()).await?;
    log::debug!("comment {} created", comment.id);

    Ok(HttpResponse::Created().json(comment))
}

#[get("/{id}")]
pub async fn get_comment(pool: web::Data<DbPool>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let comment = comments::get_comment(pool, id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(comment))
}
