use crate::{
    error::ApiResult,
    models::NewRoom,
    pagination::{ListQuery, PageRequest},
    services::rooms,
    types::DbPool,
};
use actix_web::{get, post, web, HttpResponse};
use uuid::Uuid;

#[get("")]
pub async fn get_rooms(
    pool: web::Data<DbPool>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let page = PageRequest::parse(query.page.as_deref())?;
    let rooms = rooms::list_rooms(pool, page).await?;

    Ok(HttpResponse::Ok().json(rooms))
}

#[post("")]
pub async fn create_room(
    pool: web::Data<DbPool>,
    data: web::Json<NewRoom>,
) -> ApiResult<HttpResponse> {
    let room = rooms::create_room(pool, data.into_inner()).await?;
    log::info!("room {} created with name: {}", room.id, room.name);

    Ok(HttpResponse::Created().json(room))
}

#[get("/{id}")]
pub async fn get_room(pool: web::Data<DbPool>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let room = rooms::get_room(pool, id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(room))
}
