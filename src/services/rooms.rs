use actix_web::web;
use uuid::Uuid;

use crate::{
    db,
    error::{ApiError, ApiResult},
    models::{NewRoom, Page, Room},
    pagination::{into_page, PageRequest},
    types::{DbPool, FieldErrors},
    utils::require_text,
};

pub async fn create_room(pool: web::Data<DbPool>, form: NewRoom) -> ApiResult<Room> {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, "name", &form.name);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    web::block(move || -> ApiResult<Room> {
        let mut conn = pool.get()?;
        Ok(db::rooms::create_room(&mut conn, form.name.trim())?)
    })
    .await?
}

pub async fn get_room(pool: web::Data<DbPool>, room_id: Uuid) -> ApiResult<Room> {
    web::block(move || -> ApiResult<Room> {
        let mut conn = pool.get()?;
        db::rooms::find_room(&mut conn, &room_id.to_string())?.ok_or(ApiError::NotFound)
    })
    .await?
}

pub async fn list_rooms(pool: web::Data<DbPool>, page: PageRequest) -> ApiResult<Page<Room>> {
    web::block(move || -> ApiResult<Page<Room>> {
        let mut conn = pool.get()?;

        let count = db::rooms::count_rooms(&mut conn)?;
        page.ensure_within(count)?;
        let rooms = db::rooms::list_rooms(&mut conn, page.offset(), page.limit())?;

        Ok(into_page(page, count, rooms, "/api/rooms", &[]))
    })
    .await?
}
