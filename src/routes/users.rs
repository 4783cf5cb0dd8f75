use actix_web::{get, web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::{error::ApiResult, services::users, types::DbPool};

#[get("/users/{user_id}")]
pub async fn get_user_by_id(
    pool: web::Data<DbPool>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = id.into_inner();
    let user = users::find_user_by_uid(pool, user_id).await?;

    if let Some(user) = user {
        Ok(HttpResponse::Ok().json(user))
    } else {
        Ok(HttpResponse::NotFound().json(json!({
            "error": 404,
            "message": format!("No user found with id: {user_id}")
        })))
    }
}
