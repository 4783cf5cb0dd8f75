use crate::{
    error::ApiResult,
    identity::{Requester, SESSION_USER_KEY},
    models::NewUser,
    services::users::{self, SignInOutcome},
    types::DbPool,
};
use actix_session::Session;
use actix_web::{error::ErrorInternalServerError, get, post, web, Error, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Deserialize)]
struct SignData {
    username: String,
    password: String,
}

fn open_session(session: &Session, user_id: &str) -> Result<(), Error> {
    let user_id = Uuid::parse_str(user_id).map_err(ErrorInternalServerError)?;
    session.renew();
    session
        .insert(SESSION_USER_KEY, user_id)
        .map_err(ErrorInternalServerError)
}

#[post("/signup")]
pub async fn sign_up(
    pool: web::Data<DbPool>,
    form: web::Json<NewUser>,
    session: Session,
) -> Result<HttpResponse, Error> {
    let form = form.into_inner();
    let signin = form.sign_in;
    let user = users::sign_up(pool, form).await?;
    log::info!("user {} signed up as {}", user.id, user.username);

    if signin {
        open_session(&session, &user.id)?;
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
    })))
}

#[post("/signin")]
pub async fn sign_in(
    pool: web::Data<DbPool>,
    session: Session,
    signin_data: web::Json<SignData>,
) -> Result<HttpResponse, Error> {
    let SignData { username, password } = signin_data.into_inner();

    match users::sign_in(pool, username.clone(), password).await? {
        SignInOutcome::Ok(user) => {
            open_session(&session, &user.id)?;
            Ok(HttpResponse::Ok().json(user))
        }
        SignInOutcome::WrongPassword => Ok(HttpResponse::Unauthorized().json(json!({
            "message": format!("Wrong password for username: {}", &username)
        }))),
        SignInOutcome::UnknownUser => Ok(HttpResponse::NotFound().json(json!({
            "message": format!("No user found with username: {}", &username)
        }))),
    }
}

#[post("/logout")]
pub async fn log_out(session: Session, requester: Requester) -> HttpResponse {
    match requester {
        Requester::User(_) => {
            session.purge();
            HttpResponse::Ok().json(json!({}))
        }
        Requester::Anonymous => HttpResponse::Unauthorized().json(json!({
            "message": "You're not signed in."
        })),
    }
}

#[get("/user")]
pub async fn get_current_user(
    pool: web::Data<DbPool>,
    requester: Requester,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = requester.user_id() else {
        return Ok(HttpResponse::Unauthorized().json(json!({
            "message": "Signin required."
        })));
    };

    let user = users::find_user_by_uid(pool, user_id).await?;

    match user {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": format!("User {} does not exist.", user_id),
        }))),
    }
}
