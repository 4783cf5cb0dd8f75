use actix_web::web;
use bcrypt::verify;
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

use crate::{
    db::{self, DbError},
    error::{ApiError, ApiResult},
    models::{NewUser, User},
    types::{DbPool, FieldErrors},
    utils::require_text,
};

pub enum SignInOutcome {
    Ok(User),
    WrongPassword,
    UnknownUser,
}

pub async fn find_user_by_uid(pool: web::Data<DbPool>, user_id: Uuid) -> ApiResult<Option<User>> {
    web::block(move || -> ApiResult<Option<User>> {
        let mut conn = pool.get()?;
        Ok(db::users::find_user_by_uid(&mut conn, user_id)?)
    })
    .await?
}

fn is_unique_violation(err: &DbError) -> bool {
    matches!(
        err.downcast_ref::<diesel::result::Error>(),
        Some(diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            _
        ))
    )
}

pub async fn sign_up(pool: web::Data<DbPool>, form: NewUser) -> ApiResult<User> {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, "username", &form.username);
    require_text(&mut errors, "password", &form.password);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let username = form.username.clone();
    web::block(move || -> Result<User, DbError> {
        let mut conn = pool.get()?;
        db::users::insert_new_user(&mut conn, form.username.trim(), &form.password)
    })
    .await?
    .map_err(|err| {
        if is_unique_violation(&err) {
            ApiError::Conflict(format!("Username {} already exists.", username))
        } else {
            ApiError::Internal(err)
        }
    })
}

pub async fn sign_in(
    pool: web::Data<DbPool>,
    username: String,
    password: String,
) -> ApiResult<SignInOutcome> {
    web::block(move || -> ApiResult<SignInOutcome> {
        let mut conn = pool.get()?;
        let Some(user) = db::users::find_user_by_username(&mut conn, username)? else {
            return Ok(SignInOutcome::UnknownUser);
        };

        let matches = verify(password, &user.password).map_err(|err| ApiError::Internal(err.into()))?;
        if matches {
            Ok(SignInOutcome::Ok(user))
        } else {
            Ok(SignInOutcome::WrongPassword)
        }
    })
    .await?
}
