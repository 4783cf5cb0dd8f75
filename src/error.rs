//! Errors returned by handlers and how they render on the wire.

use actix_web::{
    error::{BlockingError, JsonPayloadError, QueryPayloadError},
    http::StatusCode,
    HttpResponse, ResponseError,
};
use diesel::r2d2::PoolError;
use serde_json::json;
use thiserror::Error;

use crate::{
    db::DbError,
    guard::{MutationDenied, NOT_AUTHOR_MESSAGE},
    types::FieldErrors,
};

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0:?}")]
    Validation(FieldErrors),

    #[error("{}", NOT_AUTHOR_MESSAGE)]
    NotAuthor,

    /// Missing record. Expired messages are reported with this variant too.
    #[error("not found")]
    NotFound,

    #[error("invalid page")]
    InvalidPage,

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(DbError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        ApiError::Validation(errors)
    }

    pub fn non_field(message: impl Into<String>) -> Self {
        Self::field(NON_FIELD_ERRORS, message)
    }
}

impl From<MutationDenied> for ApiError {
    fn from(denied: MutationDenied) -> Self {
        match denied {
            MutationDenied::Expired => ApiError::NotFound,
            MutationDenied::NotAuthor => ApiError::NotAuthor,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        ApiError::Internal(err)
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        ApiError::Internal(Box::new(err))
    }
}

impl From<PoolError> for ApiError {
    fn from(err: PoolError) -> Self {
        ApiError::Internal(Box::new(err))
    }
}

impl From<BlockingError> for ApiError {
    fn from(err: BlockingError) -> Self {
        ApiError::Internal(Box::new(err))
    }
}

impl From<JsonPayloadError> for ApiError {
    fn from(err: JsonPayloadError) -> Self {
        ApiError::non_field(err.to_string())
    }
}

impl From<QueryPayloadError> for ApiError {
    fn from(err: QueryPayloadError) -> Self {
        ApiError::non_field(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::NotAuthor => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::InvalidPage => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(errors) => json!(errors),
            ApiError::NotAuthor => json!([NOT_AUTHOR_MESSAGE]),
            ApiError::NotFound => json!({ "detail": "Not found." }),
            ApiError::InvalidPage => json!({ "detail": "Invalid page." }),
            ApiError::Conflict(message) => json!({
                "success": false,
                "message": message,
            }),
            ApiError::Internal(err) => {
                log::error!("{err}");
                json!({ "detail": "Internal server error." })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
