use std::future::{ready, Ready};

use actix_session::Session;
use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};
use uuid::Uuid;

pub const SESSION_USER_KEY: &str = "user_id";

/// Who is making the current request.
///
/// Resolved once per request by [`crate::middlewares::auth::Authentication`]
/// and stored in the request extensions; handlers take it as an extractor and
/// pass it on explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requester {
    #[default]
    Anonymous,
    User(Uuid),
}

impl Requester {
    pub fn from_session(session: &Session) -> Self {
        match session.get::<Uuid>(SESSION_USER_KEY) {
            Ok(Some(user_id)) => Requester::User(user_id),
            Ok(None) => Requester::Anonymous,
            Err(err) => {
                log::warn!("discarding unreadable session identity: {err}");
                Requester::Anonymous
            }
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Requester::User(id) => Some(*id),
            Requester::Anonymous => None,
        }
    }

    /// Whether this requester is the given author. An unset author never matches.
    pub fn is_author(&self, author_id: Option<&str>) -> bool {
        match (self, author_id) {
            (Requester::User(id), Some(author)) => Uuid::parse_str(author)
                .map(|author| author == *id)
                .unwrap_or(false),
            _ => false,
        }
    }
}

impl FromRequest for Requester {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let requester = req
            .extensions()
            .get::<Requester>()
            .copied()
            .unwrap_or_default();
        ready(Ok(requester))
    }
}
