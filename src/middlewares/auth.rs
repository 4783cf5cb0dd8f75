use actix_session::SessionExt;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use std::future::{ready, Ready};

use crate::identity::Requester;

/// Resolves the session into a [`Requester`] for every request and turns
/// away anonymous callers on paths that need a signed-in user.
pub struct Authentication;

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticationMiddleware { service }))
    }
}

pub struct AuthenticationMiddleware<S> {
    service: S,
}

/// Messages, rooms and comments are open to anonymous callers; only the
/// current-user endpoint needs a session.
fn requires_signin(path: &str) -> bool {
    path.starts_with("/api/auth/user")
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let requester = Requester::from_session(&req.get_session());

        if requester == Requester::Anonymous && requires_signin(req.path()) {
            return Box::pin(async move {
                let request = req.into_parts().0;
                let response = HttpResponse::Unauthorized()
                    .json(json!({
                        "message": "Signin required."
                    }))
                    .map_into_right_body();

                Ok(ServiceResponse::new(request, response))
            });
        }

        req.extensions_mut().insert(requester);

        let fut = self.service.call(req);
        Box::pin(async move {
            let res: ServiceResponse<B> = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::requires_signin;

    #[test]
    fn only_current_user_endpoint_is_protected() {
        assert!(requires_signin("/api/auth/user"));
        assert!(!requires_signin("/api/auth/signin"));
        assert!(!requires_signin("/api/messages"));
        assert!(!requires_signin("/api/rooms"));
    }
}
