/// Session extraction for authenticated routes
///
/// Both extractors read the `Authorization: Bearer <token>` header and run it
/// through session validation. `SessionUser` rejects unauthenticated requests
/// with 401; `MaybeSessionUser` never fails, because the new-post flow wants
/// to answer a missing session with a redirect variant, not a transport
/// error.
use crate::auth;
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

/// The authenticated caller's user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser(pub Uuid);

/// An optional session: `None` when the caller is anonymous or the token does
/// not validate.
#[derive(Debug, Clone, Copy)]
pub struct MaybeSessionUser(pub Option<Uuid>);

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ErrorUnauthorized("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ErrorUnauthorized("Invalid Authorization scheme"))
}

fn authenticated_user(req: &HttpRequest) -> Result<Uuid, Error> {
    let token = bearer_token(req)?;

    let claims = auth::validate_session_token(token)
        .map_err(|_| ErrorUnauthorized("Invalid or expired session token"))?;

    Uuid::parse_str(&claims.claims.sub).map_err(|_| ErrorUnauthorized("Invalid user ID"))
}

impl FromRequest for SessionUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authenticated_user(req).map(SessionUser))
    }
}

impl FromRequest for MaybeSessionUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(MaybeSessionUser(authenticated_user(req).ok())))
    }
}
