//! Bearer-token request extractors.
//!
//! Handlers take [`AuthenticatedUser`] (any active account) or [`AdminUser`]
//! (admin role required) as arguments; extraction resolves the
//! `Authorization: Bearer` header through the account service, which also
//! enforces account status.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, User};
use crate::inbound::http::state::HttpState;

/// The user resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// An authenticated user holding the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

fn bearer_token(req: &HttpRequest) -> Result<String, Error> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .map(str::to_owned)
        .ok_or_else(|| Error::unauthorized("authorization header must use the Bearer scheme"))
}

async fn resolve_user(state: Option<web::Data<HttpState>>, req: &HttpRequest) -> Result<User, Error> {
    let state = state.ok_or_else(|| Error::internal("http state not configured"))?;
    let token = bearer_token(req)?;
    state.accounts.authenticate(&token).await
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let req = req.clone();
        Box::pin(async move { resolve_user(state, &req).await.map(AuthenticatedUser) })
    }
}

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let req = req.clone();
        Box::pin(async move {
            let user = resolve_user(state, &req).await?;
            if !user.is_admin() {
                return Err(Error::forbidden("admin access required"));
            }
            Ok(AdminUser(user))
        })
    }
}
