//! Account HTTP handlers.
//!
//! ```text
//! POST /api/register
//! POST /api/login
//! GET  /api/profile
//! PUT  /api/profile
//! POST /api/change-password
//! ```

use actix_web::{get, post, put, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{
    AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest,
    UserProfile,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Acknowledgement payload for operations without a meaningful body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome message.
    pub message: String,
}

/// Register a new ambassador account.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let response = state.accounts.register(payload.into_inner()).await?;
    Ok(web::Json(response))
}

/// Authenticate with email and password.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 403, description = "Account suspended or deactivated", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let response = state.accounts.login(payload.into_inner()).await?;
    Ok(web::Json(response))
}

/// The authenticated user's profile, including their rank.
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Account suspended or deactivated", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<UserProfile>> {
    let profile = state.accounts.profile(&user.0).await?;
    Ok(web::Json(profile))
}

/// Update the authenticated user's profile fields.
#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "updateProfile"
)]
#[put("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<UserProfile>> {
    let profile = state
        .accounts
        .update_profile(&user.0, payload.into_inner())
        .await?;
    Ok(web::Json(profile))
}

/// Rotate the authenticated user's password.
#[utoipa::path(
    post,
    path = "/api/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Current password incorrect", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "changePassword"
)]
#[post("/change-password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    state
        .accounts
        .change_password(&user.0, payload.into_inner())
        .await?;
    Ok(web::Json(MessageResponse {
        message: "Password changed successfully".to_owned(),
    }))
}
