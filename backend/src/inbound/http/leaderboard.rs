//! Leaderboard and dashboard HTTP handlers.
//!
//! ```text
//! GET /api/leaderboard
//! GET /api/dashboard-stats
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::Error;
use crate::domain::ports::{DashboardStats, LeaderboardEntry};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;
const MAX_LEADERBOARD_LIMIT: i64 = 100;

/// Query parameters for the leaderboard listing.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct LeaderboardParams {
    /// Maximum rows to return; defaults to 10, capped at 100.
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Top ambassadors ordered by points, then referrals.
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardParams),
    responses(
        (status = 200, description = "Leaderboard rows", body = [LeaderboardEntry]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["leaderboard"],
    operation_id = "leaderboard"
)]
#[get("/leaderboard")]
pub async fn leaderboard(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    params: web::Query<LeaderboardParams>,
) -> ApiResult<web::Json<Vec<LeaderboardEntry>>> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .clamp(1, MAX_LEADERBOARD_LIMIT);
    let entries = state.leaderboard.leaderboard(limit).await?;
    Ok(web::Json(entries))
}

/// Aggregated dashboard figures for the caller.
#[utoipa::path(
    get,
    path = "/api/dashboard-stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["leaderboard"],
    operation_id = "dashboardStats"
)]
#[get("/dashboard-stats")]
pub async fn dashboard_stats(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<DashboardStats>> {
    let stats = state.leaderboard.dashboard_stats(&user.0).await?;
    Ok(web::Json(stats))
}
