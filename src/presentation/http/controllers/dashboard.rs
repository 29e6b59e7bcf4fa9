// src/presentation/http/controllers/dashboard.rs
use crate::application::dto::{AlertDto, ChartsDto, DashboardStatsDto};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses((status = 200, description = "Headline counters.", body = DashboardStatsDto)),
    tag = "Dashboard"
)]
pub async fn stats(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<DashboardStatsDto>> {
    state
        .services
        .dashboard_queries
        .stats(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/dashboard/alerts",
    responses((status = 200, description = "Low stock first, then upcoming expiries.", body = Vec<AlertDto>)),
    tag = "Dashboard"
)]
pub async fn alerts(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<AlertDto>>> {
    state
        .services
        .dashboard_queries
        .alerts(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/dashboard/charts",
    responses((status = 200, description = "Chart series.", body = ChartsDto)),
    tag = "Dashboard"
)]
pub async fn charts(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<ChartsDto>> {
    state
        .services
        .dashboard_queries
        .charts(&user)
        .await
        .into_http()
        .map(Json)
}
