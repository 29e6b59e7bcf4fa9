// src/presentation/http/controllers/requests.rs
use crate::application::{
    commands::requests::{ApproveRequestCommand, CreateRequestCommand, RejectRequestCommand},
    dto::{PageDto, StockRequestDto},
    queries::requests::{GetRequestQuery, ListRequestsQuery},
};
use crate::domain::stock_request::RequestStatus;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, ValidatedJson};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RequestListParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub status: Option<RequestStatus>,
    #[serde(default)]
    pub article_id: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequestPayload {
    pub article_id: String,
    pub quantity: i32,
}

#[utoipa::path(
    get,
    path = "/api/demandes",
    params(RequestListParams),
    responses(
        (status = 200, description = "Requests visible to the caller.", body = PageDto<StockRequestDto>)
    ),
    tag = "Requests"
)]
pub async fn list_requests(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<RequestListParams>,
) -> HttpResult<Json<PageDto<StockRequestDto>>> {
    let query = ListRequestsQuery {
        page: params.page,
        limit: params.limit,
        status: params.status,
        article_id: params.article_id,
        sort_order: params.sort_order,
    };

    state
        .services
        .request_queries
        .list_requests(&user, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/demandes",
    request_body = CreateRequestPayload,
    responses(
        (status = 201, description = "Request filed as pending.", body = StockRequestDto),
        (status = 400, description = "Invalid quantity.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown article.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Requests"
)]
pub async fn create_request(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ValidatedJson(payload): ValidatedJson<CreateRequestPayload>,
) -> HttpResult<(StatusCode, Json<StockRequestDto>)> {
    let command = CreateRequestCommand {
        article_id: payload.article_id,
        quantity: payload.quantity,
    };

    state
        .services
        .request_commands
        .create_request(&user, command)
        .await
        .into_http()
        .map(|request| (StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    get,
    path = "/api/demandes/{id}",
    params(("id" = String, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request found.", body = StockRequestDto),
        (status = 404, description = "Unknown request.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Requests"
)]
pub async fn get_request(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
) -> HttpResult<Json<StockRequestDto>> {
    state
        .services
        .request_queries
        .get_request(&user, GetRequestQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/demandes/{id}/approve",
    params(("id" = String, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request approved and stock debited.", body = StockRequestDto),
        (status = 403, description = "Administrators only.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Not pending, or not enough stock.", body = crate::presentation::http::error::ErrorResponse),
        (status = 503, description = "Stock row stayed locked.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Requests"
)]
pub async fn approve_request(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
) -> HttpResult<Json<StockRequestDto>> {
    state
        .services
        .request_commands
        .approve_request(&user, ApproveRequestCommand { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/demandes/{id}/reject",
    params(("id" = String, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request rejected.", body = StockRequestDto),
        (status = 403, description = "Administrators only.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Not pending.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Requests"
)]
pub async fn reject_request(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
) -> HttpResult<Json<StockRequestDto>> {
    state
        .services
        .request_commands
        .reject_request(&user, RejectRequestCommand { id })
        .await
        .into_http()
        .map(Json)
}
