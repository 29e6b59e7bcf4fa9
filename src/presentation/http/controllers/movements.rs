// src/presentation/http/controllers/movements.rs
use crate::application::{
    commands::movements::RecordMovementCommand,
    dto::{MovementDto, PageDto},
    queries::movements::ListMovementsQuery,
};
use crate::domain::movement::MovementKind;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, ValidatedJson};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Query,
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
pub struct MovementListParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub article_id: Option<String>,
    #[serde(default)]
    pub kind: Option<MovementKind>,
    #[serde(default)]
    pub sort_order: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordMovementPayload {
    pub article_id: String,
    pub kind: MovementKind,
    pub quantity: i32,
    pub reason: String,
}

#[utoipa::path(
    get,
    path = "/api/mouvements",
    params(MovementListParams),
    responses(
        (status = 200, description = "Ledger lines, newest first by default.", body = PageDto<MovementDto>),
        (status = 403, description = "Administrators only.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Movements"
)]
pub async fn list_movements(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<MovementListParams>,
) -> HttpResult<Json<PageDto<MovementDto>>> {
    let query = ListMovementsQuery {
        page: params.page,
        limit: params.limit,
        article_id: params.article_id,
        kind: params.kind,
        sort_order: params.sort_order,
    };

    state
        .services
        .movement_queries
        .list_movements(&user, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/mouvements",
    request_body = RecordMovementPayload,
    responses(
        (status = 201, description = "Stock adjusted and ledger line written.", body = MovementDto),
        (status = 403, description = "Administrators only.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Exit larger than stock on hand.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Movements"
)]
pub async fn record_movement(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ValidatedJson(payload): ValidatedJson<RecordMovementPayload>,
) -> HttpResult<(StatusCode, Json<MovementDto>)> {
    let command = RecordMovementCommand {
        article_id: payload.article_id,
        kind: payload.kind,
        quantity: payload.quantity,
        reason: payload.reason,
    };

    state
        .services
        .movement_commands
        .record_movement(&user, command)
        .await
        .into_http()
        .map(|movement| (StatusCode::CREATED, Json(movement)))
}
