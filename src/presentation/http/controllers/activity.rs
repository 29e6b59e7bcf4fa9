// src/presentation/http/controllers/activity.rs
use crate::application::{
    dto::{ActivityDto, PageDto},
    queries::activity::ListActivityQuery,
};
use crate::domain::activity::TargetType;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};
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
pub struct ActivityListParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub target_type: Option<TargetType>,
    #[serde(default)]
    pub sort_order: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/historique",
    params(ActivityListParams),
    responses(
        (status = 200, description = "Activity log visible to the caller.", body = PageDto<ActivityDto>)
    ),
    tag = "Activity"
)]
pub async fn list_activity(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<ActivityListParams>,
) -> HttpResult<Json<PageDto<ActivityDto>>> {
    let query = ListActivityQuery {
        page: params.page,
        limit: params.limit,
        target_type: params.target_type,
        sort_order: params.sort_order,
    };

    state
        .services
        .activity_queries
        .list_activity(&user, query)
        .await
        .into_http()
        .map(Json)
}
