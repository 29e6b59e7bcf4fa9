// src/presentation/http/openapi.rs
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

pub const DEFAULT_SNAPSHOT_PATH: &str = "docs/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::routes::health,
        crate::presentation::http::controllers::auth::register,
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::profile,
        crate::presentation::http::controllers::articles::list_articles,
        crate::presentation::http::controllers::articles::get_article,
        crate::presentation::http::controllers::articles::create_article,
        crate::presentation::http::controllers::articles::update_article,
        crate::presentation::http::controllers::articles::delete_article,
        crate::presentation::http::controllers::requests::list_requests,
        crate::presentation::http::controllers::requests::create_request,
        crate::presentation::http::controllers::requests::get_request,
        crate::presentation::http::controllers::requests::approve_request,
        crate::presentation::http::controllers::requests::reject_request,
        crate::presentation::http::controllers::movements::list_movements,
        crate::presentation::http::controllers::movements::record_movement,
        crate::presentation::http::controllers::activity::list_activity,
        crate::presentation::http::controllers::dashboard::stats,
        crate::presentation::http::controllers::dashboard::alerts,
        crate::presentation::http::controllers::dashboard::charts
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::RegisterRequest,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::LoginResponse,
            crate::presentation::http::controllers::articles::CreateArticleRequest,
            crate::presentation::http::controllers::articles::UpdateArticleRequest,
            crate::presentation::http::controllers::requests::CreateRequestPayload,
            crate::presentation::http::controllers::movements::RecordMovementPayload,
            crate::application::dto::UserDto,
            crate::application::dto::UserProfileDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::CapabilityView,
            crate::application::dto::ArticleDto,
            crate::application::dto::StockRequestDto,
            crate::application::dto::MovementDto,
            crate::application::dto::ActivityDto,
            crate::application::dto::DashboardStatsDto,
            crate::application::dto::AlertDto,
            crate::application::dto::AlertKind,
            crate::application::dto::ChartsDto,
            crate::application::dto::StockLevelPoint,
            crate::domain::user::Role,
            crate::domain::stock_request::RequestStatus,
            crate::domain::movement::MovementKind,
            crate::domain::activity::ActivityAction,
            crate::domain::activity::TargetType
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and profile"),
        (name = "Articles", description = "Inventory catalogue"),
        (name = "Requests", description = "Stock requests and their approval"),
        (name = "Movements", description = "Stock ledger"),
        (name = "Activity", description = "Audit history"),
        (name = "Dashboard", description = "Counters, alerts and charts"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Stockify API",
        description = "Inventory backend with an approval workflow and a stock ledger",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_else(|| vec!["http://localhost:8080".to_string()]);

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

/// Write the pretty-printed document to `output_path`, creating parent
/// directories as needed.
pub fn write_openapi_snapshot(output_path: &str) -> std::io::Result<()> {
    let document = ApiDoc::openapi();
    let path = Path::new(output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_workflow_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/auth/login",
            "/api/articles/{id}",
            "/api/demandes/{id}/approve",
            "/api/mouvements",
            "/api/historique",
            "/api/dashboard/charts",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearerAuth"));
    }
}
