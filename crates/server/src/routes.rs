use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use models::ship::{self, ShipPayload};
use serde::Deserialize;
use service::pagination::{PageRequest, ShipOrder};
use service::ship::service::parse_id;
use service::ship::{ShipFilter, ShipRepository, ShipService};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::JsonApiError;
use crate::metrics::{self, SHIPS_CREATED_TOTAL, SHIPS_DELETED_TOTAL, SHIPS_UPDATED_TOTAL};
use crate::openapi::ApiDoc;

#[derive(Clone)]
pub struct ServerState {
    pub ships: ShipService<dyn ShipRepository>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn ShipRepository>) -> Self {
        Self { ships: ShipService::new(repo) }
    }
}

/// Paging keys of the listing query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub order: Option<ShipOrder>,
    pub page_number: Option<u64>,
    pub page_size: Option<u64>,
}

#[utoipa::path(get, path = "/health", tag = "health",
    responses((status = 200, body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

pub async fn metrics_text() -> (StatusCode, String) {
    metrics::encode_metrics()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(get, path = "/rest/ships", tag = "ships",
    params(crate::openapi::ListParams),
    responses(
        (status = 200, body = [crate::openapi::ShipDoc]),
        (status = 400, body = crate::openapi::ErrorBody),
    ))]
pub async fn list_ships(
    State(state): State<ServerState>,
    filter: Result<Query<ShipFilter>, QueryRejection>,
    paging: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<ship::Model>>, JsonApiError> {
    let Query(filter) = filter?;
    let Query(paging) = paging?;
    let request = PageRequest::from_parts(paging.page_number, paging.page_size, paging.order)?;
    let page = state.ships.list(&filter, &request).await?;
    info!(total = page.total_elements, returned = page.content.len(), "list ships");
    Ok(Json(page.into_content()))
}

#[utoipa::path(get, path = "/rest/ships/count", tag = "ships",
    params(crate::openapi::CountParams),
    responses(
        (status = 200, body = u64),
        (status = 400, body = crate::openapi::ErrorBody),
    ))]
pub async fn count_ships(
    State(state): State<ServerState>,
    filter: Result<Query<ShipFilter>, QueryRejection>,
) -> Result<Json<u64>, JsonApiError> {
    let Query(filter) = filter?;
    Ok(Json(state.ships.count(&filter).await?))
}

#[utoipa::path(post, path = "/rest/ships", tag = "ships",
    request_body = crate::openapi::ShipPayloadDoc,
    responses(
        (status = 200, body = crate::openapi::ShipDoc),
        (status = 400, body = crate::openapi::ErrorBody),
    ))]
pub async fn create_ship(
    State(state): State<ServerState>,
    body: Result<Json<Option<ShipPayload>>, JsonRejection>,
) -> Result<Json<ship::Model>, JsonApiError> {
    let Json(payload) = body?;
    let ship = state.ships.create(payload).await?;
    SHIPS_CREATED_TOTAL.inc();
    Ok(Json(ship))
}

#[utoipa::path(get, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = String, Path, description = "Positive integer ship id")),
    responses(
        (status = 200, body = crate::openapi::ShipDoc),
        (status = 400, body = crate::openapi::ErrorBody),
        (status = 404, body = crate::openapi::ErrorBody),
    ))]
pub async fn get_ship(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
) -> Result<Json<ship::Model>, JsonApiError> {
    let id = parse_id(&raw)?;
    Ok(Json(state.ships.get(id).await?))
}

#[utoipa::path(post, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = String, Path, description = "Positive integer ship id")),
    request_body = crate::openapi::ShipPayloadDoc,
    responses(
        (status = 200, body = crate::openapi::ShipDoc),
        (status = 400, body = crate::openapi::ErrorBody),
        (status = 404, body = crate::openapi::ErrorBody),
    ))]
pub async fn update_ship(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
    body: Result<Json<ShipPayload>, JsonRejection>,
) -> Result<Json<ship::Model>, JsonApiError> {
    let id = parse_id(&raw)?;
    let Json(patch) = body?;
    let ship = state.ships.update(id, patch).await?;
    SHIPS_UPDATED_TOTAL.inc();
    Ok(Json(ship))
}

#[utoipa::path(delete, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = String, Path, description = "Positive integer ship id")),
    responses(
        (status = 200),
        (status = 400, body = crate::openapi::ErrorBody),
        (status = 404, body = crate::openapi::ErrorBody),
    ))]
pub async fn delete_ship(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&raw)?;
    state.ships.delete(id).await?;
    SHIPS_DELETED_TOTAL.inc();
    Ok(StatusCode::OK)
}

/// Build the full application router: ship API, health, metrics and API docs
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    metrics::register_all();

    let ships = Router::new()
        .route("/rest/ships", get(list_ships).post(create_ship))
        .route("/rest/ships/count", get(count_ships))
        .route("/rest/ships/:id", get(get_ship).post(update_ship).delete(delete_ship));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(openapi_json));

    ships
        .merge(ops)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        // one INFO span per request with method and path
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        // status code and latency
                        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                        // 5xx at ERROR
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(cors),
        )
}
