use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Health, Welcome};
use configs::StoreConfig;
use service::{seed, Product, ResourceStore, User};

use crate::openapi;

pub mod resources;

pub const DOCS_PATH: &str = "/docs";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Composition root for the collections. Each store is independent: its own
/// records, its own id counter.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<ResourceStore<User>>,
    pub products: Arc<ResourceStore<Product>>,
}

impl AppState {
    /// Empty collections counting from `first_id`.
    pub fn empty(first_id: i64) -> Self {
        Self {
            users: Arc::new(ResourceStore::new(first_id)),
            products: Arc::new(ResourceStore::new(first_id)),
        }
    }

    /// Collections pre-filled with the demo users and products.
    pub fn seeded(first_id: i64) -> Self {
        Self {
            users: Arc::new(ResourceStore::with_records(first_id, seed::demo_users())),
            products: Arc::new(ResourceStore::with_records(first_id, seed::demo_products())),
        }
    }

    pub fn from_config(cfg: &StoreConfig) -> Self {
        if cfg.seed_demo_data {
            Self::seeded(cfg.first_id)
        } else {
            Self::empty(cfg.first_id)
        }
    }
}

#[utoipa::path(get, path = "/", tag = "System", responses((status = 200, description = "OK", body = crate::openapi::WelcomeResponse)))]
pub async fn root() -> Json<Welcome> {
    Json(Welcome::new(DOCS_PATH))
}

#[utoipa::path(get, path = "/health", tag = "System", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: system routes, both collections and
/// the API documentation. `server_url` is advertised in the OpenAPI document.
pub fn build_router(state: AppState, cors: CorsLayer, server_url: &str) -> Router {
    let system = Router::new()
        .route("/", get(root))
        .route("/health", get(health));

    let docs = SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, openapi::api_doc(server_url));

    system
        .merge(resources::router(state.users))
        .merge(resources::router(state.products))
        .merge(docs)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
