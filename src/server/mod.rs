//! Entity store: a HAL-flavored REST service holding boat records behind
//! HTTP Basic authentication.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod state;

use std::future::Future;
use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{MethodRouter, get},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use auth::{AuthManager, require_basic_auth};
use config::ServerConfig;
use error::AppResult;
use handlers::{
    create_boat, delete_boat, get_boat, list_boats, patch_boat, profile, replace_boat,
};
use repository::{BoatRepository, InMemoryBoatRepository};
use state::AppState;

pub use auth::AuthenticatedUser;
pub use error::AppError;

fn collection_routes() -> MethodRouter<AppState> {
    get(list_boats).post(create_boat)
}

fn item_routes() -> MethodRouter<AppState> {
    get(get_boat)
        .patch(patch_boat)
        .put(replace_boat)
        .delete(delete_boat)
}

/// Boat routes are served under `/api` and at the root, so both the
/// collection link and the `/boats/{id}` item paths resolve.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/boats", collection_routes())
        .route("/api/boats/:id", item_routes())
        .route("/boats", collection_routes())
        .route("/boats/:id", item_routes())
        .route("/api/profile", get(profile))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_basic_auth,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// State with an empty in-memory repository and the configured admin account
pub fn state_from_config(config: &ServerConfig) -> AppResult<AppState> {
    let auth = AuthManager::with_admin(
        &config.admin_username,
        &config.admin_password,
        config.bcrypt_cost,
    )?;
    let repo: Arc<dyn BoatRepository> = Arc::new(InMemoryBoatRepository::new());
    Ok(AppState::new(repo, Arc::new(auth)))
}

/// Serves the router on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
