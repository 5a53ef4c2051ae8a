pub mod assets;
pub mod auth;
pub mod search;
pub mod users;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use stockroom_pipeline::Registry;

use crate::auth::{AuthLayer, JwtManager};

/// Shared state for all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub jwt: Arc<JwtManager>,
}

/// Build the Axum router with all API routes and middleware.
///
/// The asset routes require a valid token; registration, sign-in, token
/// verification and search are public.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/assets",
            post(assets::create_asset)
                .get(assets::list_assets)
                .put(assets::update_asset),
        )
        .route("/assets/{id}", get(assets::get_asset))
        .layer(AuthLayer::new(state.jwt.clone()));

    let public = Router::new()
        .route("/register", post(users::register))
        .route("/signin", post(users::signin))
        .route("/verifyJWT", get(auth::verify_jwt))
        .route("/search", get(search::search));

    Router::new()
        .merge(protected)
        .merge(public)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
