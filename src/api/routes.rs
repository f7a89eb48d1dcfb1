use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::handlers;
use crate::config::CorsConfig;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Owners
        .route(
            "/owners",
            get(handlers::list_owners::<S>).post(handlers::create_owner::<S>),
        )
        .route("/owners/:id", get(handlers::get_owner::<S>))
        // Pets
        .route(
            "/pets",
            get(handlers::list_pets::<S>).post(handlers::create_pet::<S>),
        )
        // Appointments
        .route(
            "/appointments/upcoming",
            get(handlers::list_upcoming_appointments::<S>),
        )
        .route(
            "/appointments",
            post(handlers::create_appointment::<S>),
        )
}

/// CORS policy for the browser dashboard
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allow_origin = if config.allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    log::warn!("Ignoring invalid CORS origin '{}'", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::LOCATION])
}

/// Router with state and CORS applied, ready to serve
pub fn build_app<S: Store + 'static>(store: Arc<S>, cors: &CorsConfig) -> Router {
    create_router::<S>()
        .layer(cors_layer(cors))
        .with_state(store)
}
