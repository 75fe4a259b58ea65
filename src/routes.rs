use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers::{self, ngo, restaurant};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let protected = Router::new()
        .merge(ngo_routes())
        .merge(restaurant_routes())
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    let router = Router::new()
        // Public
        .route("/health", get(handlers::health))
        // Protected API (JWT required)
        .nest("/api/v1", protected)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(TraceLayer::new_for_http());

    let router = if config.security.enable_cors {
        router.layer(cors_layer(&config.security.cors_origins))
    } else {
        router
    };

    router.with_state(state)
}

fn ngo_routes() -> Router<AppState> {
    Router::new()
        .route("/ngo/capacity", get(ngo::capacity::get).post(ngo::capacity::upsert))
        .route(
            "/ngo/feedback",
            get(ngo::feedback::list_feedback).post(ngo::feedback::create_feedback),
        )
        .route(
            "/ngo/stories",
            get(ngo::feedback::list_stories).post(ngo::feedback::create_story),
        )
}

fn restaurant_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurant/menu", get(restaurant::menu::list).post(restaurant::menu::create))
        .route(
            "/restaurant/menu/:id",
            get(restaurant::menu::get)
                .put(restaurant::menu::update)
                .delete(restaurant::menu::delete),
        )
        .route(
            "/restaurant/inventory",
            get(restaurant::inventory::list).post(restaurant::inventory::create),
        )
        .route("/restaurant/inventory/expiring", get(restaurant::inventory::expiring))
        .route(
            "/restaurant/inventory/:id",
            get(restaurant::inventory::get)
                .put(restaurant::inventory::update)
                .delete(restaurant::inventory::delete),
        )
}

/// Origins that fail to parse as header values are skipped
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
