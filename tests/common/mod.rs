#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use foodlink_api::auth::{generate_jwt, Claims};
use foodlink_api::database::Store;
use foodlink_api::{app, AppConfig, AppState};

pub const SECRET: &str = "integration-secret";

/// Router over a store with no database configured
pub fn router() -> Router {
    let mut config = AppConfig::development();
    config.security.jwt_secret = SECRET.to_string();
    let state = AppState::new(&config, Store::unconfigured());
    app(state, &config)
}

pub fn token_for(user: Uuid) -> String {
    generate_jwt(&Claims::new(user, "restaurant", 1), SECRET).expect("token")
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

/// Drive one request through the router and decode the JSON body
pub async fn send(router: Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

/// Migrated store on the database named by `DATABASE_URL`. Tests using it
/// scope every row to a fresh owner id, so a shared database is fine.
pub async fn live_store() -> Result<Store> {
    let _ = dotenvy::dotenv();
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must point at a disposable Postgres database")?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .context("failed to connect to DATABASE_URL")?;

    let store = Store::from_pool(pool);
    store.migrate().await?;
    Ok(store)
}
