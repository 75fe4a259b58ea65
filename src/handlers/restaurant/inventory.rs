use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};

use crate::database::models::{
    CreateInventoryItemRequest, ExpiringQuery, InventoryItem, UpdateInventoryItemRequest,
};
use crate::error::ApiError;
use crate::handlers::{parse_id, payload};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/v1/restaurant/inventory
pub async fn list(State(state): State<AppState>, user: AuthUser) -> ApiResult<Vec<InventoryItem>> {
    let items = state.inventory.resources().list(user.user_id).await?;
    Ok(ApiResponse::success(items).with_message("Inventory retrieved"))
}

/// POST /api/v1/restaurant/inventory
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<CreateInventoryItemRequest>, JsonRejection>,
) -> ApiResult<InventoryItem> {
    let item = state.inventory.resources().create(user.user_id, payload(body)?).await?;
    Ok(ApiResponse::created(item).with_message("Inventory item created"))
}

/// GET /api/v1/restaurant/inventory/expiring?days=N
pub async fn expiring(
    State(state): State<AppState>,
    user: AuthUser,
    query: Result<Query<ExpiringQuery>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<Vec<InventoryItem>> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let items = state.inventory.expiring(user.user_id, query.days).await?;
    Ok(ApiResponse::success(items).with_message("Expiring inventory retrieved"))
}

/// GET /api/v1/restaurant/inventory/:id
pub async fn get(State(state): State<AppState>, _user: AuthUser, Path(id): Path<String>) -> ApiResult<InventoryItem> {
    let item = state.inventory.resources().get(parse_id(&id)?).await?;
    Ok(ApiResponse::success(item).with_message("Inventory item retrieved"))
}

/// PUT /api/v1/restaurant/inventory/:id - partial update
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<UpdateInventoryItemRequest>, JsonRejection>,
) -> ApiResult<InventoryItem> {
    let id = parse_id(&id)?;
    let item = state.inventory.resources().update(user.user_id, id, payload(body)?).await?;
    Ok(ApiResponse::success(item).with_message("Inventory item updated"))
}

/// DELETE /api/v1/restaurant/inventory/:id
pub async fn delete(State(state): State<AppState>, user: AuthUser, Path(id): Path<String>) -> ApiResult<()> {
    state.inventory.resources().delete(user.user_id, parse_id(&id)?).await?;
    Ok(ApiResponse::empty("Inventory item deleted"))
}
