use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::database::models::{CreateMenuItemRequest, MenuItem, UpdateMenuItemRequest};
use crate::handlers::{parse_id, payload};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/v1/restaurant/menu
pub async fn list(State(state): State<AppState>, user: AuthUser) -> ApiResult<Vec<MenuItem>> {
    let items = state.menu.list(user.user_id).await?;
    Ok(ApiResponse::success(items).with_message("Menu items retrieved"))
}

/// POST /api/v1/restaurant/menu
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<CreateMenuItemRequest>, JsonRejection>,
) -> ApiResult<MenuItem> {
    let item = state.menu.create(user.user_id, payload(body)?).await?;
    Ok(ApiResponse::created(item).with_message("Menu item created"))
}

/// GET /api/v1/restaurant/menu/:id
pub async fn get(State(state): State<AppState>, _user: AuthUser, Path(id): Path<String>) -> ApiResult<MenuItem> {
    let item = state.menu.get(parse_id(&id)?).await?;
    Ok(ApiResponse::success(item).with_message("Menu item retrieved"))
}

/// PUT /api/v1/restaurant/menu/:id - partial update
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<UpdateMenuItemRequest>, JsonRejection>,
) -> ApiResult<MenuItem> {
    let id = parse_id(&id)?;
    let item = state.menu.update(user.user_id, id, payload(body)?).await?;
    Ok(ApiResponse::success(item).with_message("Menu item updated"))
}

/// DELETE /api/v1/restaurant/menu/:id
pub async fn delete(State(state): State<AppState>, user: AuthUser, Path(id): Path<String>) -> ApiResult<()> {
    state.menu.delete(user.user_id, parse_id(&id)?).await?;
    Ok(ApiResponse::empty("Menu item deleted"))
}
