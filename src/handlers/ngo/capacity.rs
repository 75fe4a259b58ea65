use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::database::models::{CapacitySettings, CapacitySettingsRequest};
use crate::handlers::payload;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/v1/ngo/capacity
pub async fn get(State(state): State<AppState>, user: AuthUser) -> ApiResult<CapacitySettings> {
    let settings = state.capacity.get(user.user_id).await?;
    Ok(ApiResponse::success(settings).with_message("Capacity settings retrieved"))
}

/// POST /api/v1/ngo/capacity - create or fully replace
pub async fn upsert(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<CapacitySettingsRequest>, JsonRejection>,
) -> ApiResult<CapacitySettings> {
    let request = payload(body)?;
    let settings = state.capacity.upsert(user.user_id, request).await?;
    Ok(ApiResponse::success(settings).with_message("Capacity settings saved"))
}
