use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::database::models::{CreateFeedbackRequest, CreateStoryRequest, FeedbackEntry, ImpactStory};
use crate::handlers::payload;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/v1/ngo/feedback
pub async fn list_feedback(State(state): State<AppState>, user: AuthUser) -> ApiResult<Vec<FeedbackEntry>> {
    let entries = state.feedback.list_feedback(user.user_id).await?;
    Ok(ApiResponse::success(entries).with_message("Feedback retrieved"))
}

/// POST /api/v1/ngo/feedback
pub async fn create_feedback(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<CreateFeedbackRequest>, JsonRejection>,
) -> ApiResult<FeedbackEntry> {
    let entry = state.feedback.create_feedback(user.user_id, payload(body)?).await?;
    Ok(ApiResponse::created(entry).with_message("Feedback recorded"))
}

/// GET /api/v1/ngo/stories
pub async fn list_stories(State(state): State<AppState>, user: AuthUser) -> ApiResult<Vec<ImpactStory>> {
    let stories = state.feedback.list_stories(user.user_id).await?;
    Ok(ApiResponse::success(stories).with_message("Impact stories retrieved"))
}

/// POST /api/v1/ngo/stories
pub async fn create_story(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<CreateStoryRequest>, JsonRejection>,
) -> ApiResult<ImpactStory> {
    let story = state.feedback.create_story(user.user_id, payload(body)?).await?;
    Ok(ApiResponse::created(story).with_message("Impact story published"))
}
