//! Review endpoints: posting, listing, and moderation.
//!
//! New reviews start in `AWAITING_REVIEW`; moderators move them to
//! `APPROVED` or `REJECTED`. The average joined onto menu listings covers
//! every review of an item regardless of status.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    auth::CurrentUser,
    database,
    error::AppError,
    models::{CreateReview, Review, ReviewStatus},
    state::AppState,
};

const STAR_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

/// `POST /api/reviews/post`
pub async fn post_review(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Json(payload): Json<CreateReview>,
) -> Result<Json<Review>, AppError> {
    if !STAR_RANGE.contains(&payload.items_stars) {
        return Err(AppError::MalformedPayload);
    }

    database::menu_item_by_id(&state.pool, payload.item_id)
        .await?
        .ok_or(AppError::not_found("MenuItem", payload.item_id))?;

    let now = Utc::now().naive_utc();
    let review =
        database::insert_review(&state.pool, current_user.user.id, &payload, now).await?;

    Ok(Json(review))
}

/// `GET /api/reviews/all` (admin or moderator)
pub async fn all_reviews(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
) -> Result<Json<Vec<Review>>, AppError> {
    if !current_user.can_moderate() {
        return Err(AppError::Forbidden);
    }

    Ok(Json(database::all_reviews(&state.pool).await?))
}

/// `GET /api/reviews/needsmoderation` (admin or moderator)
pub async fn needs_moderation(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
) -> Result<Json<Vec<Review>>, AppError> {
    if !current_user.can_moderate() {
        return Err(AppError::Forbidden);
    }

    Ok(Json(database::reviews_awaiting_moderation(&state.pool).await?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateParams {
    pub id: i64,
    pub status: String,
    pub moderator_comments: Option<String>,
}

/// `PUT /api/reviews/moderate?id&status&moderatorComments` (admin or
/// moderator). Status must be `APPROVED` or `REJECTED`.
pub async fn moderate_review(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Query(params): Query<ModerateParams>,
) -> Result<Json<Review>, AppError> {
    if !current_user.can_moderate() {
        return Err(AppError::Forbidden);
    }

    let status = match params.status.as_str() {
        "APPROVED" => ReviewStatus::Approved,
        "REJECTED" => ReviewStatus::Rejected,
        _ => return Err(AppError::MalformedPayload),
    };

    let now = Utc::now().naive_utc();
    let review = database::moderate_review(
        &state.pool,
        params.id,
        status,
        current_user.user.id,
        params.moderator_comments.as_deref(),
        now,
    )
    .await?
    .ok_or(AppError::not_found("Review", params.id))?;

    Ok(Json(review))
}
