//! Current-user endpoint and alias moderation.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{auth::CurrentUser, database, error::AppError, models::User, state::AppState};

/// `GET /api/currentUser`
pub async fn current_user(current_user: CurrentUser) -> Json<CurrentUser> {
    Json(current_user)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAliasParams {
    pub proposed_alias: String,
}

/// `PUT /api/currentUser/updateAlias?proposedAlias=`
///
/// Stores a proposed alias on the caller's row, pending moderation.
pub async fn update_alias(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Query(params): Query<UpdateAliasParams>,
) -> Result<Json<User>, AppError> {
    let proposed = params.proposed_alias.trim();
    if proposed.is_empty() {
        return Err(AppError::MalformedPayload);
    }

    let user = database::set_proposed_alias(&state.pool, current_user.user.id, proposed)
        .await?
        .ok_or(AppError::not_found("User", current_user.user.id))?;

    Ok(Json(user))
}

/// `GET /api/admin/usersWithProposedAlias` (admin or moderator)
pub async fn users_with_proposed_alias(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
) -> Result<Json<Vec<User>>, AppError> {
    if !current_user.can_moderate() {
        return Err(AppError::Forbidden);
    }

    Ok(Json(database::users_with_proposed_alias(&state.pool).await?))
}

#[derive(Deserialize)]
pub struct AliasModerationParams {
    pub id: i64,
    pub approved: bool,
}

/// `PUT /api/currentUser/updateAliasModeration?id&approved` (admin or
/// moderator). Approving promotes the proposal; rejecting discards it.
pub async fn update_alias_moderation(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Query(params): Query<AliasModerationParams>,
) -> Result<Json<User>, AppError> {
    if !current_user.can_moderate() {
        return Err(AppError::Forbidden);
    }

    let user = database::user_by_id(&state.pool, params.id)
        .await?
        .ok_or(AppError::not_found("User", params.id))?;

    if user.proposed_alias.is_none() {
        return Err(AppError::MalformedPayload);
    }

    let now = Utc::now().naive_utc();
    let user = database::moderate_alias(&state.pool, params.id, params.approved, now)
        .await?
        .ok_or(AppError::not_found("User", params.id))?;

    Ok(Json(user))
}
