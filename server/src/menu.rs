//! Menu endpoints: the day's entrees joined with their average review
//! score, and single-item lookup.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    database,
    error::AppError,
    models::{MenuItem, MenuItemWithAvg},
    state::AppState,
};

/// `GET /api/diningcommons/{date-time}/{dining-commons-code}/{meal-code}`
///
/// Fetches the entrees served for the given meal and reconciles each one
/// against the catalog: first sighting inserts a row, later sightings reuse
/// it. Output order matches provider order. The date-time segment is passed
/// through to the provider unvalidated.
pub async fn get_menu_items(
    State(state): State<Arc<AppState>>,
    Path((date_time, dining_commons_code, meal_code)): Path<(String, String, String)>,
) -> Result<Json<Vec<MenuItemWithAvg>>, AppError> {
    let entrees = state
        .provider
        .entrees(&date_time, &dining_commons_code, &meal_code)
        .await?;

    let mut items = Vec::with_capacity(entrees.len());
    for entree in &entrees {
        let item = database::find_or_create_menu_item(
            &state.pool,
            &dining_commons_code,
            &meal_code,
            &entree.name,
            &entree.station,
        )
        .await?;

        items.push(item);
    }

    let mut with_avgs = Vec::with_capacity(items.len());
    for item in items {
        let avg = database::average_rating(&state.pool, item.id).await?;
        with_avgs.push(MenuItemWithAvg::new(item, avg));
    }

    Ok(Json(with_avgs))
}

#[derive(Deserialize)]
pub struct MenuItemParams {
    pub id: i64,
}

/// `GET /api/diningcommons/menuitem?id={id}`
pub async fn get_menu_item(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MenuItemParams>,
) -> Result<Json<MenuItem>, AppError> {
    let item = database::menu_item_by_id(&state.pool, params.id)
        .await?
        .ok_or(AppError::not_found("MenuItem", params.id))?;

    Ok(Json(item))
}
