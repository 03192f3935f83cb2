use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog row for an entree seen at a given commons and meal.
///
/// Rows are created on first sighting and never mutated; the
/// (commons, meal, name, station) tuple is unique at the storage level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub dining_commons_code: String,
    pub meal_code: String,
    pub name: String,
    pub station: String,
}

/// Catalog row joined with its average review score.
///
/// `average_rating` is null when the item has no reviews, never zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemWithAvg {
    pub id: i64,
    pub dining_commons_code: String,
    pub meal_code: String,
    pub name: String,
    pub station: String,
    pub average_rating: Option<f64>,
}

impl MenuItemWithAvg {
    pub fn new(item: MenuItem, average_rating: Option<f64>) -> Self {
        Self {
            id: item.id,
            dining_commons_code: item.dining_commons_code,
            meal_code: item.meal_code,
            name: item.name,
            station: item.station,
            average_rating,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    AwaitingReview,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub student_id: i64,
    pub item_id: i64,
    pub date_item_served: NaiveDateTime,
    pub reviewer_comments: Option<String>,
    pub items_stars: i64,
    pub status: ReviewStatus,
    pub user_id_moderator: Option<i64>,
    pub moderator_comments: Option<String>,
    pub date_reviewed: Option<NaiveDateTime>,
    pub date_created: NaiveDateTime,
    pub date_edited: NaiveDateTime,
}

/// Create-review payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    pub item_id: i64,
    pub items_stars: i64,
    pub reviewer_comments: Option<String>,
    pub date_item_served: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub google_sub: String,
    pub email: String,
    pub full_name: String,
    pub given_name: String,
    pub family_name: String,
    pub picture_url: String,
    pub email_verified: bool,
    pub locale: String,
    pub hosted_domain: String,
    pub admin: bool,
    pub moderator: bool,
    pub alias: Option<String>,
    pub proposed_alias: Option<String>,
    pub date_approved: Option<NaiveDateTime>,
}
