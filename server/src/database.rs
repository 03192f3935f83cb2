//! SQLite persistence.
//!
//! Pool setup plus the repository functions the handlers call. Queries are
//! single, independent statements; the menu-item read-or-create relies on
//! the UNIQUE key index rather than a transaction.

use std::str::FromStr;

use chrono::NaiveDateTime;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::models::{CreateReview, MenuItem, Review, ReviewStatus, User};

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Database misconfigured!")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("Database unreachable!");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Migrations failed!");

    pool
}

pub async fn menu_item_by_id(pool: &SqlitePool, id: i64) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_menu_item(
    pool: &SqlitePool,
    dining_commons_code: &str,
    meal_code: &str,
    name: &str,
    station: &str,
) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query_as::<_, MenuItem>(
        "SELECT * FROM menu_items
         WHERE dining_commons_code = ? AND meal_code = ? AND name = ? AND station = ?",
    )
    .bind(dining_commons_code)
    .bind(meal_code)
    .bind(name)
    .bind(station)
    .fetch_optional(pool)
    .await
}

/// Returns the catalog row for the key, inserting it on first sighting.
///
/// Concurrent first sightings converge on one row: the insert tolerates a
/// conflict on the key index and re-reads the winner.
pub async fn find_or_create_menu_item(
    pool: &SqlitePool,
    dining_commons_code: &str,
    meal_code: &str,
    name: &str,
    station: &str,
) -> Result<MenuItem, sqlx::Error> {
    if let Some(item) = find_menu_item(pool, dining_commons_code, meal_code, name, station).await? {
        return Ok(item);
    }

    let inserted = sqlx::query_as::<_, MenuItem>(
        "INSERT INTO menu_items (dining_commons_code, meal_code, name, station)
         VALUES (?, ?, ?, ?)
         ON CONFLICT (dining_commons_code, meal_code, name, station) DO NOTHING
         RETURNING *",
    )
    .bind(dining_commons_code)
    .bind(meal_code)
    .bind(name)
    .bind(station)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(item) => Ok(item),
        None => find_menu_item(pool, dining_commons_code, meal_code, name, station)
            .await?
            .ok_or(sqlx::Error::RowNotFound),
    }
}

/// Average of all review scores for the item; `None` when it has no reviews.
pub async fn average_rating(pool: &SqlitePool, item_id: i64) -> Result<Option<f64>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<f64>>("SELECT AVG(items_stars) FROM reviews WHERE item_id = ?")
        .bind(item_id)
        .fetch_one(pool)
        .await
}

pub async fn insert_review(
    pool: &SqlitePool,
    student_id: i64,
    create: &CreateReview,
    now: NaiveDateTime,
) -> Result<Review, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "INSERT INTO reviews
            (student_id, item_id, date_item_served, reviewer_comments, items_stars,
             status, date_created, date_edited)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(student_id)
    .bind(create.item_id)
    .bind(create.date_item_served)
    .bind(&create.reviewer_comments)
    .bind(create.items_stars)
    .bind(ReviewStatus::AwaitingReview)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn all_reviews(pool: &SqlitePool) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>("SELECT * FROM reviews ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn reviews_awaiting_moderation(pool: &SqlitePool) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE status = ? ORDER BY id")
        .bind(ReviewStatus::AwaitingReview)
        .fetch_all(pool)
        .await
}

pub async fn moderate_review(
    pool: &SqlitePool,
    id: i64,
    status: ReviewStatus,
    moderator_id: i64,
    moderator_comments: Option<&str>,
    now: NaiveDateTime,
) -> Result<Option<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "UPDATE reviews
         SET status = ?, user_id_moderator = ?, moderator_comments = ?,
             date_reviewed = ?, date_edited = ?
         WHERE id = ?
         RETURNING *",
    )
    .bind(status)
    .bind(moderator_id)
    .bind(moderator_comments)
    .bind(now)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn user_by_google_sub(
    pool: &SqlitePool,
    google_sub: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE google_sub = ?")
        .bind(google_sub)
        .fetch_optional(pool)
        .await
}

/// Inserts a user row, ignoring the id on the way in.
pub async fn insert_user(pool: &SqlitePool, user: &User) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users
            (google_sub, email, full_name, given_name, family_name, picture_url,
             email_verified, locale, hosted_domain, admin, moderator,
             alias, proposed_alias, date_approved)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(&user.google_sub)
    .bind(&user.email)
    .bind(&user.full_name)
    .bind(&user.given_name)
    .bind(&user.family_name)
    .bind(&user.picture_url)
    .bind(user.email_verified)
    .bind(&user.locale)
    .bind(&user.hosted_domain)
    .bind(user.admin)
    .bind(user.moderator)
    .bind(&user.alias)
    .bind(&user.proposed_alias)
    .bind(user.date_approved)
    .fetch_one(pool)
    .await
}

pub async fn set_proposed_alias(
    pool: &SqlitePool,
    user_id: i64,
    proposed_alias: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET proposed_alias = ? WHERE id = ? RETURNING *",
    )
    .bind(proposed_alias)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn users_with_proposed_alias(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE proposed_alias IS NOT NULL ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

/// Approving promotes the proposed alias; rejecting discards it.
pub async fn moderate_alias(
    pool: &SqlitePool,
    user_id: i64,
    approved: bool,
    now: NaiveDateTime,
) -> Result<Option<User>, sqlx::Error> {
    let query = if approved {
        sqlx::query_as::<_, User>(
            "UPDATE users
             SET alias = proposed_alias, proposed_alias = NULL, date_approved = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(now)
    } else {
        sqlx::query_as::<_, User>(
            "UPDATE users SET proposed_alias = NULL WHERE id = ? RETURNING *",
        )
    };

    query.bind(user_id).fetch_optional(pool).await
}
