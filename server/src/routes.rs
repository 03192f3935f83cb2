use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{menu, reviews, state::AppState, users};

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/diningcommons/menuitem", get(menu::get_menu_item))
        .route(
            "/api/diningcommons/{date_time}/{dining_commons_code}/{meal_code}",
            get(menu::get_menu_items),
        )
        .route("/api/reviews/post", post(reviews::post_review))
        .route("/api/reviews/all", get(reviews::all_reviews))
        .route("/api/reviews/needsmoderation", get(reviews::needs_moderation))
        .route("/api/reviews/moderate", put(reviews::moderate_review))
        .route("/api/currentUser", get(users::current_user))
        .route("/api/currentUser/updateAlias", put(users::update_alias))
        .route(
            "/api/currentUser/updateAliasModeration",
            put(users::update_alias_moderation),
        )
        .route(
            "/api/admin/usersWithProposedAlias",
            get(users::users_with_proposed_alias),
        )
        .with_state(state)
}
